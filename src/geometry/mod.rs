//! Core geometry types for layout and drawing
//!
//! This module provides the geometric primitives used throughout the engine.
//! All units are in typographic points.
//!
//! # Coordinate System
//!
//! The coordinate system has its origin at the top-left corner:
//! - Positive X extends to the right
//! - Positive Y extends downward
//!
//! A rectangle's `min_y` is therefore its top edge and `max_y` its bottom
//! edge; content flows from smaller to larger Y.

use std::fmt;

pub mod clip;
pub mod transform;

pub use clip::clip_polygon;
pub use transform::AffineTransform;

/// Tolerance used for "on the line" / containment comparisons.
pub const GEOMETRY_EPS: f32 = 1e-3;

/// A 2D point in layout space
///
/// # Examples
///
/// ```
/// use pageflow::geometry::Point;
///
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x, 10.0);
/// assert_eq!(Point::ZERO, Point::new(0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
  /// X coordinate (increases to the right)
  pub x: f32,
  /// Y coordinate (increases downward)
  pub y: f32,
}

impl Point {
  /// The origin (0, 0)
  pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

  /// Creates a new point at the given coordinates
  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }

  /// Translates this point by the given offsets
  pub fn translate(self, dx: f32, dy: f32) -> Self {
    Self {
      x: self.x + dx,
      y: self.y + dy,
    }
  }
}

impl fmt::Display for Point {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}

/// A 2D size
///
/// Both dimensions may be negative; the box-model resolver passes negative
/// results through rather than rejecting them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
  /// Horizontal extent
  pub width: f32,
  /// Vertical extent
  pub height: f32,
}

impl Size {
  /// A size with zero width and height
  pub const ZERO: Self = Self {
    width: 0.0,
    height: 0.0,
  };

  /// Creates a new size with the given dimensions
  pub const fn new(width: f32, height: f32) -> Self {
    Self { width, height }
  }

  /// Computes the area (width × height)
  pub fn area(self) -> f32 {
    self.width * self.height
  }
}

impl fmt::Display for Size {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}×{}", self.width, self.height)
  }
}

/// An axis-aligned rectangle
///
/// Defined by an origin point (top-left corner) and a size.
///
/// # Examples
///
/// ```
/// use pageflow::geometry::Rect;
///
/// let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
/// assert_eq!(rect.max_x(), 110.0);
/// assert_eq!(rect.max_y(), 70.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
  /// The top-left corner
  pub origin: Point,
  /// Width and height
  pub size: Size,
}

impl Rect {
  /// A zero-sized rectangle at the origin
  pub const ZERO: Self = Self {
    origin: Point::ZERO,
    size: Size::ZERO,
  };

  /// Creates a rectangle from an origin point and size
  pub const fn new(origin: Point, size: Size) -> Self {
    Self { origin, size }
  }

  /// Creates a rectangle from x, y, width, height components
  pub const fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
    Self {
      origin: Point::new(x, y),
      size: Size::new(width, height),
    }
  }

  /// Returns the x coordinate of the left edge
  pub fn x(self) -> f32 {
    self.origin.x
  }

  /// Returns the y coordinate of the top edge
  pub fn y(self) -> f32 {
    self.origin.y
  }

  /// Returns the width
  pub fn width(self) -> f32 {
    self.size.width
  }

  /// Returns the height
  pub fn height(self) -> f32 {
    self.size.height
  }

  /// Returns the x coordinate of the left edge
  pub fn min_x(self) -> f32 {
    self.origin.x
  }

  /// Returns the x coordinate of the right edge
  pub fn max_x(self) -> f32 {
    self.origin.x + self.size.width
  }

  /// Returns the y coordinate of the top edge
  pub fn min_y(self) -> f32 {
    self.origin.y
  }

  /// Returns the y coordinate of the bottom edge
  pub fn max_y(self) -> f32 {
    self.origin.y + self.size.height
  }

  /// The four corners in clockwise order starting at the top-left
  pub fn corners(self) -> [Point; 4] {
    [
      Point::new(self.min_x(), self.min_y()),
      Point::new(self.max_x(), self.min_y()),
      Point::new(self.max_x(), self.max_y()),
      Point::new(self.min_x(), self.max_y()),
    ]
  }

  /// Returns true if this rectangle intersects another
  ///
  /// Rectangles that touch at an edge or corner count as intersecting.
  pub fn intersects(self, other: Rect) -> bool {
    self.min_x() <= other.max_x()
      && self.max_x() >= other.min_x()
      && self.min_y() <= other.max_y()
      && self.max_y() >= other.min_y()
  }

  /// The smallest rectangle containing both rectangles
  ///
  /// # Examples
  ///
  /// ```
  /// use pageflow::geometry::Rect;
  ///
  /// let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
  /// let b = Rect::from_xywh(5.0, 5.0, 10.0, 10.0);
  /// assert_eq!(a.union(b), Rect::from_xywh(0.0, 0.0, 15.0, 15.0));
  /// ```
  pub fn union(self, other: Rect) -> Rect {
    let min_x = self.min_x().min(other.min_x());
    let min_y = self.min_y().min(other.min_y());
    let max_x = self.max_x().max(other.max_x());
    let max_y = self.max_y().max(other.max_y());
    Rect::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y)
  }

  /// The overlap of two rectangles, or `None` when they do not intersect
  pub fn intersection(self, other: Rect) -> Option<Rect> {
    if !self.intersects(other) {
      return None;
    }
    let min_x = self.min_x().max(other.min_x());
    let min_y = self.min_y().max(other.min_y());
    let max_x = self.max_x().min(other.max_x());
    let max_y = self.max_y().min(other.max_y());
    Some(Rect::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y))
  }

  /// Returns true if `other` lies entirely within this rectangle,
  /// allowing [`GEOMETRY_EPS`] of slack on every edge
  pub fn contains_rect(self, other: Rect) -> bool {
    other.min_x() >= self.min_x() - GEOMETRY_EPS
      && other.max_x() <= self.max_x() + GEOMETRY_EPS
      && other.min_y() >= self.min_y() - GEOMETRY_EPS
      && other.max_y() <= self.max_y() + GEOMETRY_EPS
  }

  /// Translates this rectangle by the given offsets
  pub fn translate(self, dx: f32, dy: f32) -> Rect {
    Rect {
      origin: self.origin.translate(dx, dy),
      size: self.size,
    }
  }
}

impl fmt::Display for Rect {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[{} {}]", self.origin, self.size)
  }
}

/// Edge offsets on all four sides
///
/// Used for margin widths, border widths and padding.
///
/// # Examples
///
/// ```
/// use pageflow::geometry::EdgeOffsets;
///
/// let padding = EdgeOffsets::all(10.0);
/// assert_eq!(padding.horizontal(), 20.0);
/// assert_eq!(padding.vertical(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeOffsets {
  /// Top edge offset
  pub top: f32,
  /// Right edge offset
  pub right: f32,
  /// Bottom edge offset
  pub bottom: f32,
  /// Left edge offset
  pub left: f32,
}

impl EdgeOffsets {
  /// Zero offsets on all sides
  pub const ZERO: Self = Self {
    top: 0.0,
    right: 0.0,
    bottom: 0.0,
    left: 0.0,
  };

  /// Creates edge offsets with individual values for each side
  pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
    Self {
      top,
      right,
      bottom,
      left,
    }
  }

  /// The same value on all four sides
  pub const fn all(value: f32) -> Self {
    Self {
      top: value,
      right: value,
      bottom: value,
      left: value,
    }
  }

  /// Sum of left and right offsets
  pub fn horizontal(self) -> f32 {
    self.left + self.right
  }

  /// Sum of top and bottom offsets
  pub fn vertical(self) -> f32 {
    self.top + self.bottom
  }

  /// Returns true if all four offsets are zero
  pub fn is_zero(self) -> bool {
    self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_point_translate() {
    let p = Point::new(10.0, 20.0).translate(5.0, 3.0);
    assert_eq!(p, Point::new(15.0, 23.0));
  }

  #[test]
  fn test_rect_accessors() {
    let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
    assert_eq!(rect.min_x(), 10.0);
    assert_eq!(rect.max_x(), 110.0);
    assert_eq!(rect.min_y(), 20.0);
    assert_eq!(rect.max_y(), 70.0);
  }

  #[test]
  fn test_rect_corners_clockwise() {
    let rect = Rect::from_xywh(0.0, 0.0, 10.0, 20.0);
    let corners = rect.corners();
    assert_eq!(corners[0], Point::new(0.0, 0.0));
    assert_eq!(corners[1], Point::new(10.0, 0.0));
    assert_eq!(corners[2], Point::new(10.0, 20.0));
    assert_eq!(corners[3], Point::new(0.0, 20.0));
  }

  #[test]
  fn test_rect_union() {
    let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
    let b = Rect::from_xywh(5.0, 5.0, 10.0, 10.0);
    assert_eq!(a.union(b), Rect::from_xywh(0.0, 0.0, 15.0, 15.0));
  }

  #[test]
  fn test_rect_union_disjoint() {
    let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
    let b = Rect::from_xywh(20.0, 30.0, 10.0, 10.0);
    assert_eq!(a.union(b), Rect::from_xywh(0.0, 0.0, 30.0, 40.0));
  }

  #[test]
  fn test_rect_intersection() {
    let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
    let b = Rect::from_xywh(5.0, 5.0, 10.0, 10.0);
    let c = Rect::from_xywh(20.0, 20.0, 10.0, 10.0);
    assert_eq!(a.intersection(b), Some(Rect::from_xywh(5.0, 5.0, 5.0, 5.0)));
    assert_eq!(a.intersection(c), None);
  }

  #[test]
  fn test_rect_contains_rect() {
    let outer = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
    assert!(outer.contains_rect(Rect::from_xywh(10.0, 10.0, 50.0, 50.0)));
    assert!(outer.contains_rect(outer));
    // Within tolerance counts as contained.
    assert!(outer.contains_rect(Rect::from_xywh(-0.0005, 0.0, 100.0, 100.0)));
    assert!(!outer.contains_rect(Rect::from_xywh(10.0, 10.0, 100.0, 50.0)));
  }

  #[test]
  fn test_edge_offsets_sums() {
    let offsets = EdgeOffsets::new(5.0, 10.0, 15.0, 20.0);
    assert_eq!(offsets.horizontal(), 30.0);
    assert_eq!(offsets.vertical(), 20.0);
    assert!(!offsets.is_zero());
    assert!(EdgeOffsets::ZERO.is_zero());
  }
}
