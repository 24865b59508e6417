//! Affine transforms for rotated-content geometry
//!
//! Layout only needs translation and rotation about a point: mapping an
//! occupied rectangle's corners to find a rotated bounding box, and building
//! the content-to-device transform used when drawing rotated content.

use super::{Point, Rect};

/// A 2D affine transform stored as the 2×3 matrix
///
/// ```text
/// | a c e |
/// | b d f |
/// ```
///
/// mapping `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`.
///
/// # Examples
///
/// ```
/// use pageflow::geometry::{AffineTransform, Point};
///
/// let tf = AffineTransform::translation(10.0, 5.0);
/// assert_eq!(tf.apply(Point::ZERO), Point::new(10.0, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
  pub a: f32,
  pub b: f32,
  pub c: f32,
  pub d: f32,
  pub e: f32,
  pub f: f32,
}

impl AffineTransform {
  /// The identity transform
  pub const IDENTITY: Self = Self {
    a: 1.0,
    b: 0.0,
    c: 0.0,
    d: 1.0,
    e: 0.0,
    f: 0.0,
  };

  /// A pure translation
  pub const fn translation(dx: f32, dy: f32) -> Self {
    Self {
      a: 1.0,
      b: 0.0,
      c: 0.0,
      d: 1.0,
      e: dx,
      f: dy,
    }
  }

  /// Rotation about the origin by `angle` radians
  pub fn rotation(angle: f32) -> Self {
    let (sin, cos) = angle.sin_cos();
    Self {
      a: cos,
      b: sin,
      c: -sin,
      d: cos,
      e: 0.0,
      f: 0.0,
    }
  }

  /// Rotation about an arbitrary pivot point
  ///
  /// Equivalent to translating the pivot to the origin, rotating, and
  /// translating back.
  pub fn rotation_about(angle: f32, pivot: Point) -> Self {
    AffineTransform::translation(-pivot.x, -pivot.y)
      .then(AffineTransform::rotation(angle))
      .then(AffineTransform::translation(pivot.x, pivot.y))
  }

  /// Composes two transforms: `self` is applied first, `next` second
  pub fn then(self, next: AffineTransform) -> AffineTransform {
    AffineTransform {
      a: next.a * self.a + next.c * self.b,
      b: next.b * self.a + next.d * self.b,
      c: next.a * self.c + next.c * self.d,
      d: next.b * self.c + next.d * self.d,
      e: next.a * self.e + next.c * self.f + next.e,
      f: next.b * self.e + next.d * self.f + next.f,
    }
  }

  /// Applies this transform to a point
  pub fn apply(self, p: Point) -> Point {
    Point::new(
      self.a * p.x + self.c * p.y + self.e,
      self.b * p.x + self.d * p.y + self.f,
    )
  }

  /// Applies this transform to every point in a slice
  pub fn transform_points(self, points: &[Point]) -> Vec<Point> {
    points.iter().map(|&p| self.apply(p)).collect()
  }
}

/// Axis-aligned bounding box of a point set
///
/// Returns [`Rect::ZERO`] for an empty set.
pub fn bounding_box(points: &[Point]) -> Rect {
  let Some(first) = points.first() else {
    return Rect::ZERO;
  };
  let mut min_x = first.x;
  let mut max_x = first.x;
  let mut min_y = first.y;
  let mut max_y = first.y;
  for p in &points[1..] {
    min_x = min_x.min(p.x);
    max_x = max_x.max(p.x);
    min_y = min_y.min(p.y);
    max_y = max_y.max(p.y);
  }
  Rect::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// Translation that places the bounding box of `points` with its top-left
/// corner at `target`
pub fn shift_to_position_bbox_at(target: Point, points: &[Point]) -> (f32, f32) {
  let bbox = bounding_box(points);
  (target.x - bbox.min_x(), target.y - bbox.min_y())
}

#[cfg(test)]
mod tests {
  use super::*;

  const EPS: f32 = 1e-4;

  fn assert_point_eq(p: Point, x: f32, y: f32) {
    assert!((p.x - x).abs() < EPS, "x: {} vs {}", p.x, x);
    assert!((p.y - y).abs() < EPS, "y: {} vs {}", p.y, y);
  }

  #[test]
  fn test_identity() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(AffineTransform::IDENTITY.apply(p), p);
  }

  #[test]
  fn test_rotation_quarter_turn() {
    let tf = AffineTransform::rotation(std::f32::consts::FRAC_PI_2);
    // With y pointing down, a positive quarter turn maps +x onto +y.
    assert_point_eq(tf.apply(Point::new(1.0, 0.0)), 0.0, 1.0);
    assert_point_eq(tf.apply(Point::new(0.0, 1.0)), -1.0, 0.0);
  }

  #[test]
  fn test_rotation_about_pivot_fixes_pivot() {
    let pivot = Point::new(5.0, 7.0);
    let tf = AffineTransform::rotation_about(1.1, pivot);
    assert_point_eq(tf.apply(pivot), pivot.x, pivot.y);
  }

  #[test]
  fn test_then_order() {
    // Rotate a quarter turn, then translate.
    let tf = AffineTransform::rotation(std::f32::consts::FRAC_PI_2)
      .then(AffineTransform::translation(10.0, 0.0));
    assert_point_eq(tf.apply(Point::new(1.0, 0.0)), 10.0, 1.0);
  }

  #[test]
  fn test_bounding_box_of_rotated_rect() {
    let rect = Rect::from_xywh(0.0, 0.0, 100.0, 20.0);
    let tf = AffineTransform::rotation(std::f32::consts::FRAC_PI_2);
    let points = tf.transform_points(&rect.corners());
    let bbox = bounding_box(&points);
    assert!((bbox.width() - 20.0).abs() < EPS);
    assert!((bbox.height() - 100.0).abs() < EPS);
  }

  #[test]
  fn test_shift_to_position_bbox_at() {
    let points = [Point::new(-5.0, 3.0), Point::new(2.0, 10.0)];
    let (dx, dy) = shift_to_position_bbox_at(Point::new(0.0, 0.0), &points);
    assert_point_eq(Point::new(dx, dy), 5.0, -3.0);
  }

  #[test]
  fn test_bounding_box_empty() {
    assert_eq!(bounding_box(&[]), Rect::ZERO);
  }
}
