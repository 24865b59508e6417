//! Intrinsic width estimation
//!
//! [`MinMaxWidth`] carries the widths a subtree needs: the minimum below
//! which content cannot render without overflow and the natural maximum it
//! would take given unlimited width. Containers fold their children's bounds
//! through a [`WidthHandler`]; block-like containers take the max across
//! children, row-like containers sum them.

use crate::geometry::Rect;
use crate::layout::{LayoutArea, LayoutContext, INF};
use crate::renderer::Renderer;

/// Probe margin added to a width bound before a verification layout, so the
/// probe is not rejected by exact-boundary arithmetic
pub const PROBE_EPS: f32 = 0.01;

/// Intrinsic width bounds for one subtree
///
/// `additional_width` is the horizontal space the node's own edges (margins,
/// borders, paddings) consume on top of its children's content widths.
///
/// # Examples
///
/// ```
/// use pageflow::minmax::MinMaxWidth;
///
/// let mm = MinMaxWidth::with_bounds(10.0, 500.0, 40.0, 120.0);
/// assert_eq!(mm.min_width(), 50.0);
/// assert_eq!(mm.max_width(), 130.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxWidth {
  pub additional_width: f32,
  pub available_width: f32,
  pub children_min_width: f32,
  pub children_max_width: f32,
}

impl MinMaxWidth {
  /// Empty bounds for a node whose edges consume `additional_width`
  pub fn new(additional_width: f32, available_width: f32) -> Self {
    Self {
      additional_width,
      available_width,
      children_min_width: 0.0,
      children_max_width: 0.0,
    }
  }

  /// Bounds with known child widths
  pub fn with_bounds(
    additional_width: f32,
    available_width: f32,
    children_min_width: f32,
    children_max_width: f32,
  ) -> Self {
    Self {
      additional_width,
      available_width,
      children_min_width,
      children_max_width,
    }
  }

  /// The smallest width this subtree can render in, clamped to the
  /// available width and never negative
  pub fn min_width(&self) -> f32 {
    (self.children_min_width + self.additional_width)
      .min(self.available_width)
      .max(0.0)
  }

  /// The natural width this subtree takes given unlimited space, clamped
  /// like `min_width`
  pub fn max_width(&self) -> f32 {
    (self.children_max_width + self.additional_width)
      .min(self.available_width)
      .max(0.0)
  }
}

/// Folds child width bounds into a parent's [`MinMaxWidth`]
pub trait WidthHandler {
  fn update_min_child_width(&mut self, child_min: f32);
  fn update_max_child_width(&mut self, child_max: f32);
}

/// Stacked children: the parent needs the widest child on both bounds
pub struct MaxWidthHandler<'a> {
  minmax: &'a mut MinMaxWidth,
}

impl<'a> MaxWidthHandler<'a> {
  pub fn new(minmax: &'a mut MinMaxWidth) -> Self {
    Self { minmax }
  }
}

impl WidthHandler for MaxWidthHandler<'_> {
  fn update_min_child_width(&mut self, child_min: f32) {
    self.minmax.children_min_width = self.minmax.children_min_width.max(child_min);
  }

  fn update_max_child_width(&mut self, child_max: f32) {
    self.minmax.children_max_width = self.minmax.children_max_width.max(child_max);
  }
}

/// Side-by-side children: bounds accumulate by summation
pub struct SumWidthHandler<'a> {
  minmax: &'a mut MinMaxWidth,
}

impl<'a> SumWidthHandler<'a> {
  pub fn new(minmax: &'a mut MinMaxWidth) -> Self {
    Self { minmax }
  }
}

impl WidthHandler for SumWidthHandler<'_> {
  fn update_min_child_width(&mut self, child_min: f32) {
    self.minmax.children_min_width += child_min;
  }

  fn update_max_child_width(&mut self, child_max: f32) {
    self.minmax.children_max_width += child_max;
  }
}

/// Fallback estimator for nodes without a structural recursion: lay out a
/// probe clone at the available width with unbounded height and read the
/// occupied width back as both bounds.
///
/// Probing a clone keeps the estimate free of side effects on the live tree.
pub fn default_min_max_width(mut probe: Box<dyn Renderer>, available_width: f32) -> MinMaxWidth {
  let mut floats = Vec::new();
  let area = LayoutArea::new(1, Rect::from_xywh(0.0, 0.0, available_width, INF));
  let result = probe.layout(&mut LayoutContext::new(area, &mut floats));
  let width = result
    .occupied
    .map(|occupied| occupied.rect.width())
    .unwrap_or(0.0);
  MinMaxWidth::with_bounds(0.0, available_width, width, width)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_bounds_include_additional_width() {
    let mm = MinMaxWidth::with_bounds(12.0, 1000.0, 30.0, 80.0);
    assert_eq!(mm.min_width(), 42.0);
    assert_eq!(mm.max_width(), 92.0);
  }

  #[test]
  fn test_bounds_clamped_to_available() {
    let mm = MinMaxWidth::with_bounds(0.0, 60.0, 30.0, 80.0);
    assert_eq!(mm.min_width(), 30.0);
    assert_eq!(mm.max_width(), 60.0);
  }

  #[test]
  fn test_bounds_never_negative() {
    let mm = MinMaxWidth::with_bounds(-20.0, 100.0, 5.0, 5.0);
    assert_eq!(mm.min_width(), 0.0);
    assert_eq!(mm.max_width(), 0.0);
  }

  #[test]
  fn test_max_width_handler_takes_widest_child() {
    let mut mm = MinMaxWidth::new(0.0, 1000.0);
    let mut handler = MaxWidthHandler::new(&mut mm);
    handler.update_min_child_width(30.0);
    handler.update_min_child_width(50.0);
    handler.update_max_child_width(70.0);
    handler.update_max_child_width(40.0);
    assert_eq!(mm.children_min_width, 50.0);
    assert_eq!(mm.children_max_width, 70.0);
  }

  #[test]
  fn test_sum_width_handler_accumulates() {
    let mut mm = MinMaxWidth::new(0.0, 1000.0);
    let mut handler = SumWidthHandler::new(&mut mm);
    handler.update_min_child_width(30.0);
    handler.update_min_child_width(50.0);
    handler.update_max_child_width(70.0);
    handler.update_max_child_width(40.0);
    assert_eq!(mm.children_min_width, 80.0);
    assert_eq!(mm.children_max_width, 110.0);
  }
}
