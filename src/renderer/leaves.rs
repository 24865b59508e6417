//! Leaf renderers
//!
//! Two content leaves sit at the bottom of a renderer tree:
//!
//! - [`RigidBoxRenderer`] has a fixed intrinsic size and never splits. It
//!   either fits the supplied area in full or reports `Nothing` with itself
//!   as overflow.
//! - [`LineStackRenderer`] models a stack of uniform lines (a paragraph
//!   stand-in). It splits between lines, so a prefix of lines can stay in
//!   the current area while the rest overflows.
//!
//! Leaves resolve explicit width/height through the shared box-model
//! resolver but carry no edge decorations of their own; margins placed on a
//! leaf take effect only through an enclosing margin-collapse scope.

use crate::draw::DrawContext;
use crate::error::{Error, Result};
use crate::geometry::{Rect, Size};
use crate::layout::{LayoutArea, LayoutContext, LayoutResult, LayoutStatus, NothingCause, EPS};
use crate::minmax::MinMaxWidth;
use crate::properties::Properties;
use crate::renderer::{box_model, Renderer};

/// An unsplittable leaf with a fixed intrinsic size
#[derive(Clone)]
pub struct RigidBoxRenderer {
  props: Properties,
  intrinsic: Size,
  occupied: Option<LayoutArea>,
  flushed: bool,
}

impl RigidBoxRenderer {
  pub fn new(width: f32, height: f32) -> Self {
    Self::with_properties(width, height, Properties::new())
  }

  pub fn with_properties(width: f32, height: f32, props: Properties) -> Self {
    Self {
      props,
      intrinsic: Size::new(width, height),
      occupied: None,
      flushed: false,
    }
  }

  fn resolved_size(&self, available: Rect) -> Size {
    let width = box_model::resolve_width(&self.props, available.width())
      .unwrap_or(self.intrinsic.width);
    let height = box_model::resolve_height(&self.props, available.height())
      .unwrap_or(self.intrinsic.height);
    Size::new(width, height)
  }
}

impl Renderer for RigidBoxRenderer {
  fn layout(&mut self, ctx: &mut LayoutContext<'_>) -> LayoutResult {
    let area = ctx.area.rect;
    let size = self.resolved_size(area);
    let fits = size.height <= area.height() + EPS && size.width <= area.width() + EPS;
    if !fits && !self.props.forced_placement {
      return LayoutResult::nothing(Some(self.clone_box()), NothingCause::of(self));
    }
    let rect = Rect::from_xywh(area.x(), area.y(), size.width, size.height);
    let occupied = LayoutArea::new(ctx.area.page, rect);
    self.occupied = Some(occupied);
    LayoutResult::full(occupied)
  }

  fn draw(&mut self, ctx: &mut DrawContext<'_>) -> Result<()> {
    let Some(occupied) = self.occupied else {
      log::error!("draw called before layout on a {} renderer", self.kind());
      return Err(Error::DrawBeforeLayout { kind: self.kind() });
    };
    if let Some(tags) = ctx.tags.as_deref_mut() {
      tags.add_tag(self.kind(), self.props.label.as_deref());
    }
    if let Some(color) = self.props.background {
      ctx.sink.fill_rect(occupied.rect, color);
    }
    if let Some(tags) = ctx.tags.as_deref_mut() {
      tags.move_to_parent();
    }
    self.flushed = true;
    Ok(())
  }

  fn move_by(&mut self, dx: f32, dy: f32) {
    if let Some(occupied) = self.occupied.as_mut() {
      occupied.rect = occupied.rect.translate(dx, dy);
    }
  }

  fn occupied_area(&self) -> Option<&LayoutArea> {
    self.occupied.as_ref()
  }

  fn properties(&self) -> &Properties {
    &self.props
  }

  fn properties_mut(&mut self) -> &mut Properties {
    &mut self.props
  }

  fn kind(&self) -> &'static str {
    "rigid-box"
  }

  fn is_flushed(&self) -> bool {
    self.flushed
  }

  fn clone_box(&self) -> Box<dyn Renderer> {
    Box::new(self.clone())
  }

  fn min_max_width(&mut self, available_width: f32) -> MinMaxWidth {
    let width = match self.props.width {
      Some(w) => w.resolve(available_width),
      None => self.intrinsic.width,
    };
    MinMaxWidth::with_bounds(0.0, available_width, width, width)
  }
}

/// A splittable leaf: `line_count` lines of uniform `line_height`
///
/// Splits between whole lines. A split produces a clone holding the lines
/// that fit and an overflow clone holding the rest.
#[derive(Clone)]
pub struct LineStackRenderer {
  props: Properties,
  line_count: usize,
  line_height: f32,
  line_width: f32,
  occupied: Option<LayoutArea>,
  flushed: bool,
}

impl LineStackRenderer {
  pub fn new(line_count: usize, line_height: f32, line_width: f32) -> Self {
    Self::with_properties(line_count, line_height, line_width, Properties::new())
  }

  pub fn with_properties(
    line_count: usize,
    line_height: f32,
    line_width: f32,
    props: Properties,
  ) -> Self {
    Self {
      props,
      line_count,
      line_height,
      line_width,
      occupied: None,
      flushed: false,
    }
  }

  pub fn line_count(&self) -> usize {
    self.line_count
  }

  fn part(&self, line_count: usize) -> LineStackRenderer {
    LineStackRenderer {
      props: self.props.clone(),
      line_count,
      line_height: self.line_height,
      line_width: self.line_width,
      occupied: None,
      flushed: false,
    }
  }
}

impl Renderer for LineStackRenderer {
  fn layout(&mut self, ctx: &mut LayoutContext<'_>) -> LayoutResult {
    let area = ctx.area.rect;
    let width = box_model::resolve_width(&self.props, area.width()).unwrap_or(self.line_width);
    let fitting = if self.line_height <= 0.0 {
      self.line_count
    } else {
      (((area.height() + EPS) / self.line_height).floor() as usize).min(self.line_count)
    };

    if fitting == 0 && !self.props.forced_placement {
      return LayoutResult::nothing(Some(self.clone_box()), NothingCause::of(self));
    }

    let placed = if self.props.forced_placement {
      self.line_count
    } else {
      fitting
    };
    let rect = Rect::from_xywh(area.x(), area.y(), width, placed as f32 * self.line_height);
    let occupied = LayoutArea::new(ctx.area.page, rect);

    if placed >= self.line_count {
      self.occupied = Some(occupied);
      return LayoutResult::full(occupied);
    }

    if self.props.keep_together {
      return LayoutResult::nothing(Some(self.clone_box()), NothingCause::of(self));
    }

    let mut split = self.part(placed);
    split.occupied = Some(occupied);
    let overflow = self.part(self.line_count - placed);
    self.occupied = Some(occupied);
    LayoutResult::partial(occupied, Some(Box::new(split)), Box::new(overflow))
  }

  fn draw(&mut self, ctx: &mut DrawContext<'_>) -> Result<()> {
    let Some(occupied) = self.occupied else {
      log::error!("draw called before layout on a {} renderer", self.kind());
      return Err(Error::DrawBeforeLayout { kind: self.kind() });
    };
    if let Some(tags) = ctx.tags.as_deref_mut() {
      tags.add_tag(self.kind(), self.props.label.as_deref());
    }
    if let Some(color) = self.props.background {
      for line in 0..self.line_count {
        let rect = Rect::from_xywh(
          occupied.rect.x(),
          occupied.rect.y() + line as f32 * self.line_height,
          occupied.rect.width(),
          self.line_height,
        );
        ctx.sink.fill_rect(rect, color);
      }
    }
    if let Some(tags) = ctx.tags.as_deref_mut() {
      tags.move_to_parent();
    }
    self.flushed = true;
    Ok(())
  }

  fn move_by(&mut self, dx: f32, dy: f32) {
    if let Some(occupied) = self.occupied.as_mut() {
      occupied.rect = occupied.rect.translate(dx, dy);
    }
  }

  fn occupied_area(&self) -> Option<&LayoutArea> {
    self.occupied.as_ref()
  }

  fn properties(&self) -> &Properties {
    &self.props
  }

  fn properties_mut(&mut self) -> &mut Properties {
    &mut self.props
  }

  fn kind(&self) -> &'static str {
    "line-stack"
  }

  fn is_flushed(&self) -> bool {
    self.flushed
  }

  fn clone_box(&self) -> Box<dyn Renderer> {
    Box::new(self.clone())
  }

  fn min_max_width(&mut self, available_width: f32) -> MinMaxWidth {
    let width = match self.props.width {
      Some(w) => w.resolve(available_width),
      None => self.line_width,
    };
    MinMaxWidth::with_bounds(0.0, available_width, width, width)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn layout_in(renderer: &mut dyn Renderer, rect: Rect) -> LayoutResult {
    let mut floats = Vec::new();
    let area = LayoutArea::new(1, rect);
    renderer.layout(&mut LayoutContext::new(area, &mut floats))
  }

  #[test]
  fn test_rigid_box_fits() {
    let mut leaf = RigidBoxRenderer::new(50.0, 30.0);
    let result = layout_in(&mut leaf, Rect::from_xywh(10.0, 20.0, 100.0, 100.0));
    assert_eq!(result.status, LayoutStatus::Full);
    assert_eq!(
      result.occupied.unwrap().rect,
      Rect::from_xywh(10.0, 20.0, 50.0, 30.0)
    );
  }

  #[test]
  fn test_rigid_box_does_not_fit() {
    let mut leaf = RigidBoxRenderer::new(50.0, 130.0);
    let result = layout_in(&mut leaf, Rect::from_xywh(0.0, 0.0, 100.0, 100.0));
    assert_eq!(result.status, LayoutStatus::Nothing);
    assert!(result.occupied.is_none());
    assert!(result.overflow.is_some());
    assert_eq!(result.cause_of_nothing.unwrap().kind, "rigid-box");
  }

  #[test]
  fn test_rigid_box_forced_placement_overrules_overflow() {
    let mut leaf = RigidBoxRenderer::new(50.0, 130.0);
    leaf.properties_mut().forced_placement = true;
    let result = layout_in(&mut leaf, Rect::from_xywh(0.0, 0.0, 100.0, 100.0));
    assert_eq!(result.status, LayoutStatus::Full);
  }

  #[test]
  fn test_line_stack_splits_between_lines() {
    let mut leaf = LineStackRenderer::new(10, 12.0, 80.0);
    let result = layout_in(&mut leaf, Rect::from_xywh(0.0, 0.0, 100.0, 50.0));
    assert_eq!(result.status, LayoutStatus::Partial);
    // 4 lines of 12pt fit in 50pt.
    assert_eq!(result.occupied.unwrap().rect.height(), 48.0);
    let overflow = result.overflow.unwrap();
    assert_eq!(overflow.kind(), "line-stack");
    assert!(overflow.occupied_area().is_none());
  }

  #[test]
  fn test_line_stack_split_partition_is_lossless() {
    let mut leaf = LineStackRenderer::new(10, 12.0, 80.0);
    let result = layout_in(&mut leaf, Rect::from_xywh(0.0, 0.0, 100.0, 50.0));
    let split = result.split.unwrap();
    let mut overflow = result.overflow.unwrap();
    // 4 lines stayed, 6 moved on; line heights account for all 10.
    assert_eq!(split.occupied_area().unwrap().rect.height(), 48.0);
    let result = layout_in(overflow.as_mut(), Rect::from_xywh(0.0, 0.0, 100.0, 1000.0));
    assert_eq!(result.status, LayoutStatus::Full);
    assert_eq!(result.occupied.unwrap().rect.height(), 72.0);
  }

  #[test]
  fn test_line_stack_nothing_when_no_line_fits() {
    let mut leaf = LineStackRenderer::new(10, 12.0, 80.0);
    let result = layout_in(&mut leaf, Rect::from_xywh(0.0, 0.0, 100.0, 5.0));
    assert_eq!(result.status, LayoutStatus::Nothing);
  }

  #[test]
  fn test_line_stack_keep_together_refuses_split() {
    let mut leaf = LineStackRenderer::new(10, 12.0, 80.0);
    leaf.properties_mut().keep_together = true;
    let result = layout_in(&mut leaf, Rect::from_xywh(0.0, 0.0, 100.0, 50.0));
    assert_eq!(result.status, LayoutStatus::Nothing);
  }

  #[test]
  fn test_leaf_min_max_width() {
    let mut leaf = RigidBoxRenderer::new(50.0, 30.0);
    let bounds = leaf.min_max_width(200.0);
    assert_eq!(bounds.min_width(), 50.0);
    assert_eq!(bounds.max_width(), 50.0);
  }
}
