//! Block container layout
//!
//! [`BlockRenderer`] stacks its children top to bottom inside the supplied
//! area, applying the full box model, margin collapsing, float displacement,
//! height budgets and rotation. When content does not fit it produces split
//! and overflow clones whose concatenated child lists reproduce the original
//! list exactly, so a driver can resume in the next area without losing or
//! reordering content.
//!
//! Layout walks one candidate area at a time. A child that comes back
//! `Partial` leaves its fitting part in place and pushes its overflow onto
//! the next area; a child that comes back `Nothing` retries wholesale in the
//! next area. When no further area exists the container splits at the
//! current child.

use crate::draw::DrawContext;
use crate::error::{Error, Result};
use crate::geometry::transform::{bounding_box, shift_to_position_bbox_at};
use crate::geometry::{AffineTransform, Point, Rect};
use crate::layout::{
  floats, AreaBreak, LayoutArea, LayoutContext, LayoutResult, LayoutStatus,
  MarginsCollapseHandler, NothingCause, EPS, INF,
};
use crate::minmax::{MaxWidthHandler, MinMaxWidth, WidthHandler, PROBE_EPS};
use crate::properties::{
  Dimension, FloatMode, HorizontalAlignment, Position, Properties, VerticalAlignment,
};
use crate::renderer::{box_model, Renderer};

/// A block-level container renderer
#[derive(Clone)]
pub struct BlockRenderer {
  props: Properties,
  children: Vec<Box<dyn Renderer>>,
  /// Out-of-flow descendants laid out against this box after its own
  /// content height is known
  positioned: Vec<Box<dyn Renderer>>,
  occupied: Option<LayoutArea>,
  flushed: bool,
  /// True on the fragment that finishes its originating model element;
  /// controls structure-tree disconnection at draw time
  is_last_for_model_element: bool,
  /// Extra rectangles content may continue into after the first area
  continuation_areas: Vec<Rect>,
  /// When set, vertical margins collapse through into the parent scope
  /// instead of opening a scope of their own
  keeps_parent_margin_scope: bool,
}

impl BlockRenderer {
  pub fn new() -> Self {
    Self::with_properties(Properties::new())
  }

  pub fn with_properties(props: Properties) -> Self {
    Self {
      props,
      children: Vec::new(),
      positioned: Vec::new(),
      occupied: None,
      flushed: false,
      is_last_for_model_element: true,
      continuation_areas: Vec::new(),
      keeps_parent_margin_scope: false,
    }
  }

  /// Appends a child, routing positioned children to the out-of-flow list
  pub fn add_child(&mut self, child: Box<dyn Renderer>) {
    if child.properties().is_positioned() {
      self.positioned.push(child);
    } else {
      self.children.push(child);
    }
  }

  /// Builder-style [`add_child`](Self::add_child)
  pub fn child(mut self, child: Box<dyn Renderer>) -> Self {
    self.add_child(child);
    self
  }

  /// Supplies rectangles content may continue into within the same layout
  /// pass (column layouts)
  pub fn set_continuation_areas(&mut self, areas: Vec<Rect>) {
    self.continuation_areas = areas;
  }

  pub fn set_keeps_parent_margin_scope(&mut self, keeps: bool) {
    self.keeps_parent_margin_scope = keeps;
  }

  pub fn children(&self) -> &[Box<dyn Renderer>] {
    &self.children
  }

  /// The occupied rectangle with rotation undone: the box content and
  /// decorations were laid out in before the rotated bounding box replaced
  /// its size
  pub fn occupied_bbox(&self) -> Option<Rect> {
    let occupied = self.occupied?;
    let mut rect = occupied.rect;
    if self.props.rotation_angle.is_some() {
      match (
        self.props.rotation_initial_width,
        self.props.rotation_initial_height,
      ) {
        (Some(w), Some(h)) => {
          rect.size.width = w;
          rect.size.height = h;
        }
        _ => log::error!(
          "rotation bookkeeping missing on a {} renderer; using the rotated box",
          self.kind()
        ),
      }
    }
    Some(rect)
  }

  /// Clone carrying the property bag and flags but no children
  fn shell_clone(&self) -> BlockRenderer {
    BlockRenderer {
      props: self.props.clone(),
      children: Vec::new(),
      positioned: Vec::new(),
      occupied: None,
      flushed: false,
      is_last_for_model_element: self.is_last_for_model_element,
      continuation_areas: Vec::new(),
      keeps_parent_margin_scope: self.keeps_parent_margin_scope,
    }
  }

  fn nothing_cause(&self) -> NothingCause {
    NothingCause {
      kind: self.kind(),
      label: self.props.label.clone(),
    }
  }

  /// Places fixed boxes at their explicit vertical offset once the content
  /// height is known
  fn correct_positioned(&mut self, occupied: &mut LayoutArea) {
    if !self.props.is_fixed() {
      return;
    }
    if let Some(y) = self.props.y {
      let dy = y - occupied.rect.y();
      if dy.abs() > EPS {
        occupied.rect.origin.y += dy;
        for child in &mut self.children {
          child.move_by(0.0, dy);
        }
        for child in &mut self.positioned {
          child.move_by(0.0, dy);
        }
      }
    }
  }

  /// Replaces the occupied size with the rotated bounding box and records
  /// the pre-rotation dimensions for drawing.
  ///
  /// Positioned boxes rotate about their explicit pivot (bottom-left corner
  /// by default) and the occupied rectangle follows the rotated box.
  /// In-flow boxes keep their top-left corner anchored so following flow
  /// content reserves the right amount of space.
  fn apply_rotation_layout(&mut self, occupied: &mut LayoutArea) {
    let Some(angle) = self.props.rotation_angle else {
      return;
    };
    let rect = occupied.rect;
    self.props.rotation_initial_width = Some(rect.width());
    self.props.rotation_initial_height = Some(rect.height());
    if self.props.is_positioned() {
      let pivot = Point::new(
        self.props.rotation_point_x.unwrap_or(rect.x()),
        self.props.rotation_point_y.unwrap_or(rect.max_y()),
      );
      let tf = AffineTransform::rotation_about(angle, pivot);
      let bbox = bounding_box(&tf.transform_points(&rect.corners()));
      let (dx, dy) = (bbox.x() - rect.x(), bbox.y() - rect.y());
      occupied.rect = bbox;
      for child in &mut self.children {
        child.move_by(dx, dy);
      }
    } else {
      let pivot = Point::new(rect.x(), rect.max_y());
      let tf = AffineTransform::rotation_about(angle, pivot);
      let bbox = bounding_box(&tf.transform_points(&rect.corners()));
      occupied.rect.size = bbox.size;
    }
  }

  /// Content-to-device transform drawing rotated content inside the
  /// occupied rectangle
  fn rotation_transform(&self) -> Result<AffineTransform> {
    let kind = self.kind();
    let angle = self
      .props
      .rotation_angle
      .ok_or(Error::InconsistentRotation { kind })?;
    if self.props.rotation_initial_width.is_none() || self.props.rotation_initial_height.is_none()
    {
      return Err(Error::InconsistentRotation { kind });
    }
    let occupied = self.occupied.ok_or(Error::DrawBeforeLayout { kind })?;
    let content = self
      .occupied_bbox()
      .ok_or(Error::DrawBeforeLayout { kind })?;
    let tf = AffineTransform::rotation(angle);
    let points = tf.transform_points(&content.corners());
    let (dx, dy) = shift_to_position_bbox_at(
      Point::new(occupied.rect.x(), occupied.rect.y()),
      &points,
    );
    Ok(tf.then(AffineTransform::translation(dx, dy)))
  }

  /// Moves children down when MIDDLE or BOTTOM alignment leaves free space
  /// under the last child.
  ///
  /// The free space is measured from the last child only, not a union over
  /// all children; an absolutely positioned or floated last child can make
  /// earlier flow content hang past the bottom.
  fn apply_vertical_alignment(&mut self) {
    let Some(align) = self.props.vertical_alignment else {
      return;
    };
    if align == VerticalAlignment::Top || self.children.is_empty() {
      return;
    }
    let Some(last_bottom) = self
      .children
      .last()
      .and_then(|c| c.occupied_area())
      .map(|area| area.rect.max_y())
    else {
      return;
    };
    let Some(mut inner) = self.occupied_bbox() else {
      return;
    };
    box_model::apply_margins(&self.props, &mut inner, true);
    box_model::apply_borders(&self.props, &mut inner, true);
    box_model::apply_paddings(&self.props, &mut inner, true);
    let gap = inner.max_y() - last_bottom;
    if gap <= EPS {
      return;
    }
    let dy = match align {
      VerticalAlignment::Bottom => gap,
      VerticalAlignment::Middle => gap / 2.0,
      VerticalAlignment::Top => return,
    };
    for child in &mut self.children {
      child.move_by(0.0, dy);
    }
  }

  /// Min/max width of rotated content, derived from an unrotated probe.
  ///
  /// The probe clone lays out at the unrotated natural width; from its box
  /// `a`×`b` the diagonal bounds the rotated maximum and `√(2ab)` bounds the
  /// minimum (the narrowest square-ish box of equal content area). When the
  /// content cannot reshape below its own minimum width `m`, the minimum is
  /// raised to the diagonal of the `ab/m`×`m` box.
  fn rotation_min_max_width(&self, unrotated: MinMaxWidth) -> MinMaxWidth {
    let mut probe = self.clone();
    probe.props.rotation_angle = None;
    probe.props.rotation_point_x = None;
    probe.props.rotation_point_y = None;
    let mut probe_floats = Vec::new();
    let area = LayoutArea::new(
      1,
      Rect::from_xywh(0.0, 0.0, unrotated.max_width() + PROBE_EPS, INF),
    );
    let result = probe.layout(&mut LayoutContext::new(area, &mut probe_floats));
    let Some(occupied) = result.occupied else {
      return unrotated;
    };
    let a = occupied.rect.width() as f64;
    let b = occupied.rect.height() as f64;
    let product = a * b;
    let m = unrotated.min_width() as f64;
    let mut min_width = (2.0 * product).sqrt();
    if product.sqrt() < m {
      let shelf = product / m;
      min_width = min_width.max((shelf * shelf + m * m).sqrt());
    }
    let max_width = (a * a + b * b).sqrt().max(min_width);
    MinMaxWidth::with_bounds(
      0.0,
      unrotated.available_width,
      min_width as f32,
      max_width as f32,
    )
  }

  fn draw_background(&self, ctx: &mut DrawContext<'_>) {
    let Some(color) = self.props.background else {
      return;
    };
    let Some(mut rect) = self.occupied_bbox() else {
      return;
    };
    box_model::apply_margins(&self.props, &mut rect, true);
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
      return;
    }
    ctx.sink.fill_rect(rect, color);
  }

  fn draw_border(&self, ctx: &mut DrawContext<'_>) {
    let Some(color) = self.props.border_color else {
      return;
    };
    if self.props.borders.is_zero() {
      return;
    }
    let Some(mut rect) = self.occupied_bbox() else {
      return;
    };
    box_model::apply_margins(&self.props, &mut rect, true);
    ctx.sink.stroke_rect(rect, color, self.props.borders);
  }
}

impl Default for BlockRenderer {
  fn default() -> Self {
    Self::new()
  }
}

/// Moves a finalized child right within its container when CENTER or RIGHT
/// alignment leaves free space
fn align_child_horizontally(child: &mut dyn Renderer, container: Rect) {
  let Some(align) = child.properties().horizontal_alignment else {
    return;
  };
  let Some(area) = child.occupied_area() else {
    return;
  };
  let free = container.max_x() - area.rect.max_x();
  let dx = match align {
    HorizontalAlignment::Right => free,
    HorizontalAlignment::Center => free / 2.0,
    HorizontalAlignment::Left => return,
  };
  if dx > EPS {
    child.move_by(dx, 0.0);
  }
}

impl Renderer for BlockRenderer {
  fn layout(&mut self, ctx: &mut LayoutContext<'_>) -> LayoutResult {
    let page = ctx.area.page;
    let is_positioned = self.props.is_positioned();
    let float_mode = self.props.float_mode;
    let mut was_height_clipped = false;

    let mut parent_box = ctx.area.rect;
    // Rotated and fixed boxes measure against unbounded height; their
    // feasibility is decided after the content height is known.
    if self.props.rotation_angle.is_some() || self.props.is_fixed() {
      parent_box.size.height = INF;
    }
    let block_width = box_model::resolve_width(&self.props, parent_box.width());

    let mut children_max_width = 0.0_f32;
    if float_mode != FloatMode::None {
      self.props.horizontal_alignment = Some(match float_mode {
        FloatMode::Right => HorizontalAlignment::Right,
        _ => HorizontalAlignment::Left,
      });
      children_max_width = self.min_max_width(parent_box.width()).children_max_width;
    }
    if let Some(w) = block_width {
      children_max_width = children_max_width.max(w);
    }

    let in_own_scope = !self.keeps_parent_margin_scope;
    let mut margins_handler = if self.props.collapsing_margins {
      Some(MarginsCollapseHandler::new(
        self.props.margins.top,
        self.props.margins.bottom,
        ctx.margins_info.as_deref(),
      ))
    } else {
      None
    };
    if in_own_scope {
      if let Some(handler) = margins_handler.as_mut() {
        handler.start_margins_collapse(&mut parent_box);
      }
    }

    box_model::apply_margins_borders_paddings(&self.props, &mut parent_box);

    // Floats carve against the full-width box, before an explicit width
    // narrows it; the gap search needs to see both edges.
    if float_mode != FloatMode::None {
      let extremal_right = ctx.area.rect.max_x();
      floats::adjust_block_area(ctx.floats, &mut parent_box, extremal_right, block_width);
      children_max_width = children_max_width.min(parent_box.width());
    }

    if let Some(w) = block_width {
      if w < parent_box.width() || is_positioned {
        if float_mode == FloatMode::Right {
          parent_box.origin.x = parent_box.max_x() - w;
        }
        parent_box.size.width = w;
      }
    }

    let block_max_height = self.props.max_height;
    if let Some(max_h) = block_max_height {
      if !self.props.is_fixed() && !self.props.forced_placement && max_h < parent_box.height() {
        if let Some(handler) = margins_handler.as_mut() {
          handler.process_fixed_height_adjustment(parent_box.height() - max_h);
        }
        parent_box.size.height = max_h;
        was_height_clipped = true;
      }
    }

    let clear_correction =
      floats::clear_height_correction(ctx.floats, self.props.clear_mode, &parent_box);
    if clear_correction > EPS && float_mode == FloatMode::None {
      parent_box.origin.y += clear_correction;
      parent_box.size.height -= clear_correction;
    }

    let mut areas = Vec::with_capacity(1 + self.continuation_areas.len());
    areas.push(parent_box);
    if !is_positioned {
      areas.extend(self.continuation_areas.iter().copied());
    }

    let mut current_area = 0usize;
    let mut layout_box = areas[0];
    let mut occupied = LayoutArea::new(
      page,
      Rect::from_xywh(parent_box.x(), parent_box.y(), parent_box.width(), 0.0),
    );
    let mut anything_placed = false;
    let mut cause_of_nothing: Option<NothingCause> = None;

    let mut child_pos = 0usize;
    'placement: while child_pos < self.children.len() {
      let child_margins = self.children[child_pos].properties().margins;
      let child_is_floating = self.children[child_pos].properties().is_floating();
      let mut child_info = match margins_handler.as_mut() {
        Some(handler) if !child_is_floating => Some(handler.start_child_margins_handling(
          child_margins.top,
          child_margins.bottom,
          &mut layout_box,
        )),
        _ => None,
      };

      let mut result = {
        let mut child_ctx = LayoutContext {
          area: LayoutArea::new(page, layout_box),
          margins_info: child_info.as_mut(),
          floats: &mut *ctx.floats,
          flow_bottom: ctx.flow_bottom,
        };
        self.children[child_pos].layout(&mut child_ctx)
      };

      if result.status == LayoutStatus::Full {
        anything_placed = true;
        if let Some(handler) = margins_handler.as_mut() {
          if let Some(info) = child_info.as_ref() {
            handler.end_child_margins_handling(info, &mut layout_box);
          }
        }
        if let Some(area) = result.occupied.as_ref() {
          let old_bottom = layout_box.max_y();
          let new_top = area.rect.max_y().clamp(layout_box.y(), old_bottom);
          layout_box.origin.y = new_top;
          layout_box.size.height = old_bottom - new_top;
          occupied.rect = occupied.rect.union(area.rect);
        }
        align_child_horizontally(self.children[child_pos].as_mut(), parent_box);
        if cause_of_nothing.is_none() {
          cause_of_nothing = result.cause_of_nothing.take();
        }
        child_pos += 1;
        continue 'placement;
      }

      // The child did not finish in this area.
      if let Some(handler) = margins_handler.as_mut() {
        if result.status == LayoutStatus::Partial {
          if let Some(info) = child_info.as_ref() {
            handler.end_child_margins_handling(info, &mut layout_box);
          }
        }
      }
      if cause_of_nothing.is_none() {
        cause_of_nothing = result.cause_of_nothing.take();
      }

      let can_advance =
        current_area + 1 < areas.len() && result.area_break != Some(AreaBreak::NextPage);
      if can_advance {
        match result.status {
          LayoutStatus::Partial => {
            if let Some(area) = result.occupied.as_ref() {
              occupied.rect = occupied.rect.union(area.rect);
            }
            anything_placed = true;
            if let Some(mut split) = result.split {
              align_child_horizontally(split.as_mut(), parent_box);
              self.children[child_pos] = split;
              child_pos += 1;
            } else {
              self.children.remove(child_pos);
            }
            if let Some(overflow) = result.overflow {
              self.children.insert(child_pos, overflow);
            }
          }
          LayoutStatus::Nothing => match result.overflow {
            Some(overflow) => self.children[child_pos] = overflow,
            None => {
              self.children.remove(child_pos);
            }
          },
          LayoutStatus::Full => unreachable!(),
        }
        current_area += 1;
        layout_box = areas[current_area];
        continue 'placement;
      }

      // No further candidate area: split the container here.
      if in_own_scope {
        if let Some(handler) = margins_handler.as_mut() {
          handler.end_margins_collapse(&mut layout_box);
        }
      }
      if self.props.fill_available_area || self.props.fill_available_area_on_split {
        occupied.rect = occupied.rect.union(layout_box);
      } else if result.status == LayoutStatus::Partial {
        if let Some(area) = result.occupied.as_ref() {
          occupied.rect = occupied.rect.union(area.rect);
        }
      }
      if result.status == LayoutStatus::Partial {
        anything_placed = true;
      }

      let keep_together = self.props.keep_together;
      let status = if anything_placed && !keep_together {
        LayoutStatus::Partial
      } else {
        LayoutStatus::Nothing
      };

      let mut split = self.shell_clone();
      split.is_last_for_model_element = false;
      let mut overflow = self.shell_clone();
      overflow.props.forced_placement = false;
      if keep_together {
        // The box moves to the next area in one piece.
        overflow.children = self.children.clone();
      } else {
        for child in &self.children[..child_pos] {
          split.children.push(child.clone());
        }
        if let Some(mut child_split) = result.split {
          align_child_horizontally(child_split.as_mut(), parent_box);
          split.children.push(child_split);
        }
        if let Some(child_overflow) = result.overflow {
          overflow.children.push(child_overflow);
        }
        for child in &self.children[child_pos + 1..] {
          overflow.children.push(child.clone());
        }
      }
      if self.props.position == Position::Relative && !self.positioned.is_empty() {
        split.positioned = self.positioned.clone();
        overflow.positioned = self.positioned.clone();
      }

      if was_height_clipped {
        if let Some(max_h) = block_max_height {
          occupied.rect.size.height = max_h;
        }
      }
      // Height budgets spent by this fragment carry over reduced.
      let consumed = occupied.rect.height();
      if let Some(max_h) = self.props.max_height {
        overflow.props.max_height = Some(max_h - consumed);
      }
      if let Some(min_h) = self.props.min_height {
        overflow.props.min_height = Some(min_h - consumed);
      }
      if let Some(h) = box_model::resolve_height(&self.props, ctx.area.rect.height()) {
        overflow.props.height = Some(Dimension::Pt((h - consumed).max(0.0)));
      }

      box_model::apply_paddings(&self.props, &mut occupied.rect, false);
      box_model::apply_borders(&self.props, &mut occupied.rect, false);
      box_model::apply_margins(&self.props, &mut occupied.rect, false);

      split.occupied = Some(occupied);
      self.occupied = Some(occupied);

      // Clipping always resolves to FULL. Forced placement rescues only a
      // box that placed nothing at all; a partial placement keeps its
      // overflow so splittable content continues in the next area.
      if was_height_clipped || (status == LayoutStatus::Nothing && self.props.forced_placement) {
        if was_height_clipped {
          log::warn!("content does not fit the height budget and was clipped");
        } else {
          log::warn!("forced placement dropped content that did not fit");
        }
        return LayoutResult {
          status: LayoutStatus::Full,
          occupied: Some(occupied),
          split: Some(Box::new(split)),
          overflow: None,
          cause_of_nothing: None,
          area_break: result.area_break,
        };
      }

      return match status {
        LayoutStatus::Partial => {
          LayoutResult::partial(occupied, Some(Box::new(split)), Box::new(overflow))
            .with_cause(cause_of_nothing)
            .with_area_break(result.area_break)
        }
        _ => LayoutResult {
          status: LayoutStatus::Nothing,
          occupied: None,
          split: None,
          overflow: Some(Box::new(overflow)),
          cause_of_nothing: cause_of_nothing.or_else(|| Some(self.nothing_cause())),
          area_break: result.area_break,
        },
      };
    }

    // All children placed in full.
    if in_own_scope {
      if let Some(handler) = margins_handler.as_mut() {
        let trailing = handler.end_margins_collapse(&mut layout_box);
        // A nested scope reports its trailing margin back to the parent,
        // which spends it before the next sibling.
        if let Some(info) = ctx.margins_info.as_deref_mut() {
          info.own_collapse_after = trailing;
        }
      }
    }
    if self.props.fill_available_area {
      occupied.rect = occupied.rect.union(layout_box);
    }

    let mut overflow_part: Option<BlockRenderer> = None;
    if !self.props.forced_placement {
      if let Some(min_h) = self.props.min_height {
        if min_h > occupied.rect.height() + EPS {
          if self.props.is_fixed() {
            occupied.rect.size.height = min_h;
          } else {
            // Grow toward the area bottom; anything past it becomes a
            // content-free overflow fragment.
            let grow = min_h - occupied.rect.height();
            let new_bottom = (occupied.rect.max_y() + grow).min(layout_box.max_y());
            let applied = (new_bottom - occupied.rect.max_y()).max(0.0);
            occupied.rect.size.height += applied;
            let remaining = min_h - occupied.rect.height();
            if remaining > EPS {
              if self.props.keep_together {
                return LayoutResult::nothing(Some(self.clone_box()), self.nothing_cause());
              }
              let mut overflow = self.shell_clone();
              overflow.props.forced_placement = false;
              overflow.props.min_height = Some(remaining);
              if let Some(h) = box_model::resolve_height(&self.props, ctx.area.rect.height()) {
                overflow.props.height =
                  Some(Dimension::Pt((h - occupied.rect.height()).max(0.0)));
              }
              overflow_part = Some(overflow);
            }
          }
        }
      }
    }

    if is_positioned {
      self.correct_positioned(&mut occupied);
    }

    let initial_width = occupied.rect.width();
    box_model::apply_paddings(&self.props, &mut occupied.rect, false);
    box_model::apply_borders(&self.props, &mut occupied.rect, false);

    if !self.positioned.is_empty() {
      // Positioned children resolve against the padding box.
      let mut host = occupied.rect;
      box_model::apply_borders(&self.props, &mut host, true);
      for child in &mut self.positioned {
        let mut child_floats = Vec::new();
        let area = LayoutArea::new(page, host);
        child.layout(&mut LayoutContext::new(area, &mut child_floats));
      }
    }

    box_model::apply_margins(&self.props, &mut occupied.rect, false);
    if children_max_width > EPS {
      children_max_width += occupied.rect.width() - initial_width;
    }

    if self.props.rotation_angle.is_some() {
      self.apply_rotation_layout(&mut occupied);
      if !self.props.forced_placement && !ctx.area.rect.contains_rect(occupied.rect) {
        return LayoutResult::nothing(Some(self.clone_box()), self.nothing_cause());
      }
    }

    self.occupied = Some(occupied);
    self.apply_vertical_alignment();

    floats::remove_stale(ctx.floats, occupied.rect);
    let mut edited = floats::apply_float(
      ctx.floats,
      self.occupied.as_mut().unwrap(),
      float_mode,
      children_max_width,
    );

    if float_mode != FloatMode::None {
      if let Some(bottom) = ctx.flow_bottom {
        if self.occupied.as_ref().unwrap().rect.max_y() > bottom + EPS {
          ctx.floats.clear();
          return LayoutResult::nothing(Some(self.clone_box()), self.nothing_cause());
        }
      }
    }

    floats::adjust_for_clear(clear_correction, &mut edited, float_mode);

    match overflow_part {
      None => LayoutResult::full(edited).with_cause(cause_of_nothing),
      Some(overflow) => {
        LayoutResult::partial(edited, Some(self.clone_box()), Box::new(overflow))
          .with_cause(cause_of_nothing)
      }
    }
  }

  fn draw(&mut self, ctx: &mut DrawContext<'_>) -> Result<()> {
    if self.occupied.is_none() {
      log::error!("draw called before layout on a {} renderer", self.kind());
      return Err(Error::DrawBeforeLayout { kind: self.kind() });
    }
    if let Some(tags) = ctx.tags.as_deref_mut() {
      tags.add_tag(self.kind(), self.props.label.as_deref());
    }

    let relative = self.props.position == Position::Relative;
    let (rel_dx, rel_dy) = if relative {
      (self.props.x.unwrap_or(0.0), self.props.y.unwrap_or(0.0))
    } else {
      (0.0, 0.0)
    };
    if relative {
      self.move_by(rel_dx, rel_dy);
    }

    let transform = if self.props.rotation_angle.is_some() {
      match self.rotation_transform() {
        Ok(tf) => Some(tf),
        Err(err) => {
          // Degraded continuation: the box draws unrotated.
          log::error!("drawing without rotation: {err}");
          None
        }
      }
    } else {
      None
    };
    let opacity = self.props.opacity.filter(|o| *o < 1.0);
    let scoped = transform.is_some() || opacity.is_some();
    if scoped {
      ctx.sink.push_state(transform, opacity);
    }

    self.draw_background(ctx);
    self.draw_border(ctx);
    for child in &mut self.children {
      if let Err(err) = child.draw(ctx) {
        log::error!("skipping a child that failed to draw: {err}");
      }
    }
    for child in &mut self.positioned {
      if let Err(err) = child.draw(ctx) {
        log::error!("skipping a positioned child that failed to draw: {err}");
      }
    }

    if scoped {
      ctx.sink.pop_state();
    }
    if relative {
      self.move_by(-rel_dx, -rel_dy);
    }

    if let Some(tags) = ctx.tags.as_deref_mut() {
      tags.move_to_parent();
      if self.is_last_for_model_element {
        tags.disconnect_element(self.kind(), self.props.label.as_deref());
      }
    }
    self.flushed = true;
    Ok(())
  }

  fn move_by(&mut self, dx: f32, dy: f32) {
    if let Some(occupied) = self.occupied.as_mut() {
      occupied.rect = occupied.rect.translate(dx, dy);
    }
    for child in &mut self.children {
      child.move_by(dx, dy);
    }
    for child in &mut self.positioned {
      child.move_by(dx, dy);
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
    "block"
  }

  fn is_flushed(&self) -> bool {
    self.flushed
  }

  fn clone_box(&self) -> Box<dyn Renderer> {
    Box::new(self.clone())
  }

  fn min_max_width(&mut self, available_width: f32) -> MinMaxWidth {
    let mut area = Rect::from_xywh(0.0, 0.0, available_width, INF);
    let additional = box_model::apply_margins_borders_paddings(&self.props, &mut area);
    let mut minmax = MinMaxWidth::new(additional, available_width);
    {
      let child_available = area.width();
      let mut handler = MaxWidthHandler::new(&mut minmax);
      for child in &mut self.children {
        let child_bounds = child.min_max_width(child_available);
        handler.update_min_child_width(child_bounds.min_width());
        handler.update_max_child_width(child_bounds.max_width());
      }
    }
    // An explicit absolute width pins both bounds, as long as it does not
    // undercut what the children require.
    if let Some(Dimension::Pt(w)) = self.props.width {
      if w >= 0.0 && w >= minmax.children_min_width {
        minmax.children_min_width = w;
        minmax.children_max_width = w;
      }
    }
    if self.props.rotation_angle.is_some() {
      return self.rotation_min_max_width(minmax);
    }
    minmax
  }
}
