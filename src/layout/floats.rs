//! Float-placement collaborator
//!
//! Floated boxes leave normal flow and anchor to one side of their
//! container; following flow content is displaced around them. The state is
//! a plain list of obstruction rectangles threaded through every layout call
//! (`LayoutContext::floats`):
//!
//! - before a floating box lays out, [`adjust_block_area`] carves its
//!   candidate rectangle out of the space left by existing obstructions,
//! - after it finalizes, [`apply_float`] anchors the box, records the new
//!   obstruction, and hands the flow a zero-height edited area so siblings
//!   flow beside the float,
//! - boxes with a clear property use [`clear_height_correction`] /
//!   [`adjust_for_clear`] to start below the floats of the cleared side,
//! - [`remove_stale`] drops obstructions fully absorbed by a finalized
//!   non-floating ancestor.

use crate::geometry::Rect;
use crate::layout::{LayoutArea, EPS};
use crate::properties::{ClearMode, FloatMode};

/// Obstructions overlapping the horizontal band at `y`
fn band<'a>(floats: &'a [Rect], y: f32) -> impl Iterator<Item = &'a Rect> {
  floats
    .iter()
    .filter(move |f| f.min_y() - EPS <= y && y < f.max_y() - EPS)
}

/// Carves a floating box's candidate rectangle out of the space left by
/// existing obstructions.
///
/// The rectangle keeps its top where a wide-enough gap exists between the
/// obstructions crossing that line; otherwise the top drops below the
/// shallowest obstruction and the search repeats. `extremal_right` is the
/// container's right edge; `block_width` is the explicit width when the box
/// has one.
pub fn adjust_block_area(
  floats: &[Rect],
  rect: &mut Rect,
  extremal_right: f32,
  block_width: Option<f32>,
) {
  if floats.is_empty() {
    return;
  }
  // Each drop passes at least one obstruction bottom, so this terminates.
  for _ in 0..=floats.len() {
    let mut left_bound = rect.min_x();
    let mut right_bound = extremal_right.min(rect.max_x());
    let mut lowest_drop = f32::INFINITY;
    let mut blocked = false;
    for f in band(floats, rect.y()) {
      if f.max_x() <= left_bound + EPS || f.min_x() >= right_bound - EPS {
        continue;
      }
      blocked = true;
      lowest_drop = lowest_drop.min(f.max_y());
      let center = (left_bound + right_bound) / 2.0;
      if (f.min_x() + f.max_x()) / 2.0 <= center {
        left_bound = left_bound.max(f.max_x());
      } else {
        right_bound = right_bound.min(f.min_x());
      }
    }

    if !blocked {
      return;
    }

    let gap = right_bound - left_bound;
    let fits = match block_width {
      Some(w) => gap >= w - EPS,
      None => gap > EPS,
    };
    if fits {
      let bottom = rect.max_y();
      rect.origin.x = left_bound;
      rect.size.width = gap;
      rect.size.height = bottom - rect.y();
      return;
    }

    // No usable gap at this line; drop below the shallowest obstruction.
    let bottom = rect.max_y();
    rect.origin.y = lowest_drop;
    rect.size.height = bottom - lowest_drop;
  }
}

/// How far the top of `rect` must drop to clear the floats of the given side
pub fn clear_height_correction(floats: &[Rect], clear: ClearMode, rect: &Rect) -> f32 {
  if clear == ClearMode::None || floats.is_empty() {
    return 0.0;
  }
  let center_x = (rect.min_x() + rect.max_x()) / 2.0;
  let mut correction: f32 = 0.0;
  for f in floats {
    if f.max_x() <= rect.min_x() + EPS || f.min_x() >= rect.max_x() - EPS {
      continue;
    }
    let float_center = (f.min_x() + f.max_x()) / 2.0;
    let relevant = match clear {
      ClearMode::None => false,
      ClearMode::Both => true,
      ClearMode::Left => float_center <= center_x,
      ClearMode::Right => float_center > center_x,
    };
    if relevant {
      correction = correction.max(f.max_y() - rect.y());
    }
  }
  correction.max(0.0)
}

/// Drops obstructions fully contained in the finalized box of a
/// non-floating node; they can no longer displace anything outside it
pub fn remove_stale(floats: &mut Vec<Rect>, occupied: Rect) {
  floats.retain(|f| !occupied.contains_rect(*f));
}

/// Anchors a finalized floating box to its side, records the obstruction,
/// and returns the edited area the parent flow consumes.
///
/// For floats the edited area has zero height: siblings keep flowing beside
/// the float, displaced only through the obstruction list. Non-floating
/// boxes get their occupied area back unchanged.
pub fn apply_float(
  floats: &mut Vec<Rect>,
  occupied: &mut LayoutArea,
  float_mode: FloatMode,
  children_max_width: f32,
) -> LayoutArea {
  match float_mode {
    FloatMode::None => *occupied,
    FloatMode::Left | FloatMode::Right => {
      if children_max_width > EPS && children_max_width < occupied.rect.width() {
        if float_mode == FloatMode::Right {
          occupied.rect.origin.x = occupied.rect.max_x() - children_max_width;
        }
        occupied.rect.size.width = children_max_width;
      }
      floats.push(occupied.rect);
      LayoutArea::new(
        occupied.page,
        Rect::from_xywh(
          occupied.rect.x(),
          occupied.rect.y(),
          occupied.rect.width(),
          0.0,
        ),
      )
    }
  }
}

/// Extends the edited area upward over the band skipped by a clear property
/// so the parent's occupied union covers it
pub fn adjust_for_clear(correction: f32, edited: &mut LayoutArea, float_mode: FloatMode) {
  if correction > EPS && float_mode == FloatMode::None {
    edited.rect.origin.y -= correction;
    edited.rect.size.height += correction;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_adjust_area_no_floats_unchanged() {
    let mut rect = Rect::from_xywh(0.0, 0.0, 100.0, 200.0);
    adjust_block_area(&[], &mut rect, 100.0, None);
    assert_eq!(rect, Rect::from_xywh(0.0, 0.0, 100.0, 200.0));
  }

  #[test]
  fn test_adjust_area_fits_beside_left_float() {
    let floats = vec![Rect::from_xywh(0.0, 0.0, 40.0, 50.0)];
    let mut rect = Rect::from_xywh(0.0, 0.0, 100.0, 200.0);
    adjust_block_area(&floats, &mut rect, 100.0, Some(30.0));
    assert_eq!(rect.x(), 40.0);
    assert_eq!(rect.width(), 60.0);
    assert_eq!(rect.y(), 0.0);
  }

  #[test]
  fn test_adjust_area_drops_below_wide_float() {
    let floats = vec![Rect::from_xywh(0.0, 0.0, 90.0, 50.0)];
    let mut rect = Rect::from_xywh(0.0, 0.0, 100.0, 200.0);
    adjust_block_area(&floats, &mut rect, 100.0, Some(60.0));
    assert_eq!(rect.y(), 50.0);
    assert_eq!(rect.height(), 150.0);
  }

  #[test]
  fn test_clear_height_correction_sides() {
    let floats = vec![
      Rect::from_xywh(0.0, 0.0, 30.0, 80.0),   // left float
      Rect::from_xywh(70.0, 0.0, 30.0, 40.0),  // right float
    ];
    let rect = Rect::from_xywh(0.0, 0.0, 100.0, 200.0);
    assert_eq!(clear_height_correction(&floats, ClearMode::Left, &rect), 80.0);
    assert_eq!(clear_height_correction(&floats, ClearMode::Right, &rect), 40.0);
    assert_eq!(clear_height_correction(&floats, ClearMode::Both, &rect), 80.0);
    assert_eq!(clear_height_correction(&floats, ClearMode::None, &rect), 0.0);
  }

  #[test]
  fn test_remove_stale() {
    let mut floats = vec![
      Rect::from_xywh(10.0, 10.0, 20.0, 20.0),
      Rect::from_xywh(10.0, 150.0, 20.0, 20.0),
    ];
    remove_stale(&mut floats, Rect::from_xywh(0.0, 0.0, 100.0, 100.0));
    assert_eq!(floats, vec![Rect::from_xywh(10.0, 150.0, 20.0, 20.0)]);
  }

  #[test]
  fn test_apply_float_right_anchors_and_records() {
    let mut floats = Vec::new();
    let mut occupied = LayoutArea::new(1, Rect::from_xywh(0.0, 0.0, 100.0, 50.0));
    let edited = apply_float(&mut floats, &mut occupied, FloatMode::Right, 30.0);
    assert_eq!(occupied.rect, Rect::from_xywh(70.0, 0.0, 30.0, 50.0));
    assert_eq!(floats, vec![occupied.rect]);
    assert_eq!(edited.rect.height(), 0.0);
  }

  #[test]
  fn test_apply_float_none_passthrough() {
    let mut floats = Vec::new();
    let mut occupied = LayoutArea::new(1, Rect::from_xywh(0.0, 0.0, 100.0, 50.0));
    let edited = apply_float(&mut floats, &mut occupied, FloatMode::None, 30.0);
    assert_eq!(edited.rect, occupied.rect);
    assert!(floats.is_empty());
  }

  #[test]
  fn test_adjust_for_clear_extends_flow_area() {
    let mut edited = LayoutArea::new(1, Rect::from_xywh(0.0, 80.0, 100.0, 20.0));
    adjust_for_clear(80.0, &mut edited, FloatMode::None);
    assert_eq!(edited.rect, Rect::from_xywh(0.0, 0.0, 100.0, 100.0));
  }
}
