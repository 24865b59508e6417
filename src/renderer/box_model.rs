//! Box-model resolution
//!
//! Free functions turning a property bag plus an available rectangle into
//! the inward content rectangle, and back outward once content height is
//! known. The block engine shrinks margins, borders and paddings off the
//! working rectangle before placing children, then grows the occupied
//! rectangle by the same edges in reverse order.
//!
//! When margin collapsing is enabled, vertical margins are not applied
//! here; the margins-collapse handler spends them against the working
//! rectangle instead.

use crate::geometry::{EdgeOffsets, Rect};
use crate::properties::{Position, Properties};

/// Resolves the target width against the parent content width
pub fn resolve_width(props: &Properties, available: f32) -> Option<f32> {
  props.width.map(|w| w.resolve(available))
}

/// Resolves the target height against the parent content height
pub fn resolve_height(props: &Properties, available: f32) -> Option<f32> {
  props.height.map(|h| h.resolve(available))
}

/// The vertical margins this node actually spends through the box model.
///
/// Collapsing nodes spend them through the margins-collapse handler instead.
fn effective_margins(props: &Properties) -> EdgeOffsets {
  let mut m = props.margins;
  if props.collapsing_margins {
    m.top = 0.0;
    m.bottom = 0.0;
  }
  m
}

/// Shrinks a rectangle inward by the given edge widths
pub fn shrink_edges(rect: &mut Rect, edges: EdgeOffsets) {
  rect.origin.x += edges.left;
  rect.origin.y += edges.top;
  rect.size.width -= edges.left + edges.right;
  rect.size.height -= edges.top + edges.bottom;
}

/// Grows a rectangle outward by the given edge widths
pub fn expand_edges(rect: &mut Rect, edges: EdgeOffsets) {
  rect.origin.x -= edges.left;
  rect.origin.y -= edges.top;
  rect.size.width += edges.left + edges.right;
  rect.size.height += edges.top + edges.bottom;
}

/// Applies (or restores) the margin edges, honoring margin collapsing
pub fn apply_margins(props: &Properties, rect: &mut Rect, shrink: bool) {
  let m = effective_margins(props);
  if shrink {
    shrink_edges(rect, m);
  } else {
    expand_edges(rect, m);
  }
}

/// Applies (or restores) the border edges
pub fn apply_borders(props: &Properties, rect: &mut Rect, shrink: bool) {
  if shrink {
    shrink_edges(rect, props.borders);
  } else {
    expand_edges(rect, props.borders);
  }
}

/// Applies (or restores) the padding edges
pub fn apply_paddings(props: &Properties, rect: &mut Rect, shrink: bool) {
  if shrink {
    shrink_edges(rect, props.paddings);
  } else {
    expand_edges(rect, props.paddings);
  }
}

/// Moves an out-of-flow rectangle by its explicit offsets.
///
/// Fixed boxes interpret `x` as an absolute page coordinate; absolute boxes
/// interpret both offsets relative to the containing rectangle. The vertical
/// placement of fixed boxes happens after their content height is known.
pub fn apply_position_offsets(props: &Properties, rect: &mut Rect) {
  match props.position {
    Position::Fixed => {
      if let Some(x) = props.x {
        rect.origin.x = x;
      }
    }
    Position::Absolute => {
      if let Some(x) = props.x {
        rect.origin.x += x;
      }
      if let Some(y) = props.y {
        rect.origin.y += y;
      }
    }
    Position::Static | Position::Relative => {}
  }
}

/// Full inward pass: margins, borders, position offsets, paddings.
///
/// Returns the total horizontal width consumed by the edges, which the
/// intrinsic-width estimator adds on top of the content bounds.
pub fn apply_margins_borders_paddings(props: &Properties, rect: &mut Rect) -> f32 {
  let before = rect.width();
  apply_margins(props, rect, true);
  apply_borders(props, rect, true);
  apply_position_offsets(props, rect);
  apply_paddings(props, rect, true);
  before - rect.width()
}
