//! Layout contracts
//!
//! The types every renderer speaks: the caller supplies a [`LayoutContext`]
//! (target area plus optional margin-collapse state and the shared float
//! obstruction list) and receives a [`LayoutResult`].
//!
//! Infeasibility is communicated exclusively through [`LayoutStatus`]; no
//! error is used for "doesn't fit". A `Partial` result carries split and
//! overflow clones whose child lists are a lossless, order-preserving
//! partition of the original children.

use crate::geometry::Rect;
use crate::renderer::Renderer;

pub mod floats;
pub mod margin_collapse;

pub use margin_collapse::{CollapsedMargin, MarginsCollapseHandler, MarginsCollapseInfo};

/// Sentinel for "unbounded" available height
///
/// Rotated and fixed-position boxes are laid out against this height to
/// avoid premature clipping.
pub const INF: f32 = 1.0e6;

/// Epsilon below which leftover height budgets are ignored
pub const EPS: f32 = 1e-4;

/// Outcome classification of a layout attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStatus {
  /// Everything was placed in the supplied area
  Full,
  /// A prefix was placed; the rest continues in a following area
  Partial,
  /// Not even a prefix could be placed
  Nothing,
}

/// A page (or column) identifier together with its rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutArea {
  /// 1-based page/column number
  pub page: u32,
  /// The rectangle available on that page
  pub rect: Rect,
}

impl LayoutArea {
  pub const fn new(page: u32, rect: Rect) -> Self {
    Self { page, rect }
  }
}

/// Directive for continuing in a different area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaBreak {
  /// Continue in the next candidate area (possibly on the same page)
  NextArea,
  /// Continue on the next page, skipping remaining same-page areas
  NextPage,
}

/// Lightweight diagnostic handle identifying the first descendant that
/// produced a `Nothing` result
///
/// The tree is exclusively owned along parent links, so the result carries a
/// snapshot (node kind plus the optional caller-assigned label) rather than
/// a live reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NothingCause {
  pub kind: &'static str,
  pub label: Option<String>,
}

impl NothingCause {
  /// Snapshot of the given renderer
  pub fn of(renderer: &dyn Renderer) -> Self {
    Self {
      kind: renderer.kind(),
      label: renderer.properties().label.clone(),
    }
  }
}

/// Everything a renderer needs to attempt layout in one area
///
/// `floats` is the float obstruction list shared across the whole pass:
/// floated boxes append to it and flow content is displaced around it.
/// `flow_bottom` is the document's bottom boundary; a float whose finalized
/// box crosses it makes the float's layout fail outright.
pub struct LayoutContext<'a> {
  pub area: LayoutArea,
  pub margins_info: Option<&'a mut MarginsCollapseInfo>,
  pub floats: &'a mut Vec<Rect>,
  pub flow_bottom: Option<f32>,
}

impl<'a> LayoutContext<'a> {
  /// Context with no margin-collapse state and no bottom boundary
  pub fn new(area: LayoutArea, floats: &'a mut Vec<Rect>) -> Self {
    Self {
      area,
      margins_info: None,
      floats,
      flow_bottom: None,
    }
  }
}

/// The outcome of a layout attempt
///
/// Invariants:
/// - `Nothing` carries no occupied area.
/// - `Full` means every child was fully placed.
/// - A `Partial` result's split and overflow children reproduce the original
///   ordered child list exactly when concatenated.
pub struct LayoutResult {
  pub status: LayoutStatus,
  /// The rectangle this node ended up covering; `None` for `Nothing`
  pub occupied: Option<LayoutArea>,
  /// Clone holding the portion of content that fit in the current area
  pub split: Option<Box<dyn Renderer>>,
  /// Clone holding the remaining content for a subsequent area
  pub overflow: Option<Box<dyn Renderer>>,
  /// First descendant that produced `Nothing`, if any child layout failed
  pub cause_of_nothing: Option<NothingCause>,
  /// Break directive propagated from a descendant
  pub area_break: Option<AreaBreak>,
}

impl LayoutResult {
  /// A `Full` result covering `occupied`
  pub fn full(occupied: LayoutArea) -> Self {
    Self {
      status: LayoutStatus::Full,
      occupied: Some(occupied),
      split: None,
      overflow: None,
      cause_of_nothing: None,
      area_break: None,
    }
  }

  /// A `Partial` result with split and overflow parts
  pub fn partial(
    occupied: LayoutArea,
    split: Option<Box<dyn Renderer>>,
    overflow: Box<dyn Renderer>,
  ) -> Self {
    Self {
      status: LayoutStatus::Partial,
      occupied: Some(occupied),
      split,
      overflow: Some(overflow),
      cause_of_nothing: None,
      area_break: None,
    }
  }

  /// A `Nothing` result carrying the content onward and the failure cause
  pub fn nothing(overflow: Option<Box<dyn Renderer>>, cause: NothingCause) -> Self {
    Self {
      status: LayoutStatus::Nothing,
      occupied: None,
      split: None,
      overflow,
      cause_of_nothing: Some(cause),
      area_break: None,
    }
  }

  /// Attaches a cause-of-nothing record
  pub fn with_cause(mut self, cause: Option<NothingCause>) -> Self {
    self.cause_of_nothing = cause;
    self
  }

  /// Attaches an area-break directive
  pub fn with_area_break(mut self, area_break: Option<AreaBreak>) -> Self {
    self.area_break = area_break;
    self
  }
}

impl std::fmt::Debug for LayoutResult {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("LayoutResult")
      .field("status", &self.status)
      .field("occupied", &self.occupied)
      .field("split", &self.split.as_ref().map(|r| r.kind()))
      .field("overflow", &self.overflow.as_ref().map(|r| r.kind()))
      .field("cause_of_nothing", &self.cause_of_nothing)
      .field("area_break", &self.area_break)
      .finish()
  }
}
