//! Margins-collapsing collaborator
//!
//! Adjacent vertical margins between in-flow siblings merge ("collapse")
//! into a single margin rather than accumulating:
//!
//! - **All positive**: maximum of all margins
//! - **All negative**: minimum (most negative) of all margins
//! - **Mixed**: sum of largest positive and most negative
//!
//! The block engine does not apply vertical margins itself when collapsing
//! is enabled; it opens a collapse scope, hands each child to the handler,
//! and the handler spends the collapsed margins against the working
//! rectangle at fixed protocol points.
//!
//! A scope takes over the vertical margins of the in-flow children it
//! positions. Children inside one must either collapse themselves (their
//! box model then skips vertical margins) or be content leaves that apply
//! none; a block child applying its own vertical margins inside a scope
//! would spend them a second time.

use crate::geometry::Rect;

/// A collapsible margin tracking positive and negative components separately
///
/// Storing the largest positive value and the most negative value (as an
/// absolute) means `collapse` is a componentwise max and `resolve` is a
/// subtraction, which covers all three collapse cases above.
///
/// # Examples
///
/// ```
/// use pageflow::layout::CollapsedMargin;
///
/// let a = CollapsedMargin::from_margin(20.0);
/// let b = CollapsedMargin::from_margin(30.0);
/// assert_eq!(a.collapse(b).resolve(), 30.0);
///
/// let c = CollapsedMargin::from_margin(-10.0);
/// assert_eq!(b.collapse(c).resolve(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollapsedMargin {
  /// Largest positive margin value seen (0 when none)
  positive: f32,
  /// Most negative margin value seen, stored as an absolute value
  negative: f32,
}

impl CollapsedMargin {
  /// The zero margin
  pub const ZERO: Self = Self {
    positive: 0.0,
    negative: 0.0,
  };

  /// Wraps a single margin value
  pub fn from_margin(value: f32) -> Self {
    if value >= 0.0 {
      Self {
        positive: value,
        negative: 0.0,
      }
    } else {
      Self {
        positive: 0.0,
        negative: -value,
      }
    }
  }

  /// Collapses with another margin (componentwise max)
  pub fn collapse(self, other: Self) -> Self {
    Self {
      positive: self.positive.max(other.positive),
      negative: self.negative.max(other.negative),
    }
  }

  /// The final margin value: positive − negative
  pub fn resolve(self) -> f32 {
    self.positive - self.negative
  }

  /// True when no margin has been contributed
  pub fn is_zero(self) -> bool {
    self.positive == 0.0 && self.negative == 0.0
  }
}

/// Collapse state handed into a child's layout call
///
/// Carries the margin pending above the child (so the child's own first-child
/// scope can collapse with it) and receives the child's trailing margin back.
#[derive(Debug, Clone, Default)]
pub struct MarginsCollapseInfo {
  /// Margin arriving from the parent scope, already collapsed with the
  /// child's top margin
  pub collapse_before: CollapsedMargin,
  /// The child's trailing margin, reported back after its layout
  pub own_collapse_after: CollapsedMargin,
}

/// Handler owning one node's margin-collapse scope
///
/// Protocol, in order:
/// 1. [`start_margins_collapse`](Self::start_margins_collapse) once the
///    working rectangle is known,
/// 2. per child: [`start_child_margins_handling`](Self::start_child_margins_handling)
///    then [`end_child_margins_handling`](Self::end_child_margins_handling),
/// 3. [`end_margins_collapse`](Self::end_margins_collapse) after the loop.
///
/// [`process_fixed_height_adjustment`](Self::process_fixed_height_adjustment)
/// may be called between 1 and 3 when max-height clips the working rect.
#[derive(Debug, Clone)]
pub struct MarginsCollapseHandler {
  own_top: f32,
  own_bottom: f32,
  /// Margin pending between the previously placed child and the next one
  pending: CollapsedMargin,
  /// True when a parent scope exists; the parent then spends this node's
  /// own margins and this handler only manages the margins between its
  /// children
  nested: bool,
  started: bool,
  fixed_height_delta: f32,
}

impl MarginsCollapseHandler {
  /// A handler for a node with the given own vertical margins; nested
  /// (non-spending) when `parent_info` is present
  pub fn new(own_top: f32, own_bottom: f32, parent_info: Option<&MarginsCollapseInfo>) -> Self {
    Self {
      own_top,
      own_bottom,
      pending: CollapsedMargin::ZERO,
      nested: parent_info.is_some(),
      started: false,
      fixed_height_delta: 0.0,
    }
  }

  /// Opens the scope.
  ///
  /// The root scope spends the node's own top margin against the rect top.
  /// A nested scope spends nothing; its parent already positioned it (the
  /// parent's [`start_child_margins_handling`](Self::start_child_margins_handling)
  /// collapsed this node's top margin with the pending chain).
  pub fn start_margins_collapse(&mut self, rect: &mut Rect) {
    if !self.nested {
      rect.origin.y += self.own_top;
      rect.size.height -= self.own_top;
    }
    self.pending = CollapsedMargin::ZERO;
    self.started = true;
  }

  /// Positions the next child: collapses the pending margin with the
  /// child's top margin and spends the result against the rect top
  ///
  /// Returns the info value to pass into the child's layout call.
  pub fn start_child_margins_handling(
    &mut self,
    child_margin_top: f32,
    child_margin_bottom: f32,
    rect: &mut Rect,
  ) -> MarginsCollapseInfo {
    let collapsed = self
      .pending
      .collapse(CollapsedMargin::from_margin(child_margin_top));
    let offset = collapsed.resolve();
    rect.origin.y += offset;
    rect.size.height -= offset;
    MarginsCollapseInfo {
      collapse_before: collapsed,
      own_collapse_after: CollapsedMargin::from_margin(child_margin_bottom),
    }
  }

  /// Closes the child scope: the child's trailing margin becomes pending
  pub fn end_child_margins_handling(&mut self, info: &MarginsCollapseInfo, _rect: &mut Rect) {
    self.pending = info.own_collapse_after;
  }

  /// Closes the node scope and returns the trailing margin (the last
  /// child's pending margin collapsed with the node's own bottom margin).
  ///
  /// The root scope spends it against the rect bottom. A nested scope
  /// leaves the rect alone; the caller reports the returned margin back to
  /// the parent scope, which spends it before the next sibling.
  pub fn end_margins_collapse(&mut self, rect: &mut Rect) -> CollapsedMargin {
    if !self.started {
      return CollapsedMargin::ZERO;
    }
    let bottom = self
      .pending
      .collapse(CollapsedMargin::from_margin(self.own_bottom));
    if !self.nested {
      rect.size.height -= bottom.resolve();
    }
    self.pending = CollapsedMargin::ZERO;
    self.started = false;
    bottom
  }

  /// The height removed from the working rect by max-height clipping
  pub fn fixed_height_delta(&self) -> f32 {
    self.fixed_height_delta
  }

  /// Records the height removed from the working rect by max-height clipping
  pub fn process_fixed_height_adjustment(&mut self, delta: f32) {
    self.fixed_height_delta += delta;
  }

  /// The margin currently pending between children
  pub fn pending_margin(&self) -> CollapsedMargin {
    self.pending
  }
}
