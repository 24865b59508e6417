//! Per-node layout configuration
//!
//! Every renderer carries a [`Properties`] bag: a plain cloneable struct of
//! optional typed fields. Split and overflow clones copy the bag wholesale
//! and never share mutable state with the original node.
//!
//! The engine writes a few fields back during layout (the rotation
//! bookkeeping pair); everything else is caller-supplied configuration.

use crate::geometry::EdgeOffsets;

/// A sRGB color with alpha, used by backgrounds and borders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}

impl Color {
  pub const BLACK: Self = Self::rgb(0, 0, 0);
  pub const WHITE: Self = Self::rgb(255, 255, 255);

  /// Fully opaque color from RGB components
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: 255 }
  }
}

/// A length that is either absolute or a percentage of an available length
///
/// # Examples
///
/// ```
/// use pageflow::properties::Dimension;
///
/// assert_eq!(Dimension::Pt(120.0).resolve(400.0), 120.0);
/// assert_eq!(Dimension::Percent(25.0).resolve(400.0), 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
  /// Absolute length in points
  Pt(f32),
  /// Percentage of the available length (0–100 scale)
  Percent(f32),
}

impl Dimension {
  /// Resolves against an available length
  pub fn resolve(self, available: f32) -> f32 {
    match self {
      Dimension::Pt(v) => v,
      Dimension::Percent(p) => available * p / 100.0,
    }
  }
}

/// Positioning scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
  /// Normal flow
  #[default]
  Static,
  /// Normal flow, shifted by (x, y) at draw time
  Relative,
  /// Out of flow, placed against the containing box
  Absolute,
  /// Out of flow, placed against the page
  Fixed,
}

/// Float property values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatMode {
  /// Not floated
  #[default]
  None,
  /// Float to the left edge of the container
  Left,
  /// Float to the right edge of the container
  Right,
}

/// Clear property values: which float sides following content must pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearMode {
  #[default]
  None,
  Left,
  Right,
  Both,
}

/// Horizontal alignment of a child within its container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlignment {
  Left,
  Center,
  Right,
}

/// Vertical alignment of children within a box
///
/// MIDDLE and BOTTOM are derived from the *last* child's occupied area, not
/// a union over all children; see the engine for the regression test pinning
/// this behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlignment {
  Top,
  Middle,
  Bottom,
}

/// The property bag attached to every renderer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Properties {
  /// Target width, resolved against the parent content width
  pub width: Option<Dimension>,
  /// Target height, resolved against the parent content height
  pub height: Option<Dimension>,
  /// Lower bound on the box height
  pub min_height: Option<f32>,
  /// Upper bound on the box height; clips content instead of splitting
  pub max_height: Option<f32>,

  /// Margin widths
  pub margins: EdgeOffsets,
  /// Border widths
  pub borders: EdgeOffsets,
  /// Padding widths
  pub paddings: EdgeOffsets,
  /// Border stroke color; borders with zero widths draw nothing
  pub border_color: Option<Color>,
  /// Background fill color
  pub background: Option<Color>,
  /// Uniform opacity applied around this node's subtree at draw time
  pub opacity: Option<f32>,

  /// Rotation angle in radians, counterclockwise in a y-up frame
  pub rotation_angle: Option<f32>,
  /// Explicit rotation pivot for absolutely positioned boxes
  pub rotation_point_x: Option<f32>,
  pub rotation_point_y: Option<f32>,
  /// Pre-rotation width recorded by the layout pass, read back when drawing
  pub rotation_initial_width: Option<f32>,
  /// Pre-rotation height recorded by the layout pass
  pub rotation_initial_height: Option<f32>,

  /// Float side, or `None` for normal flow
  pub float_mode: FloatMode,
  /// Float sides that must be cleared before this box is placed
  pub clear_mode: ClearMode,

  pub horizontal_alignment: Option<HorizontalAlignment>,
  pub vertical_alignment: Option<VerticalAlignment>,

  /// Positioning scheme
  pub position: Position,
  /// Horizontal offset for positioned boxes
  pub x: Option<f32>,
  /// Vertical offset for positioned boxes
  pub y: Option<f32>,

  /// Accept overflow/clipping instead of reporting infeasibility
  pub forced_placement: bool,
  /// Forbid splitting this box across areas
  pub keep_together: bool,
  /// Collapse adjacent vertical margins through this box.
  ///
  /// Scope-wide: set it on every block of a collapsing subtree. A
  /// non-collapsing block child inside a collapsing parent applies its
  /// vertical margins on top of the handler's collapsed spend.
  pub collapsing_margins: bool,
  /// Claim the full area rect instead of the content bounding union
  pub fill_available_area: bool,
  /// Same as `fill_available_area`, but only when the box splits
  pub fill_available_area_on_split: bool,

  /// Diagnostic tag surfaced in cause-of-nothing records
  pub label: Option<String>,
}

impl Properties {
  /// A fresh bag with every option unset
  pub fn new() -> Self {
    Self::default()
  }

  /// True for absolutely or fixed positioned boxes
  pub fn is_positioned(&self) -> bool {
    matches!(self.position, Position::Absolute | Position::Fixed)
  }

  /// True for fixed positioned boxes
  pub fn is_fixed(&self) -> bool {
    self.position == Position::Fixed
  }

  /// True when this box is removed from normal flow by a float
  pub fn is_floating(&self) -> bool {
    self.float_mode != FloatMode::None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_dimension_resolution() {
    assert_eq!(Dimension::Pt(50.0).resolve(200.0), 50.0);
    assert_eq!(Dimension::Percent(50.0).resolve(200.0), 100.0);
    assert_eq!(Dimension::Percent(0.0).resolve(200.0), 0.0);
  }

  #[test]
  fn test_positioned_predicates() {
    let mut props = Properties::new();
    assert!(!props.is_positioned());
    props.position = Position::Absolute;
    assert!(props.is_positioned());
    assert!(!props.is_fixed());
    props.position = Position::Fixed;
    assert!(props.is_fixed());
  }

  #[test]
  fn test_clone_is_independent() {
    let mut original = Properties::new();
    original.min_height = Some(40.0);
    let mut copy = original.clone();
    copy.min_height = Some(80.0);
    assert_eq!(original.min_height, Some(40.0));
  }
}
