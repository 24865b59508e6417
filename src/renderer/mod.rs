//! Renderer tree
//!
//! A renderer is a polymorphic tree node speaking the layout/draw contract.
//! Block containers own an ordered list of child renderers; leaves own none.
//! Any implementer of [`Renderer`] can appear as a child, which is what makes
//! heterogeneous trees work: the block engine only ever talks to the trait.
//!
//! Ownership is strictly top-down: each parent exclusively owns its children
//! (`Vec<Box<dyn Renderer>>`). Split and overflow clones copy the property
//! bag and never share mutable state with the original node.

use crate::draw::DrawContext;
use crate::error::Result;
use crate::layout::{LayoutArea, LayoutContext, LayoutResult};
use crate::minmax::{self, MinMaxWidth};
use crate::properties::Properties;

pub mod block;
pub mod box_model;
pub mod leaves;

pub use block::BlockRenderer;
pub use leaves::{LineStackRenderer, RigidBoxRenderer};

/// The layout/draw contract every tree node implements
pub trait Renderer {
  /// Attempts to lay this node out in the supplied context.
  ///
  /// Infeasibility is reported through the result status, never as an error.
  fn layout(&mut self, ctx: &mut LayoutContext<'_>) -> LayoutResult;

  /// Draws this node into the sink; requires a successful prior layout.
  ///
  /// Flushing is a one-way transition; drawing a node twice is a caller
  /// precondition violation and is not defensively checked.
  fn draw(&mut self, ctx: &mut DrawContext<'_>) -> Result<()>;

  /// Translates this node's occupied area and subtree by the given offsets
  fn move_by(&mut self, dx: f32, dy: f32);

  /// The rectangle this node covers after layout, or `None` before layout
  fn occupied_area(&self) -> Option<&LayoutArea>;

  /// The node's property bag
  fn properties(&self) -> &Properties;

  /// Mutable access to the property bag
  fn properties_mut(&mut self) -> &mut Properties;

  /// A short static name for diagnostics ("block", "rigid-box", ...)
  fn kind(&self) -> &'static str;

  /// True once this node has been drawn
  fn is_flushed(&self) -> bool;

  /// Clones this node into a fresh boxed trait object
  fn clone_box(&self) -> Box<dyn Renderer>;

  /// Intrinsic width bounds for the given available width.
  ///
  /// The default is the leaf estimator: probe-layout a clone at the
  /// available width with unbounded height and take the occupied width for
  /// both bounds. Container nodes override this with a structural recursion.
  fn min_max_width(&mut self, available_width: f32) -> MinMaxWidth {
    minmax::default_min_max_width(self.clone_box(), available_width)
  }
}

impl Clone for Box<dyn Renderer> {
  fn clone(&self) -> Self {
    self.clone_box()
  }
}
