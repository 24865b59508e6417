//! pageflow: a paginated box-model layout engine
//!
//! Flows a tree of renderers into fixed page or column rectangles. Block
//! containers stack children top to bottom with full box-model resolution
//! (margins, borders, paddings, width/height constraints), collapse adjacent
//! vertical margins, displace flow content around floats, and rotate content
//! while reserving the rotated bounding box in flow. Content that does not
//! fit an area splits into a placed part and an overflow part, which the
//! pagination driver carries to the next page.
//!
//! # Quick start
//!
//! ```
//! use pageflow::geometry::Rect;
//! use pageflow::pagination::paginate;
//! use pageflow::renderer::{BlockRenderer, LineStackRenderer};
//!
//! // 30 lines of text-like content, 10 fit per page.
//! let root = BlockRenderer::new()
//!   .child(Box::new(LineStackRenderer::new(30, 12.0, 100.0)));
//! let pages = paginate(Box::new(root), Rect::from_xywh(0.0, 0.0, 200.0, 120.0));
//! assert_eq!(pages.len(), 3);
//! ```
//!
//! # Coordinate system
//!
//! Top-left origin, y grows downward: a rectangle's `min_y` is its top edge
//! and content flows toward larger y.
//!
//! # Contracts
//!
//! - Layout never errors for "doesn't fit"; that travels through
//!   [`layout::LayoutStatus`].
//! - Split and overflow clones partition the original ordered child list
//!   losslessly.
//! - Layout is deterministic: identical input trees and areas produce
//!   identical results.

pub mod draw;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod minmax;
pub mod pagination;
pub mod properties;
pub mod renderer;

pub use draw::{DrawContext, DrawingSink, RecordingSink};
pub use error::{Error, Result};
pub use layout::{LayoutArea, LayoutContext, LayoutResult, LayoutStatus};
pub use minmax::MinMaxWidth;
pub use properties::Properties;
pub use renderer::{BlockRenderer, LineStackRenderer, Renderer, RigidBoxRenderer};
