//! Error types for pageflow
//!
//! Content that does not fit is *not* an error: infeasibility travels through
//! [`LayoutStatus`](crate::layout::LayoutStatus) on the layout result and is
//! always caller-recoverable. The variants here are reserved for precondition
//! violations, where the caller invoked an operation in a state the contract
//! forbids.
//!
//! All errors use the `thiserror` crate for minimal boilerplate and proper
//! error trait implementations.

use thiserror::Error;

/// Result type alias for pageflow operations
pub type Result<T> = std::result::Result<T, Error>;

/// Precondition violations surfaced by the engine
///
/// # Examples
///
/// ```
/// use pageflow::{Error, Result};
///
/// fn check() -> Result<()> {
///   Err(Error::DrawBeforeLayout { kind: "block" })
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  /// `draw` was invoked on a renderer that has no occupied area yet.
  ///
  /// Layout must complete successfully before a node can be drawn.
  #[error("draw invoked before layout on a {kind} renderer")]
  DrawBeforeLayout { kind: &'static str },

  /// Rotation bookkeeping (the pre-rotation width/height recorded during
  /// layout) is missing on a rotated renderer.
  ///
  /// This indicates the rotation pass was skipped or the properties were
  /// tampered with between layout and draw. Drawing continues without the
  /// rotation transform after reporting this fault.
  #[error("rotation bookkeeping missing on a {kind} renderer")]
  InconsistentRotation { kind: &'static str },
}
