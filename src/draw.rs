//! Drawing surface abstraction
//!
//! Rendering talks to two trait objects: a [`DrawingSink`] receiving
//! geometry (fills, strokes, paths, text runs, state pushes for transforms
//! and opacity) and an optional [`TagSink`] receiving structure-tree
//! notifications for tagged output. Renderers never hold a concrete backend.
//!
//! [`RecordingSink`] is the in-memory backend used by tests to assert on
//! emission order.

use crate::geometry::{AffineTransform, EdgeOffsets, Point, Rect};
use crate::properties::Color;

/// Target surface for draw output
///
/// `push_state` opens a scope applying a transform and/or an opacity to
/// everything drawn until the matching `pop_state`. Scopes nest.
pub trait DrawingSink {
  fn fill_rect(&mut self, rect: Rect, color: Color);
  fn stroke_rect(&mut self, rect: Rect, color: Color, widths: EdgeOffsets);
  /// Fills the polygon outlined by `points`, closed back to the first point
  fn emit_path(&mut self, points: &[Point], color: Color);
  /// Places a text run with its anchor at `origin`
  fn emit_text_at(&mut self, origin: Point, text: &str);
  fn push_state(&mut self, transform: Option<AffineTransform>, opacity: Option<f32>);
  fn pop_state(&mut self);
}

/// Structure-tree notifications for tagged output
///
/// A renderer opens its tag before emitting content, returns the pointer to
/// the parent afterwards, and disconnects the element once the last fragment
/// of its model element has been flushed.
pub trait TagSink {
  fn add_tag(&mut self, kind: &'static str, label: Option<&str>);
  fn move_to_parent(&mut self);
  fn disconnect_element(&mut self, kind: &'static str, label: Option<&str>);
}

/// Everything a renderer needs to draw itself
pub struct DrawContext<'a> {
  pub sink: &'a mut dyn DrawingSink,
  pub tags: Option<&'a mut dyn TagSink>,
}

impl<'a> DrawContext<'a> {
  /// Context drawing untagged output
  pub fn new(sink: &'a mut dyn DrawingSink) -> Self {
    Self { sink, tags: None }
  }

  /// Context with structure-tree tagging
  pub fn tagged(sink: &'a mut dyn DrawingSink, tags: &'a mut dyn TagSink) -> Self {
    Self {
      sink,
      tags: Some(tags),
    }
  }
}

/// One recorded sink call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
  FillRect {
    rect: Rect,
    color: Color,
  },
  StrokeRect {
    rect: Rect,
    color: Color,
    widths: EdgeOffsets,
  },
  EmitPath {
    points: Vec<Point>,
    color: Color,
  },
  EmitText {
    origin: Point,
    text: String,
  },
  PushState {
    transform: Option<AffineTransform>,
    opacity: Option<f32>,
  },
  PopState,
}

/// In-memory backend recording every call in order
#[derive(Debug, Default)]
pub struct RecordingSink {
  pub commands: Vec<DrawCommand>,
}

impl RecordingSink {
  pub fn new() -> Self {
    Self::default()
  }

  /// Rectangles filled with the given color, in emission order
  pub fn fills_with(&self, color: Color) -> Vec<Rect> {
    self
      .commands
      .iter()
      .filter_map(|c| match c {
        DrawCommand::FillRect { rect, color: c } if *c == color => Some(*rect),
        _ => None,
      })
      .collect()
  }
}

impl DrawingSink for RecordingSink {
  fn fill_rect(&mut self, rect: Rect, color: Color) {
    self.commands.push(DrawCommand::FillRect { rect, color });
  }

  fn stroke_rect(&mut self, rect: Rect, color: Color, widths: EdgeOffsets) {
    self.commands.push(DrawCommand::StrokeRect {
      rect,
      color,
      widths,
    });
  }

  fn emit_path(&mut self, points: &[Point], color: Color) {
    self.commands.push(DrawCommand::EmitPath {
      points: points.to_vec(),
      color,
    });
  }

  fn emit_text_at(&mut self, origin: Point, text: &str) {
    self.commands.push(DrawCommand::EmitText {
      origin,
      text: text.to_owned(),
    });
  }

  fn push_state(&mut self, transform: Option<AffineTransform>, opacity: Option<f32>) {
    self.commands.push(DrawCommand::PushState {
      transform,
      opacity,
    });
  }

  fn pop_state(&mut self) {
    self.commands.push(DrawCommand::PopState);
  }
}

/// One recorded structure-tree event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
  Open {
    kind: &'static str,
    label: Option<String>,
  },
  ToParent,
  Disconnect {
    kind: &'static str,
    label: Option<String>,
  },
}

/// In-memory tag backend for tests
#[derive(Debug, Default)]
pub struct RecordingTagSink {
  pub events: Vec<TagEvent>,
}

impl RecordingTagSink {
  pub fn new() -> Self {
    Self::default()
  }
}

impl TagSink for RecordingTagSink {
  fn add_tag(&mut self, kind: &'static str, label: Option<&str>) {
    self.events.push(TagEvent::Open {
      kind,
      label: label.map(str::to_owned),
    });
  }

  fn move_to_parent(&mut self) {
    self.events.push(TagEvent::ToParent);
  }

  fn disconnect_element(&mut self, kind: &'static str, label: Option<&str>) {
    self.events.push(TagEvent::Disconnect {
      kind,
      label: label.map(str::to_owned),
    });
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_recording_sink_preserves_order() {
    let mut sink = RecordingSink::new();
    sink.push_state(None, Some(0.5));
    sink.fill_rect(Rect::from_xywh(0.0, 0.0, 10.0, 10.0), Color::BLACK);
    sink.pop_state();
    assert_eq!(sink.commands.len(), 3);
    assert!(matches!(sink.commands[0], DrawCommand::PushState { .. }));
    assert!(matches!(sink.commands[2], DrawCommand::PopState));
  }

  #[test]
  fn test_path_and_text_recorded() {
    let mut sink = RecordingSink::new();
    sink.emit_path(&[Point::ZERO, Point::new(10.0, 0.0), Point::new(5.0, 8.0)], Color::BLACK);
    sink.emit_text_at(Point::new(5.0, 12.0), "pg 1");
    assert_eq!(sink.commands.len(), 2);
    assert!(
      matches!(&sink.commands[0], DrawCommand::EmitPath { points, .. } if points.len() == 3)
    );
    assert_eq!(
      sink.commands[1],
      DrawCommand::EmitText {
        origin: Point::new(5.0, 12.0),
        text: "pg 1".to_owned(),
      }
    );
  }

  #[test]
  fn test_fills_with_filters_by_color() {
    let red = Color::rgb(255, 0, 0);
    let mut sink = RecordingSink::new();
    sink.fill_rect(Rect::from_xywh(0.0, 0.0, 10.0, 10.0), red);
    sink.fill_rect(Rect::from_xywh(0.0, 0.0, 5.0, 5.0), Color::BLACK);
    assert_eq!(sink.fills_with(red), vec![Rect::from_xywh(0.0, 0.0, 10.0, 10.0)]);
  }
}
