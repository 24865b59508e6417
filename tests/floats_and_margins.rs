//! Float displacement and margin collapsing across real renderer trees.

use pageflow::geometry::{EdgeOffsets, Rect};
use pageflow::layout::{LayoutArea, LayoutContext, LayoutStatus};
use pageflow::properties::{ClearMode, Dimension, FloatMode};
use pageflow::renderer::{BlockRenderer, Renderer, RigidBoxRenderer};
use pageflow::LayoutResult;

fn layout_in(renderer: &mut dyn Renderer, rect: Rect) -> LayoutResult {
  let mut floats = Vec::new();
  renderer.layout(&mut LayoutContext::new(LayoutArea::new(1, rect), &mut floats))
}

fn float_block(side: FloatMode, width: f32, height: f32) -> Box<BlockRenderer> {
  let mut block = BlockRenderer::new().child(Box::new(RigidBoxRenderer::new(width, height)));
  block.properties_mut().float_mode = side;
  block.properties_mut().width = Some(Dimension::Pt(width));
  Box::new(block)
}

fn margined_rigid(width: f32, height: f32, top: f32, bottom: f32) -> Box<RigidBoxRenderer> {
  let mut leaf = RigidBoxRenderer::new(width, height);
  leaf.properties_mut().margins = EdgeOffsets::new(top, 0.0, bottom, 0.0);
  Box::new(leaf)
}

#[test]
fn float_leaves_the_flow_position_untouched() {
  let mut root = BlockRenderer::new()
    .child(float_block(FloatMode::Left, 30.0, 80.0))
    .child(Box::new(RigidBoxRenderer::new(100.0, 20.0)));
  let result = layout_in(&mut root, Rect::from_xywh(0.0, 0.0, 200.0, 300.0));
  assert_eq!(result.status, LayoutStatus::Full);
  // The float box reserved its own rectangle.
  assert_eq!(
    root.children()[0].occupied_area().unwrap().rect,
    Rect::from_xywh(0.0, 0.0, 30.0, 80.0)
  );
  // The flow sibling stayed at the top; the float did not advance it.
  assert_eq!(root.children()[1].occupied_area().unwrap().rect.y(), 0.0);
}

#[test]
fn right_float_anchors_to_the_right_edge() {
  let mut root = BlockRenderer::new().child(float_block(FloatMode::Right, 40.0, 60.0));
  layout_in(&mut root, Rect::from_xywh(0.0, 0.0, 200.0, 300.0));
  let rect = root.children()[0].occupied_area().unwrap().rect;
  assert_eq!(rect.max_x(), 200.0);
  assert_eq!(rect.width(), 40.0);
}

#[test]
fn second_float_sits_beside_the_first() {
  let mut root = BlockRenderer::new()
    .child(float_block(FloatMode::Left, 30.0, 80.0))
    .child(float_block(FloatMode::Left, 40.0, 60.0));
  layout_in(&mut root, Rect::from_xywh(0.0, 0.0, 200.0, 300.0));
  let second = root.children()[1].occupied_area().unwrap().rect;
  assert_eq!(second.x(), 30.0);
  assert_eq!(second.y(), 0.0);
  assert_eq!(second.width(), 40.0);
}

#[test]
fn float_wider_than_the_gap_drops_below() {
  let mut root = BlockRenderer::new()
    .child(float_block(FloatMode::Left, 150.0, 80.0))
    .child(float_block(FloatMode::Left, 100.0, 60.0));
  layout_in(&mut root, Rect::from_xywh(0.0, 0.0, 200.0, 300.0));
  let second = root.children()[1].occupied_area().unwrap().rect;
  // Only 50pt remain beside the first float.
  assert_eq!(second.x(), 0.0);
  assert_eq!(second.y(), 80.0);
}

#[test]
fn clear_starts_below_the_cleared_float() {
  let mut cleared = BlockRenderer::new().child(Box::new(RigidBoxRenderer::new(100.0, 10.0)));
  cleared.properties_mut().clear_mode = ClearMode::Left;
  let mut root = BlockRenderer::new()
    .child(float_block(FloatMode::Left, 30.0, 80.0))
    .child(Box::new(cleared));
  let result = layout_in(&mut root, Rect::from_xywh(0.0, 0.0, 200.0, 300.0));
  assert_eq!(root.children()[1].occupied_area().unwrap().rect.y(), 80.0);
  // The skipped band counts toward the parent's extent.
  assert_eq!(result.occupied.unwrap().rect.height(), 90.0);
}

#[test]
fn float_crossing_the_flow_bottom_fails_and_clears_state() {
  let mut float = float_block(FloatMode::Left, 30.0, 150.0);
  let mut floats = Vec::new();
  let mut ctx = LayoutContext::new(
    LayoutArea::new(1, Rect::from_xywh(0.0, 0.0, 200.0, 300.0)),
    &mut floats,
  );
  ctx.flow_bottom = Some(100.0);
  let result = float.layout(&mut ctx);
  assert_eq!(result.status, LayoutStatus::Nothing);
  assert!(result.overflow.is_some());
  assert!(floats.is_empty());
}

#[test]
fn absorbed_floats_stop_obstructing() {
  let mut inner = BlockRenderer::new()
    .child(float_block(FloatMode::Left, 30.0, 40.0))
    .child(Box::new(RigidBoxRenderer::new(100.0, 60.0)));
  inner.properties_mut().min_height = Some(60.0);
  let mut root = BlockRenderer::new()
    .child(Box::new(inner))
    .child(float_block(FloatMode::Left, 50.0, 20.0));
  layout_in(&mut root, Rect::from_xywh(0.0, 0.0, 200.0, 300.0));
  // The first container fully absorbed its float, so the later float
  // starts at the container's bottom edge, not below the stale obstruction.
  let late = root.children()[1].occupied_area().unwrap().rect;
  assert_eq!(late.x(), 0.0);
  assert_eq!(late.y(), 60.0);
}

#[test]
fn sibling_margins_collapse_to_the_larger_one() {
  let mut root = BlockRenderer::new()
    .child(margined_rigid(80.0, 40.0, 20.0, 30.0))
    .child(margined_rigid(80.0, 40.0, 25.0, 0.0));
  root.properties_mut().collapsing_margins = true;
  let result = layout_in(&mut root, Rect::from_xywh(0.0, 0.0, 200.0, 300.0));
  assert_eq!(result.status, LayoutStatus::Full);
  assert_eq!(root.children()[0].occupied_area().unwrap().rect.y(), 20.0);
  // Gap between siblings is max(30, 25), not 55.
  assert_eq!(root.children()[1].occupied_area().unwrap().rect.y(), 90.0);
}

#[test]
fn negative_margin_pulls_the_sibling_up() {
  let mut root = BlockRenderer::new()
    .child(margined_rigid(80.0, 40.0, 0.0, 30.0))
    .child(margined_rigid(80.0, 40.0, -10.0, 0.0));
  root.properties_mut().collapsing_margins = true;
  layout_in(&mut root, Rect::from_xywh(0.0, 0.0, 200.0, 300.0));
  // max positive 30 plus most negative -10.
  assert_eq!(root.children()[1].occupied_area().unwrap().rect.y(), 60.0);
}

#[test]
fn nested_block_margins_collapse_through() {
  let mut inner = BlockRenderer::new().child(margined_rigid(80.0, 40.0, 0.0, 50.0));
  inner.properties_mut().collapsing_margins = true;
  inner.properties_mut().margins = EdgeOffsets::new(20.0, 0.0, 30.0, 0.0);
  let mut root = BlockRenderer::new()
    .child(Box::new(inner))
    .child(margined_rigid(80.0, 40.0, 25.0, 0.0));
  root.properties_mut().collapsing_margins = true;
  layout_in(&mut root, Rect::from_xywh(0.0, 0.0, 200.0, 300.0));
  // The inner block sits below its collapsed top margin and is 40pt tall.
  let inner_rect = root.children()[0].occupied_area().unwrap().rect;
  assert_eq!(inner_rect.y(), 20.0);
  assert_eq!(inner_rect.height(), 40.0);
  // Its grandchild's 50pt trailing margin propagates out and wins over
  // both the inner bottom margin (30) and the sibling top margin (25).
  assert_eq!(root.children()[1].occupied_area().unwrap().rect.y(), 110.0);
}

#[test]
fn collapsing_is_opt_in() {
  let mut root = BlockRenderer::new()
    .child(margined_rigid(80.0, 40.0, 20.0, 30.0))
    .child(margined_rigid(80.0, 40.0, 25.0, 0.0));
  let result = layout_in(&mut root, Rect::from_xywh(0.0, 0.0, 200.0, 300.0));
  assert_eq!(result.status, LayoutStatus::Full);
  // Without collapsing the handler never runs; leaf margins are not
  // consulted and children stack edge to edge.
  assert_eq!(root.children()[1].occupied_area().unwrap().rect.y(), 40.0);
}
