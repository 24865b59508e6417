//! Half-plane polygon clipping
//!
//! A single-edge Sutherland–Hodgman step: clip an ordered polygon against the
//! half-plane on the left of a directed line. Used to intersect rotated
//! content outlines with layout boundaries.
//!
//! A vertex counts as inside when the cross product of `(vertex − line_start)`
//! and `(line_end − line_start)` is at least `-GEOMETRY_EPS`; values within
//! the tolerance are treated as lying on the line and kept.

use super::{Point, GEOMETRY_EPS};

/// Which side of the directed clip line a point falls on
fn point_side(p: Point, line_start: Point, line_end: Point) -> i32 {
  let x1 = p.x - line_start.x;
  let y1 = p.y - line_start.y;
  let x2 = line_end.x - line_start.x;
  let y2 = line_end.y - line_start.y;
  let sgn = x1 * y2 - x2 * y1;
  if sgn.abs() < GEOMETRY_EPS {
    0
  } else if sgn > 0.0 {
    1
  } else {
    -1
  }
}

/// Intersection of two infinite lines in the standard two-line determinant
/// form, or `None` when the lines are parallel within tolerance
fn line_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
  let coef_a1 = a1.y - a2.y;
  let coef_a2 = b1.y - b2.y;
  let coef_b1 = a2.x - a1.x;
  let coef_b2 = b2.x - b1.x;
  let coef_c1 = a1.x * a2.y - a1.y * a2.x;
  let coef_c2 = b1.x * b2.y - b1.y * b2.x;

  let m = coef_b1 * coef_a2 - coef_b2 * coef_a1;
  if m.abs() < GEOMETRY_EPS {
    // Parallel segments produce no usable intersection; the caller skips the
    // point rather than faulting.
    return None;
  }
  Some(Point::new(
    (coef_b2 * coef_c1 - coef_b1 * coef_c2) / m,
    (coef_c2 * coef_a1 - coef_c1 * coef_a2) / m,
  ))
}

/// Clips an ordered polygon against the half-plane on the non-negative side
/// of the directed line `line_start → line_end`.
///
/// Walks the vertices in order (wrapping to the first); whenever consecutive
/// vertices straddle the line, the exact intersection point is inserted.
/// Only inside vertices plus inserted intersections are emitted. A polygon
/// entirely on the inside comes back unchanged, one entirely outside comes
/// back empty.
///
/// A zero-length clip line falls back to a horizontal axis through
/// `line_start`.
///
/// # Examples
///
/// ```
/// use pageflow::geometry::{clip_polygon, Point};
///
/// let square = vec![
///   Point::new(0.0, 0.0),
///   Point::new(1.0, 0.0),
///   Point::new(1.0, 1.0),
///   Point::new(0.0, 1.0),
/// ];
/// // Keep the half-plane x >= 0.5 (line directed downward at x = 0.5).
/// let clipped = clip_polygon(&square, Point::new(0.5, 0.0), Point::new(0.5, 1.0));
/// assert_eq!(clipped.len(), 4);
/// ```
pub fn clip_polygon(points: &[Point], line_start: Point, line_end: Point) -> Vec<Point> {
  if points.is_empty() {
    return Vec::new();
  }
  let line_end = if (line_end.x - line_start.x).abs() < GEOMETRY_EPS
    && (line_end.y - line_start.y).abs() < GEOMETRY_EPS
  {
    // Degenerate orientation vector: substitute the default axis.
    Point::new(line_start.x + 1.0, line_start.y)
  } else {
    line_end
  };

  let mut filtered = Vec::with_capacity(points.len() + 2);
  let mut prev_inside = false;
  let first = points[0];
  if point_side(first, line_start, line_end) >= 0 {
    filtered.push(first);
    prev_inside = true;
  }

  let mut prev = first;
  for i in 1..=points.len() {
    let current = points[i % points.len()];
    if point_side(current, line_start, line_end) >= 0 {
      if !prev_inside {
        if let Some(p) = line_intersection(prev, current, line_start, line_end) {
          filtered.push(p);
        }
      }
      if i < points.len() {
        filtered.push(current);
      }
      prev_inside = true;
    } else if prev_inside {
      if let Some(p) = line_intersection(prev, current, line_start, line_end) {
        filtered.push(p);
      }
      prev_inside = false;
    }
    prev = current;
  }

  filtered
}

#[cfg(test)]
mod tests {
  use super::*;

  fn unit_square() -> Vec<Point> {
    vec![
      Point::new(0.0, 0.0),
      Point::new(1.0, 0.0),
      Point::new(1.0, 1.0),
      Point::new(0.0, 1.0),
    ]
  }

  fn assert_near(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-4, "{a} vs {b}");
  }

  #[test]
  fn test_polygon_entirely_inside_unchanged() {
    // Line far to the left of the square, square on its non-negative side.
    let clipped = clip_polygon(&unit_square(), Point::new(-5.0, 0.0), Point::new(-5.0, 1.0));
    assert_eq!(clipped, unit_square());
  }

  #[test]
  fn test_polygon_entirely_outside_empty() {
    let clipped = clip_polygon(&unit_square(), Point::new(5.0, 0.0), Point::new(5.0, 1.0));
    assert!(clipped.is_empty());
  }

  #[test]
  fn test_unit_square_right_half() {
    // Half-plane x >= 0.5: the clip line runs downward along x = 0.5, so the
    // kept side (non-negative cross product) is to its right.
    let clipped = clip_polygon(&unit_square(), Point::new(0.5, 0.0), Point::new(0.5, 1.0));
    assert_eq!(clipped.len(), 4);
    let min_x = clipped.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
    let max_x = clipped.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
    let min_y = clipped.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    let max_y = clipped.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
    assert_near(min_x, 0.5);
    assert_near(max_x, 1.0);
    assert_near(min_y, 0.0);
    assert_near(max_y, 1.0);
  }

  #[test]
  fn test_vertex_on_line_kept() {
    let triangle = vec![
      Point::new(0.0, 0.0),
      Point::new(1.0, 0.0),
      Point::new(0.0, 1.0),
    ];
    // Line passes exactly through (0, 0) and (0, 1).
    let clipped = clip_polygon(&triangle, Point::new(0.0, 0.0), Point::new(0.0, 1.0));
    assert!(clipped.contains(&Point::new(0.0, 0.0)));
  }

  #[test]
  fn test_zero_length_clip_line_uses_default_axis() {
    // Degenerate line at y = 0.5 collapses to a horizontal axis directed
    // toward +x; the kept side is above it.
    let p = Point::new(0.3, 0.5);
    let clipped = clip_polygon(&unit_square(), p, p);
    assert!(!clipped.is_empty());
    for v in &clipped {
      assert!(v.y <= 0.5 + 1e-3);
    }
  }

  #[test]
  fn test_empty_polygon() {
    let clipped = clip_polygon(&[], Point::new(0.0, 0.0), Point::new(1.0, 0.0));
    assert!(clipped.is_empty());
  }
}
