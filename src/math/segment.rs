//! 2D segment intersection on the ground plane.
//!
//! Paths live on the XZ plane; the graph builder only needs to know where two
//! segments cross each other away from their endpoints.

use glam::Vec2;

/// Parametric margin at either end of a segment inside which a crossing is
/// treated as an endpoint touch and ignored.
pub const INTERIOR_MARGIN: f32 = 0.01;

/// Cross products below this magnitude are treated as parallel.
pub const PARALLEL_EPSILON: f32 = 1e-4;

/// Intersection of segments `p1-p2` and `p3-p4`.
///
/// Solves `p1 + t(p2 - p1) = p3 + u(p4 - p3)` and returns the crossing point
/// only when both `t` and `u` lie strictly inside
/// `(INTERIOR_MARGIN, 1 - INTERIOR_MARGIN)`.
pub fn segment_intersection(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let denom = d1.perp_dot(d2);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let offset = p3 - p1;
    let t = offset.perp_dot(d2) / denom;
    let u = offset.perp_dot(d1) / denom;

    let interior = INTERIOR_MARGIN..(1.0 - INTERIOR_MARGIN);
    let inside = |v: f32| v > interior.start && v < interior.end;
    if inside(t) && inside(u) {
        Some(p1 + d1 * t)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossing_segments() {
        let hit = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, -5.0),
            Vec2::new(5.0, 5.0),
        )
        .unwrap();
        assert!((hit - Vec2::new(5.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_parallel_segments() {
        assert!(segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(10.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn test_endpoint_touch_ignored() {
        // T-junction ending exactly on the other segment
        assert!(segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(5.0, 5.0),
        )
        .is_none());
        // Shared endpoint
        assert!(segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 5.0),
        )
        .is_none());
    }

    #[test]
    fn test_disjoint_segments() {
        assert!(segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(5.0, -5.0),
            Vec2::new(5.0, 5.0),
        )
        .is_none());
    }
}
