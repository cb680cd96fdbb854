//! Ramer-Douglas-Peucker simplification of traced boundary rings.
//!
//! Works on index ranges into the one traced point sequence instead of
//! copying sub-slices, so a ring is simplified with a single output vector
//! and a small stack of pending ranges.

use glam::IVec2;

/// Simplify a traced boundary within `epsilon` pixels
///
/// The result starts with the first point and then lists the end point of
/// every kept segment. For a closed ring, whose last point repeats the first,
/// that repeated point is dropped so the output never contains it twice.
/// An `epsilon` of zero keeps every point.
pub fn simplify_boundary(points: &[IVec2], epsilon: f32) -> Vec<IVec2> {
    if points.is_empty() {
        return Vec::new();
    }

    let mut simplified = vec![points[0]];
    if points.len() > 1 {
        let last = points.len() - 1;
        if epsilon <= 0.0 {
            simplified.extend_from_slice(&points[1..]);
        } else {
            collect_segment_ends(points, 0, last, epsilon, &mut simplified);
        }
    }

    if simplified.len() > 1 && simplified.first() == simplified.last() {
        simplified.pop();
    }
    simplified
}

/// Push the end of every kept segment of `points[first..=last]`, in order
fn collect_segment_ends(
    points: &[IVec2],
    first: usize,
    last: usize,
    epsilon: f32,
    out: &mut Vec<IVec2>,
) {
    // Ranges are popped left to right, so the right half is pushed first
    let mut pending = vec![(first, last)];
    while let Some((start, end)) = pending.pop() {
        match farthest_point(points, start, end) {
            Some((pivot, distance)) if distance > epsilon => {
                pending.push((pivot, end));
                pending.push((start, pivot));
            }
            _ => out.push(points[end]),
        }
    }
}

/// Interior point of `points[start..=end]` farthest from the chord, with its distance
fn farthest_point(points: &[IVec2], start: usize, end: usize) -> Option<(usize, f32)> {
    let a = points[start];
    let b = points[end];

    let mut best: Option<(usize, f32)> = None;
    for (index, point) in points.iter().enumerate().take(end).skip(start + 1) {
        let distance = perpendicular_distance(*point, a, b);
        if best.is_none_or(|(_, max)| distance > max) {
            best = Some((index, distance));
        }
    }
    best
}

/// Distance from `p` to the line through `a` and `b`, or to `a` when they coincide
fn perpendicular_distance(p: IVec2, a: IVec2, b: IVec2) -> f32 {
    let ab = (b - a).as_vec2();
    let ap = (p - a).as_vec2();
    let length = ab.length();
    if length == 0.0 {
        return ap.length();
    }
    ab.perp_dot(ap).abs() / length
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(i32, i32)]) -> Vec<IVec2> {
        points.iter().map(|(x, y)| IVec2::new(*x, *y)).collect()
    }

    /// Clockwise outline of a w x h rectangle, starting and ending at the origin
    fn rectangle_ring(w: i32, h: i32) -> Vec<IVec2> {
        let mut points = Vec::new();
        points.extend((0..w).map(|x| IVec2::new(x, 0)));
        points.extend((0..h).map(|y| IVec2::new(w, y)));
        points.extend((0..w).map(|x| IVec2::new(w - x, h)));
        points.extend((0..h).map(|y| IVec2::new(0, h - y)));
        points.push(IVec2::ZERO);
        points
    }

    #[test]
    fn test_straight_line_collapses_to_endpoints() {
        let line = ring(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
        assert_eq!(simplify_boundary(&line, 1.5), ring(&[(0, 0), (4, 0)]));
    }

    #[test]
    fn test_rectangle_reduces_to_corners() {
        let points = rectangle_ring(10, 6);
        assert_eq!(points.len(), 2 * 10 + 2 * 6 + 1);

        let simplified = simplify_boundary(&points, 1.5);
        assert_eq!(simplified, ring(&[(0, 0), (10, 0), (10, 6), (0, 6)]));
    }

    #[test]
    fn test_small_bump_within_epsilon_is_dropped() {
        let line = ring(&[(0, 0), (4, 0), (5, 1), (6, 0), (10, 0)]);
        assert_eq!(simplify_boundary(&line, 1.5), ring(&[(0, 0), (10, 0)]));
    }

    #[test]
    fn test_large_bump_is_kept() {
        let line = ring(&[(0, 0), (4, 0), (5, 3), (6, 0), (10, 0)]);
        assert_eq!(
            simplify_boundary(&line, 1.5),
            ring(&[(0, 0), (4, 0), (5, 3), (6, 0), (10, 0)])
        );
    }

    #[test]
    fn test_single_pixel_ring_collapses() {
        let points = rectangle_ring(1, 1);
        assert_eq!(simplify_boundary(&points, 1.5), ring(&[(0, 0)]));
    }

    #[test]
    fn test_zero_epsilon_keeps_everything_but_closing_point() {
        let points = rectangle_ring(2, 1);
        let simplified = simplify_boundary(&points, 0.0);
        assert_eq!(simplified.len(), points.len() - 1);
        assert_eq!(&simplified[..], &points[..points.len() - 1]);
    }

    #[test]
    fn test_empty_and_single_point() {
        assert!(simplify_boundary(&[], 1.5).is_empty());
        assert_eq!(simplify_boundary(&[IVec2::ONE], 1.5), vec![IVec2::ONE]);
    }

    #[test]
    fn test_perpendicular_distance() {
        let d = perpendicular_distance(IVec2::new(2, 3), IVec2::ZERO, IVec2::new(5, 0));
        assert_eq!(d, 3.0);

        let degenerate = perpendicular_distance(IVec2::new(3, 4), IVec2::ZERO, IVec2::ZERO);
        assert_eq!(degenerate, 5.0);
    }
}
