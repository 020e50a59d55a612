//! Douglas–Peucker reduction of freehand point sequences.
//!
//! This runs once on raw input before a contour is built, never inside the
//! simulation loop.

use crate::math::Vec2;

use super::segment::LineSegment;

/// Tolerances below this are treated as "keep everything".
pub const MIN_TOLERANCE: f64 = 0.01;

/// Reduces `points`, keeping only points farther than `epsilon` from the chord
/// of the span they belong to. Both endpoints are always kept.
///
/// Sequences shorter than 4 points and tolerances below [`MIN_TOLERANCE`] are
/// returned unchanged. The reduction uses an explicit stack, so arbitrarily
/// long input cannot overflow the call stack.
pub fn douglas_peucker(points: &[Vec2], epsilon: f64) -> Vec<Vec2> {
    if points.len() < 4 || !(epsilon >= MIN_TOLERANCE) {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut spans = vec![(0usize, last)];
    while let Some((start, end)) = spans.pop() {
        if end <= start + 1 {
            continue;
        }
        let chord = LineSegment::new(points[start], points[end]);

        // First farthest point wins ties so the result is stable under re-reduction.
        let mut farthest = start;
        let mut max_distance = 0.0;
        for (i, &p) in points.iter().enumerate().take(end).skip(start + 1) {
            let d = chord.distance_to_line(p);
            if d > max_distance {
                max_distance = d;
                farthest = i;
            }
        }

        if max_distance > epsilon {
            keep[farthest] = true;
            spans.push((farthest, end));
            spans.push((start, farthest));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(&p, kept)| kept.then_some(p))
        .collect()
}
