//! Ear-clipping triangulation of simple contours.

use crate::math::Vec2;

use super::polygon::signed_area;

/// Index triple into a contour.
pub type Triangle = [usize; 3];

/// Triangulates a simple contour of either winding into `points.len() - 2`
/// triangles that keep the contour's winding.
///
/// Each round clips the ear (a convex corner whose triangle holds no other
/// remaining vertex) with the most positive x coordinate. If no valid ear
/// exists, which only happens for numerically degenerate input, the
/// most-positive-x vertex is clipped regardless so the loop always terminates.
pub fn triangulate(points: &[Vec2]) -> Vec<Triangle> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    let orientation = if signed_area(points) >= 0.0 { 1.0 } else { -1.0 };

    let mut remaining: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);

    while remaining.len() > 3 {
        let m = remaining.len();
        let corner = |k: usize| {
            (
                remaining[(k + m - 1) % m],
                remaining[k],
                remaining[(k + 1) % m],
            )
        };

        let ear = rightmost(
            points,
            &remaining,
            (0..m).filter(|&k| {
                let (prev, cur, next) = corner(k);
                is_ear(points, &remaining, prev, cur, next, orientation)
            }),
        );
        let chosen = ear
            .or_else(|| rightmost(points, &remaining, 0..m))
            .unwrap_or(0);

        let (prev, cur, next) = corner(chosen);
        triangles.push([prev, cur, next]);
        remaining.remove(chosen);
    }

    triangles.push([remaining[0], remaining[1], remaining[2]]);
    triangles
}

/// Position in `remaining` of the candidate with the largest x (first one on ties).
fn rightmost(points: &[Vec2], remaining: &[usize], candidates: impl Iterator<Item = usize>) -> Option<usize> {
    candidates.fold(None, |best: Option<usize>, k| match best {
        Some(b) if points[remaining[b]].x >= points[remaining[k]].x => Some(b),
        _ => Some(k),
    })
}

fn is_ear(points: &[Vec2], remaining: &[usize], prev: usize, cur: usize, next: usize, orientation: f64) -> bool {
    let (a, b, c) = (points[prev], points[cur], points[next]);
    if (b - a).cross(c - b) * orientation <= 0.0 {
        return false;
    }
    !remaining
        .iter()
        .filter(|&&i| i != prev && i != cur && i != next)
        .any(|&i| strictly_inside_triangle(points[i], a, b, c))
}

fn strictly_inside_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = (b - a).cross(p - a);
    let d2 = (c - b).cross(p - b);
    let d3 = (a - c).cross(p - c);
    (d1 > 0.0 && d2 > 0.0 && d3 > 0.0) || (d1 < 0.0 && d2 < 0.0 && d3 < 0.0)
}

/// Sum of the absolute areas of `triangles` over `points`.
pub fn triangles_area(points: &[Vec2], triangles: &[Triangle]) -> f64 {
    triangles
        .iter()
        .map(|&[a, b, c]| ((points[b] - points[a]).cross(points[c] - points[a]) / 2.0).abs())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-9;

    fn regular(n: usize, radius: f64) -> Vec<Vec2> {
        (0..n)
            .map(|i| {
                let a = 2.0 * PI * i as f64 / n as f64;
                Vec2::new(radius * a.cos(), radius * a.sin())
            })
            .collect()
    }

    #[test]
    fn test_triangle_is_single_triangle() {
        let pts = regular(3, 1.0);
        assert_eq!(triangulate(&pts), vec![[0, 1, 2]]);
    }

    #[test]
    fn test_hexagon_yields_four_valid_triangles() {
        let pts = regular(6, 2.0);
        let tris = triangulate(&pts);
        assert_eq!(tris.len(), 4);
        for tri in &tris {
            assert!(tri.iter().all(|&i| i < 6));
            assert!(tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2]);
        }
        assert!((triangles_area(&pts, &tris) - signed_area(&pts).abs()).abs() < EPSILON);
    }

    #[test]
    fn test_first_clip_is_rightmost_vertex() {
        // Square with one vertex pushed far right.
        let pts = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 0.5),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let tris = triangulate(&pts);
        assert_eq!(tris[0], [0, 1, 2]);
    }

    #[test]
    fn test_concave_polygon_covers_area() {
        // Arrow head: the rightmost vertex is convex but its corner triangle
        // swallows the notch vertex, so it must not be clipped first.
        let pts = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 2.0),
            Vec2::new(0.0, 4.0),
            Vec2::new(3.0, 2.0),
        ];
        let tris = triangulate(&pts);
        assert_eq!(tris.len(), 2);
        assert!((triangles_area(&pts, &tris) - signed_area(&pts).abs()).abs() < EPSILON);
    }

    #[test]
    fn test_clockwise_contour() {
        let mut pts = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 0.5),
            Vec2::new(0.0, 1.0),
        ];
        pts.reverse();
        let tris = triangulate(&pts);
        assert_eq!(tris.len(), 3);
        assert!((triangles_area(&pts, &tris) - signed_area(&pts).abs()).abs() < EPSILON);
    }

    #[test]
    fn test_too_few_points() {
        assert!(triangulate(&[Vec2::ZERO, Vec2::new(1.0, 0.0)]).is_empty());
    }
}
