use crate::math::{Mat2, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub a: Vec2,
    pub b: Vec2,
}

/// A crossing between two directed segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentIntersection {
    pub point: Vec2,
    /// Parameter along the first segment, in `[0, 1]`.
    pub u: f64,
    /// Parameter along the second segment, in `[0, 1]`.
    pub v: f64,
}

impl LineSegment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Calculates the length of the line segment.
    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// Returns the direction vector of the line segment (from a to b).
    pub fn direction(&self) -> Vec2 {
        self.b - self.a
    }

    /// Perpendicular distance from `point` to the infinite line through the segment.
    /// Falls back to the distance to `a` when the segment has zero length.
    pub fn distance_to_line(&self, point: Vec2) -> f64 {
        let dir = self.direction();
        let len = dir.magnitude();
        if len == 0.0 {
            return point.distance(self.a);
        }
        (dir.cross(point - self.a) / len).abs()
    }

    pub fn intersect(&self, other: &LineSegment) -> Option<SegmentIntersection> {
        intersect_segments(self.a, self.b, other.a, other.b)
    }
}

/// Intersects segment `a1 -> a2` with segment `b1 -> b2`.
///
/// Solves `a1 + u·(a2 - a1) = b1 + v·(b2 - b1)` for `(u, v)`; parallel segments
/// (zero determinant) never intersect.
pub fn intersect_segments(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<SegmentIntersection> {
    let d1 = a2 - a1;
    let d2 = b2 - b1;
    let system = Mat2::new(d1, -d2);
    let params = system.inverse()? * (b1 - a1);
    let (u, v) = (params.x, params.y);

    if (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v) {
        Some(SegmentIntersection {
            point: a1 + d1 * u,
            u,
            v,
        })
    } else {
        None
    }
}

/// Even-odd ray test of `point` against a closed contour given in the same frame.
pub fn point_in_contour(point: Vec2, contour: &[Vec2]) -> bool {
    let n = contour.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = contour[i];
        let pj = contour[j];
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = pj.x + (point.y - pj.y) / (pi.y - pj.y) * (pi.x - pj.x);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
