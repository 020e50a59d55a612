use crate::error::{PhysicsError, Result};
use crate::math::vec2::Vec2;

use super::segment::point_in_contour;
use super::triangulate::{triangulate, triangles_area, Triangle};

/// Contours with a smaller absolute area are rejected as degenerate.
pub const MIN_CONTOUR_AREA: f64 = 1e-9;

/// Signed area of a closed contour (shoelace formula).
/// Positive for counter-clockwise point order.
pub fn signed_area(points: &[Vec2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        area += points[i].cross(points[(i + 1) % n]);
    }
    area / 2.0
}

/// Centroid (center of mass for uniform density) of a closed contour,
/// accumulated over a triangle fan anchored at the first point.
pub fn centroid(points: &[Vec2]) -> Vec2 {
    let n = points.len();
    if n < 3 {
        return Vec2::ZERO;
    }

    let mut centroid = Vec2::ZERO;
    let mut signed_area_sum = 0.0;
    let origin = points[0];

    for i in 1..(n - 1) {
        let v2 = points[i];
        let v3 = points[i + 1];

        let triangle_signed_area = (v2 - origin).cross(v3 - origin) / 2.0;
        signed_area_sum += triangle_signed_area;
        centroid += (origin + v2 + v3) / 3.0 * triangle_signed_area;
    }

    if signed_area_sum.abs() < MIN_CONTOUR_AREA {
        // Collinear points: fall back to the vertex average.
        let mut avg = Vec2::ZERO;
        for v in points {
            avg += *v;
        }
        avg / n as f64
    } else {
        centroid / signed_area_sum
    }
}

/// An immutable polygon contour, stored clockwise and relative to its own centroid.
///
/// The triangulation is computed once here; moving or rotating a body never
/// touches these points.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Vec2>,
    triangles: Vec<Triangle>,
    area: f64,
    bounding_radius: f64,
    /// Where the centroid sat in the coordinates the contour was given in.
    origin: Vec2,
}

impl Polygon {
    /// Builds a contour from raw points in any winding.
    ///
    /// Counter-clockwise input (positive signed area) is reversed so the stored
    /// winding is always clockwise; points are then re-expressed relative to
    /// the centroid.
    pub fn new(mut points: Vec<Vec2>) -> Result<Self> {
        if points.len() < 3 {
            return Err(PhysicsError::TooFewPoints { count: points.len() });
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(PhysicsError::NonFiniteInput);
        }

        let signed = signed_area(&points);
        if !(signed.abs() >= MIN_CONTOUR_AREA) {
            return Err(PhysicsError::DegenerateContour { area: signed.abs() });
        }
        if signed > 0.0 {
            points.reverse();
        }

        let origin = centroid(&points);
        for p in points.iter_mut() {
            *p -= origin;
        }

        let triangles = triangulate(&points);
        let bounding_radius = points.iter().map(|p| p.magnitude()).fold(0.0, f64::max);

        Ok(Self {
            points,
            triangles,
            area: signed.abs(),
            bounding_radius,
            origin,
        })
    }

    /// Centroid-relative contour points, clockwise.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    /// Distance from the centroid to the farthest contour point.
    pub fn bounding_radius(&self) -> f64 {
        self.bounding_radius
    }

    /// Centroid location in the frame of the points passed to [`Polygon::new`].
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Signed area of the stored contour; always negative (clockwise).
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    pub fn triangle_area_sum(&self) -> f64 {
        triangles_area(&self.points, &self.triangles)
    }

    /// Tests a centroid-relative point against the contour.
    pub fn contains(&self, local_point: Vec2) -> bool {
        point_in_contour(local_point, &self.points)
    }

    /// Exact moment of inertia about the centroid for the given density.
    pub fn exact_inertia(&self, density: f64) -> f64 {
        let n = self.points.len();
        let mut inertia_sum = 0.0;
        for i in 0..n {
            let v1 = self.points[i];
            let v2 = self.points[(i + 1) % n];
            let cross_prod = v1.cross(v2);
            inertia_sum += cross_prod * (v1.magnitude_squared() + v1.dot(v2) + v2.magnitude_squared());
        }
        // Clockwise winding makes the sum negative.
        (inertia_sum / 12.0 * density).abs()
    }
}
