//! Per-body collision proxy: a bounding circle for cheap rejection plus the
//! world-space contour used for exact crossing tests.

use tracing::debug;

use crate::math::{Transform, Vec2};
use crate::shapes::{intersect_segments, point_in_contour, Polygon};
use crate::world::BodyHandle;

use super::contact::Contact;

/// Tolerance when deciding whether a vertex projects onto a contact chord.
const CHORD_SLACK: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    radius: f64,
    transform: Transform,
    /// World-space contour, rewritten in place whenever the body moves.
    world_points: Vec<Vec2>,
}

/// A point where contour A's boundary crosses contour B's.
#[derive(Debug, Clone, Copy)]
struct Crossing {
    point: Vec2,
    /// Index of the edge of contour A the crossing lies on.
    edge: usize,
    /// Parameter along that edge.
    u: f64,
    ingoing: bool,
}

impl Collider {
    pub fn new(polygon: &Polygon, transform: Transform) -> Self {
        let mut collider = Self {
            radius: polygon.bounding_radius(),
            transform,
            world_points: Vec::with_capacity(polygon.len()),
        };
        collider.update(polygon, transform);
        collider
    }

    /// Re-places the contour at `transform`.
    pub fn update(&mut self, polygon: &Polygon, transform: Transform) {
        self.transform = transform;
        self.world_points.clear();
        self.world_points
            .extend(polygon.points().iter().map(|&p| transform.apply(p)));
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn center(&self) -> Vec2 {
        self.transform.position()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn world_points(&self) -> &[Vec2] {
        &self.world_points
    }

    /// Bounding-circle overlap. Never false for intersecting contours.
    pub fn can_contact(&self, other: &Collider) -> bool {
        let reach = self.radius + other.radius;
        self.center().distance_squared(other.center()) <= reach * reach
    }

    pub fn contains(&self, world_point: Vec2) -> bool {
        point_in_contour(world_point, &self.world_points)
    }

    /// Finds the overlap regions between this collider (body A) and `other` (body B).
    ///
    /// Crossings are collected walking A's boundary, so they alternate between
    /// entering and leaving B; each (ingoing, outgoing) couple bounds one region.
    /// An unpaired trailing crossing or a zero-length chord is dropped.
    pub fn find_contacts(&self, body_a: BodyHandle, other: &Collider, body_b: BodyHandle) -> Vec<Contact> {
        let crossings = self.crossings(other);
        if crossings.len() % 2 == 1 {
            debug!(
                ?body_a,
                ?body_b,
                crossings = crossings.len(),
                "odd crossing count, dropping trailing crossing"
            );
        }

        crossings
            .chunks_exact(2)
            .filter_map(|couple| {
                let (entry, exit) = (couple[0], couple[1]);
                debug_assert!(entry.ingoing && !exit.ingoing);
                let contact = self.contact_between(other, entry, exit, body_a, body_b);
                if contact.is_none() {
                    debug!(?body_a, ?body_b, "degenerate contact chord dropped");
                }
                contact
            })
            .collect()
    }

    fn crossings(&self, other: &Collider) -> Vec<Crossing> {
        let a = &self.world_points;
        let b = &other.world_points;
        let (na, nb) = (a.len(), b.len());

        let mut crossings = Vec::new();
        let mut edge_hits: Vec<(f64, Vec2)> = Vec::new();
        for i in 0..na {
            let (a1, a2) = (a[i], a[(i + 1) % na]);
            edge_hits.clear();
            for j in 0..nb {
                // Half-open edges so a crossing through a shared vertex counts once.
                if let Some(hit) = intersect_segments(a1, a2, b[j], b[(j + 1) % nb]) {
                    if hit.u < 1.0 && hit.v < 1.0 {
                        edge_hits.push((hit.u, hit.point));
                    }
                }
            }
            edge_hits.sort_by(|x, y| x.0.total_cmp(&y.0));
            crossings.extend(edge_hits.iter().map(|&(u, point)| Crossing {
                point,
                edge: i,
                u,
                ingoing: false,
            }));
        }

        // Walking from inside B, the first crossing leaves B; its matching entry is the last one.
        if !crossings.is_empty() && other.contains(a[0]) {
            crossings.rotate_left(1);
        }
        for (k, crossing) in crossings.iter_mut().enumerate() {
            crossing.ingoing = k % 2 == 0;
        }
        crossings
    }

    fn contact_between(
        &self,
        other: &Collider,
        entry: Crossing,
        exit: Crossing,
        body_a: BodyHandle,
        body_b: BodyHandle,
    ) -> Option<Contact> {
        let chord = exit.point - entry.point;
        let chord_len = chord.magnitude();
        let tangent = chord.try_normalize()?;
        let raw_normal = tangent.perpendicular();

        // A's vertices walked between entry and exit lie inside B, on B's side of the chord.
        let na = self.world_points.len();
        let wraps = exit.edge == entry.edge && exit.u < entry.u;
        let span = if wraps { na } else { (exit.edge + na - entry.edge) % na };
        let a_inside = (1..=span).map(|k| self.world_points[(entry.edge + k) % na]);

        // B's vertices inside A over this chord lie on A's side.
        let b_inside = other.world_points.iter().copied().filter(|&p| {
            let along = (p - entry.point).dot(tangent);
            (-CHORD_SLACK..=chord_len + CHORD_SLACK).contains(&along) && self.contains(p)
        });

        let mut depth: f64 = 0.0;
        let mut toward_b: Option<bool> = None;
        for p in a_inside {
            depth = depth.max((p - entry.point).dot(raw_normal).abs());
            toward_b.get_or_insert_with(|| is_at_same_side(entry.point, raw_normal, p));
        }
        for p in b_inside {
            depth = depth.max((p - entry.point).dot(raw_normal).abs());
            toward_b.get_or_insert_with(|| !is_at_same_side(entry.point, raw_normal, p));
        }

        let toward_b = toward_b
            .unwrap_or_else(|| (other.center() - self.center()).dot(raw_normal) >= 0.0);
        let normal = if toward_b { raw_normal } else { -raw_normal };

        Some(Contact {
            position: (entry.point + exit.point) * 0.5,
            normal,
            tangent,
            body_a,
            body_b,
            penetration: depth,
        })
    }
}

/// Whether `point` lies on the side of the line through `origin` that `direction` points to.
pub fn is_at_same_side(origin: Vec2, direction: Vec2, point: Vec2) -> bool {
    (point - origin).dot(direction) > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;
    const EPSILON: f64 = 1e-9;

    fn rect(w: f64, h: f64) -> Polygon {
        Polygon::new(vec![
            Vec2::new(-w / 2.0, -h / 2.0),
            Vec2::new(w / 2.0, -h / 2.0),
            Vec2::new(w / 2.0, h / 2.0),
            Vec2::new(-w / 2.0, h / 2.0),
        ])
        .unwrap()
    }

    fn handles() -> (BodyHandle, BodyHandle) {
        let mut keys: SlotMap<BodyHandle, ()> = SlotMap::with_key();
        (keys.insert(()), keys.insert(()))
    }

    #[test]
    fn test_update_moves_world_points() {
        let square = rect(2.0, 2.0);
        let mut collider = Collider::new(&square, Transform::identity());
        collider.update(&square, Transform::new(Vec2::new(10.0, 0.0), 0.0));
        assert!(collider.world_points().iter().all(|p| (p.x - 10.0).abs() <= 1.0 + EPSILON));
        assert_eq!(collider.center(), Vec2::new(10.0, 0.0));
        // Rotation leaves the bounding radius alone.
        collider.update(&square, Transform::new(Vec2::ZERO, 0.7));
        assert!((collider.radius() - 2.0f64.sqrt()).abs() < EPSILON);
    }

    #[test]
    fn test_can_contact() {
        let square = rect(2.0, 2.0);
        let a = Collider::new(&square, Transform::identity());
        let near = Collider::new(&square, Transform::new(Vec2::new(2.5, 0.0), 0.0));
        let far = Collider::new(&square, Transform::new(Vec2::new(3.0, 0.0), 0.0));
        // Circles overlap even though the squares do not touch: a permitted false positive.
        assert!(a.can_contact(&near));
        assert!(!a.can_contact(&far));
    }

    #[test]
    fn test_box_resting_into_floor() {
        let (ha, hb) = handles();
        // Body A: unit box whose bottom sits 0.1 below the floor's top surface at y = 0.
        let boxed = Collider::new(&rect(1.0, 1.0), Transform::new(Vec2::new(0.0, 0.4), 0.0));
        let floor = Collider::new(&rect(10.0, 1.0), Transform::new(Vec2::new(0.0, -0.5), 0.0));

        let contacts = boxed.find_contacts(ha, &floor, hb);
        assert_eq!(contacts.len(), 1);
        let c = contacts[0];
        assert!(c.position.magnitude() < EPSILON);
        // From the box into the floor.
        assert!((c.normal - Vec2::new(0.0, -1.0)).magnitude() < EPSILON);
        assert!((c.tangent.x.abs() - 1.0).abs() < EPSILON);
        assert!((c.penetration - 0.1).abs() < EPSILON);
        assert_eq!((c.body_a, c.body_b), (ha, hb));

        // Swapping roles flips the normal but keeps the region.
        let swapped = floor.find_contacts(hb, &boxed, ha);
        assert_eq!(swapped.len(), 1);
        assert!((swapped[0].normal - Vec2::new(0.0, 1.0)).magnitude() < EPSILON);
        assert!((swapped[0].penetration - 0.1).abs() < EPSILON);
        assert!(swapped[0].position.magnitude() < EPSILON);
    }

    #[test]
    fn test_separate_bodies_have_no_contact() {
        let (ha, hb) = handles();
        let a = Collider::new(&rect(1.0, 1.0), Transform::identity());
        let b = Collider::new(&rect(1.0, 1.0), Transform::new(Vec2::new(1.2, 0.2), 0.0));
        assert!(a.find_contacts(ha, &b, hb).is_empty());
    }

    #[test]
    fn test_side_overlap_normal_points_to_b() {
        let (ha, hb) = handles();
        let a = Collider::new(&rect(1.0, 1.0), Transform::identity());
        let b = Collider::new(&rect(1.0, 1.0), Transform::new(Vec2::new(0.8, 0.1), 0.0));
        let contacts = a.find_contacts(ha, &b, hb);
        assert_eq!(contacts.len(), 1);
        assert!(contacts[0].normal.x > 0.0);
        assert!(contacts[0].penetration > 0.0);
    }

    #[test]
    fn test_comb_yields_multiple_regions() {
        let (ha, hb) = handles();
        // Two-tooth comb pointing down into a floor: each tooth is its own region.
        let comb = Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(3.0, 2.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
        ])
        .unwrap();
        let comb_origin = comb.origin();
        let a = Collider::new(&comb, Transform::new(comb_origin - Vec2::new(0.0, 0.2), 0.0));
        let floor = Collider::new(&rect(10.0, 1.0), Transform::new(Vec2::new(1.5, -0.5), 0.0));
        let contacts = a.find_contacts(ha, &floor, hb);
        assert_eq!(contacts.len(), 2);
        for c in &contacts {
            assert!((c.penetration - 0.2).abs() < 1e-6);
            assert!(c.normal.y < 0.0);
        }
    }

    #[test]
    fn test_is_at_same_side() {
        assert!(is_at_same_side(Vec2::ZERO, Vec2::new(0.0, 1.0), Vec2::new(5.0, 0.1)));
        assert!(!is_at_same_side(Vec2::ZERO, Vec2::new(0.0, 1.0), Vec2::new(5.0, -0.1)));
    }
}
