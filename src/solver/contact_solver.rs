//! Pairwise contact resolution: one normal impulse with friction, then a
//! positional push along the normal. Each call is algebraic; the arbiter
//! repeats them over an island to approximate simultaneous resolution.

use crate::collision::Contact;
use crate::common::ContactResponse;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Corrections below this are not worth moving a body for.
const MIN_CORRECTION: f64 = 1e-9;

/// How penetration correction is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenetrationSettings {
    /// Depth left uncorrected.
    pub slop: f64,
    /// Fraction of the depth beyond `slop` removed per call.
    pub correction: f64,
}

impl Default for PenetrationSettings {
    fn default() -> Self {
        Self {
            slop: 0.01,
            correction: 1.0,
        }
    }
}

/// `mA·mB/(mA+mB)`, or the finite mass when the other body is fixed.
/// `None` when neither body can move.
pub fn reduced_mass(a: &RigidBody, b: &RigidBody) -> Option<f64> {
    let (inv_a, inv_b) = (a.inv_mass(), b.inv_mass());
    let total = inv_a + inv_b;
    if total > 0.0 {
        Some(1.0 / total)
    } else {
        None
    }
}

/// Mass the pair presents to an impulse along `direction` at `point`.
///
/// Adds the rotational terms `(r×d)²/I` of each movable body to the inverse
/// masses, so an impulse through both centroids sees [`reduced_mass`].
/// `None` when neither body can move.
pub fn effective_mass(a: &RigidBody, b: &RigidBody, point: Vec2, direction: Vec2) -> Option<f64> {
    let ra = (point - a.position()).cross(direction);
    let rb = (point - b.position()).cross(direction);
    let inverse = a.inv_mass()
        + b.inv_mass()
        + ra * ra * a.inv_angular_mass()
        + rb * rb * b.inv_angular_mass();
    if inverse > 0.0 {
        Some(1.0 / inverse)
    } else {
        None
    }
}

/// Resolves the approaching velocity of `a` and `b` along the contact normal.
///
/// The velocity of each body at the contact includes the spin term `ω × r`,
/// and both the normal and the friction impulse use the [`effective_mass`]
/// at the contact point. Separating or resting pairs get no impulse.
/// Returns the normal impulse magnitude that was applied.
pub fn solve_velocity(a: &mut RigidBody, b: &mut RigidBody, contact: &Contact) -> f64 {
    if !a.is_dynamic() && !b.is_dynamic() {
        return 0.0;
    }
    let Some(normal_mass) = effective_mass(a, b, contact.position, contact.normal) else {
        return 0.0;
    };

    let relative = a.velocity_at(contact.position) - b.velocity_at(contact.position);
    // Positive when A moves into B.
    let approaching = relative.dot(contact.normal);
    if !(approaching > 0.0) {
        return 0.0;
    }

    let response = ContactResponse::combine(a.material(), b.material());
    let normal_impulse = approaching * (1.0 + response.restitution) * normal_mass;

    let tangential = relative.dot(contact.tangent);
    let friction = match effective_mass(a, b, contact.position, contact.tangent) {
        Some(tangent_mass) => compute_friction(&response, tangent_mass, normal_impulse, tangential, contact.tangent),
        None => Vec2::ZERO,
    };

    let impulse_on_a = contact.normal * -normal_impulse + friction;
    a.apply_impulse(impulse_on_a, contact.position);
    b.apply_impulse(-impulse_on_a, contact.position);
    normal_impulse
}

/// Friction impulse acting on body A for a contact with the given normal impulse.
///
/// `tangential_velocity` is A's velocity relative to B along `tangent`, and
/// `mass` the pair's effective mass along it. When static friction can arrest
/// the slide within this impulse the whole tangential velocity is cancelled.
/// Otherwise dynamic friction opposes it with `μd·|J|`, capped so it never
/// does more than stop the slide.
pub fn compute_friction(
    response: &ContactResponse,
    mass: f64,
    normal_impulse: f64,
    tangential_velocity: f64,
    tangent: Vec2,
) -> Vec2 {
    if tangential_velocity == 0.0 || !(mass > 0.0) {
        return Vec2::ZERO;
    }
    let stopping = tangential_velocity.abs() * mass;
    let arrestable = response.static_friction * normal_impulse / mass;
    if tangential_velocity.abs() < arrestable {
        tangent * (-tangential_velocity * mass)
    } else {
        let sliding = (response.dynamic_friction * normal_impulse.abs()).min(stopping);
        tangent * (-tangential_velocity.signum() * sliding)
    }
}

/// Pushes the bodies apart along the contact normal, each in proportion to
/// its inverse mass, and consumes the corrected depth from the contact.
///
/// The push direction follows the bodies' current relative position rather
/// than the normal's recorded sign, since earlier solves in the same island
/// may have moved them. Returns the distance corrected.
pub fn solve_penetration(
    a: &mut RigidBody,
    b: &mut RigidBody,
    contact: &mut Contact,
    settings: &PenetrationSettings,
) -> f64 {
    let total_inv_mass = a.inv_mass() + b.inv_mass();
    if !(total_inv_mass > 0.0) {
        return 0.0;
    }

    let excess = contact.penetration - settings.slop;
    let amount = excess.max(0.0) * settings.correction;
    if amount < MIN_CORRECTION {
        return 0.0;
    }

    // From A toward B.
    let direction = if (b.position() - a.position()).dot(contact.normal) < 0.0 {
        -contact.normal
    } else {
        contact.normal
    };

    let push = direction * (amount / total_inv_mass);
    a.translate(push * -a.inv_mass());
    b.translate(push * b.inv_mass());
    contact.penetration -= amount;
    amount
}
