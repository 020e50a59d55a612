use tracing::warn;

use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Integrates the rigid body's state forward in time using Semi-Implicit Euler.
///
/// Disabled and fixed bodies are left untouched apart from their accumulators.
/// A body whose state stops being finite is rolled back to where it was
/// before this call and stopped.
pub fn integrate(body: &mut RigidBody, dt: f64) {
    if !body.is_dynamic() {
        body.clear_accumulators();
        return;
    }

    let previous_position = body.position;
    let previous_angle = body.angle;

    // v = v + F/m * dt, then p = p + v * dt
    body.velocity += body.force * (body.inv_mass() * dt);
    body.position += body.velocity * dt;

    body.angular_velocity += body.moment * body.inv_angular_mass() * dt;
    body.angle = wrap_angle(body.angle + body.angular_velocity * dt);

    if !is_state_finite(body) {
        warn!(
            position = ?previous_position,
            angle = previous_angle,
            "non-finite body state after integration, resetting velocity"
        );
        body.velocity = Vec2::ZERO;
        body.angular_velocity = 0.0;
        body.position = previous_position;
        body.angle = previous_angle;
    }

    body.clear_accumulators();
    body.sync_collider();
}

fn is_state_finite(body: &RigidBody) -> bool {
    body.velocity.is_finite()
        && body.position.is_finite()
        && body.angular_velocity.is_finite()
        && body.angle.is_finite()
}

/// Wraps an angle in radians to the range [-PI, PI].
pub fn wrap_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}
