use crate::collision::Collider;
use crate::common::{AngularMassModel, Material};
use crate::error::{PhysicsError, Result};
use crate::math::{Transform, Vec2};
use crate::shapes::Polygon;

/// A polygonal rigid body. Dynamic bodies carry finite mass; fixed bodies
/// behave as if mass and angular mass were infinite.
///
/// The contour and collider travel with the body, so dropping a body drops
/// its collider with it.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    // Geometry
    pub(crate) polygon: Polygon,
    pub(crate) collider: Collider,
    pub(crate) material: Material,

    // Primary state
    pub(crate) position: Vec2, // World position of the centroid
    pub(crate) angle: f64,     // Radians
    pub(crate) velocity: Vec2,
    pub(crate) angular_velocity: f64,

    // Accumulated over a tick, cleared by integration
    pub(crate) force: Vec2,
    pub(crate) moment: f64,

    // Mass properties of the dynamic body; ignored while fixed
    pub(crate) mass: f64,
    pub(crate) angular_mass: f64,
    pub(crate) angular_mass_model: AngularMassModel,

    pub(crate) enabled: bool,
    pub(crate) fixed: bool,
    pub(crate) gravity_responsive: bool,
}

impl RigidBody {
    /// Creates a dynamic body from a contour, placing its centroid at `position`.
    ///
    /// Restitution is clamped to [0, 1] and frictions to >= 0.
    pub fn new(
        polygon: Polygon,
        material: Material,
        position: Vec2,
        angular_mass_model: AngularMassModel,
    ) -> Result<Self> {
        validate_density(material.density)?;
        if !material.is_finite() || !position.is_finite() {
            return Err(PhysicsError::NonFiniteInput);
        }
        let material = material.clamped();
        let transform = Transform::new(position, 0.0);
        let collider = Collider::new(&polygon, transform);
        let (mass, angular_mass) = mass_properties(&polygon, material.density, angular_mass_model);

        Ok(Self {
            polygon,
            collider,
            material,
            position,
            angle: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            moment: 0.0,
            mass,
            angular_mass,
            angular_mass_model,
            enabled: true,
            fixed: false,
            gravity_responsive: true,
        })
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    pub fn force(&self) -> Vec2 {
        self.force
    }

    pub fn moment(&self) -> f64 {
        self.moment
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.angle)
    }

    /// `f64::INFINITY` for fixed bodies.
    pub fn mass(&self) -> f64 {
        if self.fixed {
            f64::INFINITY
        } else {
            self.mass
        }
    }

    /// `f64::INFINITY` for fixed bodies.
    pub fn angular_mass(&self) -> f64 {
        if self.fixed {
            f64::INFINITY
        } else {
            self.angular_mass
        }
    }

    /// 0.0 for fixed bodies.
    pub fn inv_mass(&self) -> f64 {
        if self.fixed {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// 0.0 for fixed bodies.
    pub fn inv_angular_mass(&self) -> f64 {
        if self.fixed || self.angular_mass <= 0.0 {
            0.0
        } else {
            1.0 / self.angular_mass
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_gravity_responsive(&self) -> bool {
        self.gravity_responsive
    }

    /// Whether forces and impulses can move this body right now.
    pub fn is_dynamic(&self) -> bool {
        self.enabled && !self.fixed
    }

    /// Locks or unlocks the body in place. The collider is left as it is.
    pub fn set_fixed(&mut self, fixed: bool) {
        self.fixed = fixed;
        if fixed {
            self.velocity = Vec2::ZERO;
            self.angular_velocity = 0.0;
            self.clear_accumulators();
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_gravity_responsive(&mut self, responsive: bool) {
        self.gravity_responsive = responsive;
    }

    /// Recomputes mass and angular mass from the cached contour.
    pub fn set_density(&mut self, density: f64) -> Result<()> {
        validate_density(density)?;
        self.material.density = density;
        let (mass, angular_mass) = mass_properties(&self.polygon, density, self.angular_mass_model);
        self.mass = mass;
        self.angular_mass = angular_mass;
        Ok(())
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.sync_collider();
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
        self.sync_collider();
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f64) {
        self.angular_velocity = angular_velocity;
    }

    /// Accumulates a force applied at `offset` from the centroid (world orientation).
    pub fn apply_force(&mut self, force: Vec2, offset: Vec2) {
        self.force += force;
        self.moment += offset.cross(force);
    }

    /// Accumulates a force applied at a world-space point.
    pub fn apply_force_at_point(&mut self, force: Vec2, point_world: Vec2) {
        self.apply_force(force, point_world - self.position);
    }

    /// Changes velocity and angular velocity at once for an impulse applied at
    /// a world-space point. No effect on fixed or disabled bodies.
    pub fn apply_impulse(&mut self, impulse: Vec2, point_world: Vec2) {
        if !self.is_dynamic() {
            return;
        }
        let r = point_world - self.position;
        self.velocity += impulse * self.inv_mass();
        self.angular_velocity += r.cross(impulse) * self.inv_angular_mass();
    }

    /// Moves the body without touching its velocity. Used by penetration correction.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
        self.sync_collider();
    }

    /// Velocity of the material point at `point_world`, including spin.
    pub fn velocity_at(&self, point_world: Vec2) -> Vec2 {
        self.velocity + (point_world - self.position).cross_scalar(self.angular_velocity)
    }

    /// Tests a world-space point against the contour.
    pub fn contains_point(&self, point_world: Vec2) -> bool {
        self.polygon.contains(self.transform().apply_inverse(point_world))
    }

    /// Linear momentum; zero for fixed bodies.
    pub fn momentum(&self) -> Vec2 {
        if self.fixed {
            Vec2::ZERO
        } else {
            self.velocity * self.mass
        }
    }

    pub fn kinetic_energy(&self) -> f64 {
        if self.fixed {
            return 0.0;
        }
        0.5 * self.mass * self.velocity.magnitude_squared()
            + 0.5 * self.angular_mass * self.angular_velocity * self.angular_velocity
    }

    /// Should be called after integration in each simulation step.
    pub fn clear_accumulators(&mut self) {
        self.force = Vec2::ZERO;
        self.moment = 0.0;
    }

    /// Re-places the collider's world contour at the current position and angle.
    pub(crate) fn sync_collider(&mut self) {
        self.collider.update(&self.polygon, Transform::new(self.position, self.angle));
    }
}

fn validate_density(density: f64) -> Result<()> {
    if density.is_finite() && density > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidDensity(density))
    }
}

fn mass_properties(polygon: &Polygon, density: f64, model: AngularMassModel) -> (f64, f64) {
    let mass = polygon.area() * density;
    let angular_mass = match model {
        AngularMassModel::BoundingRadius { factor } => {
            let r = polygon.bounding_radius();
            factor * mass * r * r
        }
        AngularMassModel::Exact => polygon.exact_inertia(density),
    };
    (mass, angular_mass)
}
