//! The public face of the engine: owns bodies, their colliders and the
//! arbiter, and runs ticks.

use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::{SecondaryMap, SlotMap};
use tracing::{debug, trace, warn};

use crate::collision::Contact;
use crate::common::{Material, SceneConfig};
use crate::error::{PhysicsError, Result};
use crate::integration::integrate;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;
use crate::shapes::{douglas_peucker, Polygon};
use crate::solver::PenetrationSettings;

use super::arbiter::Arbiter;
use super::gravity::GravitySource;
use super::BodyHandle;

/// Magnitude of the gravity a new scene starts with, pointing against `up`.
pub const STANDARD_GRAVITY: f64 = 9.81;

type MovementListener = Box<dyn FnMut(Vec2, f64)>;

/// Everything needed to re-create a body: its centroid-relative contour,
/// material and kinematic state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub contour: Vec<Vec2>,
    pub material: Material,
    pub position: Vec2,
    pub angle: f64,
    pub velocity: Vec2,
    pub angular_velocity: f64,
    pub fixed: bool,
}

/// A 2D world of polygonal rigid bodies.
///
/// Removing a body drops its collider registration and its movement listener
/// in the same call. Every mutating method takes `&mut self`, so nothing can
/// reach into the scene while [`Scene::step`] is running; listeners only
/// receive copies of the new position and angle.
pub struct Scene {
    config: SceneConfig,
    bodies: SlotMap<BodyHandle, RigidBody>,
    arbiter: Arbiter,
    listeners: SecondaryMap<BodyHandle, MovementListener>,
    gravity: Box<dyn GravitySource>,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        let penetration = PenetrationSettings {
            slop: config.penetration_slop,
            correction: config.penetration_correction,
        };
        Self {
            config,
            bodies: SlotMap::with_key(),
            arbiter: Arbiter::new(config.up, penetration),
            listeners: SecondaryMap::new(),
            gravity: Box::new(-config.up * STANDARD_GRAVITY),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Creates a dynamic body from a world-space contour in either winding.
    ///
    /// The body's position is the contour's centroid, so it appears exactly
    /// where its points were given. When the scene has a simplify tolerance
    /// the contour is reduced first.
    pub fn create_polygon_body(&mut self, points: Vec<Vec2>, material: Material) -> Result<BodyHandle> {
        let points = match self.config.simplify_tolerance {
            Some(epsilon) => douglas_peucker(&points, epsilon),
            None => points,
        };
        let polygon = Polygon::new(points)?;
        let position = polygon.origin();
        self.insert_body(polygon, material, position)
    }

    /// [`Scene::create_polygon_body`] with the scene's default material.
    pub fn create_default_body(&mut self, points: Vec<Vec2>) -> Result<BodyHandle> {
        let material = self.config.default_material;
        self.create_polygon_body(points, material)
    }

    fn insert_body(&mut self, polygon: Polygon, material: Material, position: Vec2) -> Result<BodyHandle> {
        let body = RigidBody::new(polygon, material, position, self.config.angular_mass)?;
        let (points, mass) = (body.polygon().len(), body.mass());
        let handle = self.bodies.insert(body);
        self.arbiter.register(handle);
        debug!(?handle, points, mass, "body created");
        Ok(handle)
    }

    /// Removes a body together with its collider and listener.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<RigidBody> {
        let body = self.bodies.remove(handle).ok_or(PhysicsError::UnknownBody(handle))?;
        self.arbiter.unregister(handle);
        self.listeners.remove(handle);
        debug!(?handle, "body removed");
        Ok(body)
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains_key(handle)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> + '_ {
        self.bodies.iter()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Contacts solved during the last tick, for debug drawing.
    pub fn last_contacts(&self) -> &[Contact] {
        self.arbiter.contacts()
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody> {
        self.bodies.get_mut(handle).ok_or(PhysicsError::UnknownBody(handle))
    }

    pub fn set_body_fixed(&mut self, handle: BodyHandle, fixed: bool) -> Result<()> {
        self.body_mut(handle)?.set_fixed(fixed);
        Ok(())
    }

    pub fn set_body_enabled(&mut self, handle: BodyHandle, enabled: bool) -> Result<()> {
        self.body_mut(handle)?.set_enabled(enabled);
        Ok(())
    }

    pub fn set_gravity_responsive(&mut self, handle: BodyHandle, responsive: bool) -> Result<()> {
        self.body_mut(handle)?.set_gravity_responsive(responsive);
        Ok(())
    }

    pub fn set_body_density(&mut self, handle: BodyHandle, density: f64) -> Result<()> {
        self.body_mut(handle)?.set_density(density)
    }

    /// Accumulates a force at a world-space point, consumed by the next tick.
    pub fn apply_force(&mut self, handle: BodyHandle, force: Vec2, point: Vec2) -> Result<()> {
        ensure_finite(&[force, point])?;
        self.body_mut(handle)?.apply_force_at_point(force, point);
        Ok(())
    }

    /// Applies an impulse at a world-space point immediately.
    pub fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec2, point: Vec2) -> Result<()> {
        ensure_finite(&[impulse, point])?;
        self.body_mut(handle)?.apply_impulse(impulse, point);
        Ok(())
    }

    /// Teleports a body's centroid.
    pub fn set_position(&mut self, handle: BodyHandle, position: Vec2) -> Result<()> {
        ensure_finite(&[position])?;
        self.body_mut(handle)?.set_position(position);
        Ok(())
    }

    pub fn set_angle(&mut self, handle: BodyHandle, angle: f64) -> Result<()> {
        if !angle.is_finite() {
            return Err(PhysicsError::NonFiniteInput);
        }
        self.body_mut(handle)?.set_angle(angle);
        Ok(())
    }

    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) -> Result<()> {
        ensure_finite(&[velocity])?;
        self.body_mut(handle)?.set_velocity(velocity);
        Ok(())
    }

    pub fn set_angular_velocity(&mut self, handle: BodyHandle, angular_velocity: f64) -> Result<()> {
        if !angular_velocity.is_finite() {
            return Err(PhysicsError::NonFiniteInput);
        }
        self.body_mut(handle)?.set_angular_velocity(angular_velocity);
        Ok(())
    }

    /// Replaces the gravity with a constant acceleration.
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = Box::new(gravity);
    }

    /// Replaces the gravity with a source polled once per tick.
    pub fn set_gravity_source(&mut self, source: impl GravitySource + 'static) {
        self.gravity = Box::new(source);
    }

    /// Registers the callback that receives `(position, angle)` after every
    /// tick in which the body is enabled. Replaces any previous listener.
    pub fn set_movement_listener(
        &mut self,
        handle: BodyHandle,
        listener: impl FnMut(Vec2, f64) + 'static,
    ) -> Result<()> {
        if !self.bodies.contains_key(handle) {
            return Err(PhysicsError::UnknownBody(handle));
        }
        self.listeners.insert(handle, Box::new(listener));
        Ok(())
    }

    /// Returns `true` if a listener was removed.
    pub fn clear_movement_listener(&mut self, handle: BodyHandle) -> bool {
        self.listeners.remove(handle).is_some()
    }

    /// Runs one tick: gravity, integration, contact solving, then listeners.
    ///
    /// Non-positive or non-finite `dt` skips the tick. There is no
    /// sub-stepping, so large `dt` relative to body speeds lets bodies pass
    /// through thin obstacles.
    pub fn step(&mut self, dt: f64) {
        if !(dt > 0.0 && dt.is_finite()) {
            debug!(dt, "tick skipped");
            return;
        }

        let mut gravity = self.gravity.gravity();
        if !gravity.is_finite() {
            warn!(?gravity, "gravity source returned a non-finite value, ignored");
            gravity = Vec2::ZERO;
        }

        for body in self.bodies.values_mut() {
            if body.is_dynamic() && body.is_gravity_responsive() {
                let weight = gravity * body.mass();
                body.apply_force(weight, Vec2::ZERO);
            }
            integrate(body, dt);
        }

        let islands = self.arbiter.step(&mut self.bodies);
        trace!(dt, islands, bodies = self.bodies.len(), "tick complete");

        for (handle, listener) in self.listeners.iter_mut() {
            if let Some(body) = self.bodies.get(handle) {
                if body.is_enabled() {
                    listener(body.position(), body.angle());
                }
            }
        }
    }

    pub fn snapshot(&self, handle: BodyHandle) -> Result<BodySnapshot> {
        let body = self.bodies.get(handle).ok_or(PhysicsError::UnknownBody(handle))?;
        Ok(BodySnapshot {
            contour: body.polygon().points().to_vec(),
            material: *body.material(),
            position: body.position(),
            angle: body.angle(),
            velocity: body.velocity(),
            angular_velocity: body.angular_velocity(),
            fixed: body.is_fixed(),
        })
    }

    /// Re-creates a body from a snapshot. The contour is used as stored,
    /// without simplification.
    pub fn restore(&mut self, snapshot: &BodySnapshot) -> Result<BodyHandle> {
        ensure_finite(&[snapshot.position, snapshot.velocity])?;
        if !(snapshot.angle.is_finite() && snapshot.angular_velocity.is_finite()) {
            return Err(PhysicsError::NonFiniteInput);
        }

        let polygon = Polygon::new(snapshot.contour.clone())?;
        let handle = self.insert_body(polygon, snapshot.material, snapshot.position)?;
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_angle(snapshot.angle);
            body.set_velocity(snapshot.velocity);
            body.set_angular_velocity(snapshot.angular_velocity);
            body.set_fixed(snapshot.fixed);
        }
        Ok(handle)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("config", &self.config)
            .field("bodies", &self.bodies.len())
            .field("listeners", &self.listeners.len())
            .field("arbiter", &self.arbiter)
            .finish_non_exhaustive()
    }
}

fn ensure_finite(values: &[Vec2]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(PhysicsError::NonFiniteInput)
    }
}
