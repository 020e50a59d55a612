//! Defines physical material properties.

use serde::{Deserialize, Serialize};

/// Physical properties of a body: how heavy it is and how it responds to contacts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Mass per unit area. Must be finite and positive.
    pub density: f64,
    /// Coefficient of restitution (bounciness). Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
    /// Friction coefficient while the contact is not sliding. Range [0, infinity).
    pub static_friction: f64,
    /// Friction coefficient while sliding. Range [0, infinity).
    pub dynamic_friction: f64,
}

impl Material {
    /// Creates a new material, clamping restitution to [0, 1] and frictions to >= 0.
    pub fn new(density: f64, restitution: f64, static_friction: f64, dynamic_friction: f64) -> Self {
        Material {
            density,
            restitution: restitution.clamp(0.0, 1.0),
            static_friction: static_friction.max(0.0),
            dynamic_friction: dynamic_friction.max(0.0),
        }
    }

    pub fn with_density(self, density: f64) -> Self {
        Self { density, ..self }
    }

    pub fn with_restitution(self, restitution: f64) -> Self {
        Self::new(self.density, restitution, self.static_friction, self.dynamic_friction)
    }

    pub fn with_friction(self, static_friction: f64, dynamic_friction: f64) -> Self {
        Self::new(self.density, self.restitution, static_friction, dynamic_friction)
    }

    /// Brings coefficients set through the fields or deserialized back into range.
    pub fn clamped(self) -> Self {
        Self::new(self.density, self.restitution, self.static_friction, self.dynamic_friction)
    }

    pub fn is_finite(&self) -> bool {
        self.density.is_finite()
            && self.restitution.is_finite()
            && self.static_friction.is_finite()
            && self.dynamic_friction.is_finite()
    }
}

impl Default for Material {
    /// Unit density, moderate restitution, moderate friction.
    fn default() -> Self {
        Material {
            density: 1.0,
            restitution: 0.2,
            static_friction: 0.5,
            dynamic_friction: 0.3,
        }
    }
}

/// Contact response coefficients mixed from the two bodies in contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactResponse {
    pub restitution: f64,
    pub static_friction: f64,
    pub dynamic_friction: f64,
}

impl ContactResponse {
    /// Restitution is the product of both coefficients; frictions use the geometric mean.
    pub fn combine(a: &Material, b: &Material) -> Self {
        Self {
            restitution: a.restitution * b.restitution,
            static_friction: (a.static_friction * b.static_friction).sqrt(),
            dynamic_friction: (a.dynamic_friction * b.dynamic_friction).sqrt(),
        }
    }
}
