//! Scene-wide tuning, passed in at construction instead of living in globals.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

use super::material::Material;

/// How a body's angular mass is derived from its contour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AngularMassModel {
    /// `factor · mass · bounding_radius²`.
    BoundingRadius { factor: f64 },
    /// The polygon's exact second moment of area scaled by density.
    Exact,
}

impl AngularMassModel {
    pub const DEFAULT_FACTOR: f64 = 0.8;
}

impl Default for AngularMassModel {
    fn default() -> Self {
        AngularMassModel::BoundingRadius {
            factor: Self::DEFAULT_FACTOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Contacts are solved in order of decreasing height along this direction.
    pub up: Vec2,
    pub angular_mass: AngularMassModel,
    /// Penetration depth left uncorrected so resting contacts stay in touch.
    pub penetration_slop: f64,
    /// Fraction of the remaining penetration removed per solve, in (0, 1].
    pub penetration_correction: f64,
    /// Douglas–Peucker tolerance applied to new contours, if any.
    pub simplify_tolerance: Option<f64>,
    /// Material used by [`crate::world::Scene::create_default_body`].
    pub default_material: Material,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            // Screen coordinates: y grows downward.
            up: -Vec2::Y_UP,
            angular_mass: AngularMassModel::default(),
            penetration_slop: 0.01,
            penetration_correction: 1.0,
            simplify_tolerance: None,
            default_material: Material::default(),
        }
    }
}

impl SceneConfig {
    /// Defaults for a y-up world.
    pub fn y_up() -> Self {
        Self {
            up: Vec2::Y_UP,
            ..Self::default()
        }
    }
}
