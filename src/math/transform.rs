use super::mat2::Mat2;
use super::vec2::Vec2;

/// Placement of a centroid-relative contour in the world.
///
/// The rotation matrix is cached from the angle, so both are fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    position: Vec2,
    angle: f64, // Radians
    rotation: Mat2,
}

impl Transform {
    pub fn new(position: Vec2, angle: f64) -> Self {
        Self {
            position,
            angle,
            rotation: Mat2::rotation(angle),
        }
    }

    /// Creates an identity transform (no translation, no rotation).
    pub fn identity() -> Self {
        Self::new(Vec2::ZERO, 0.0)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn rotation(&self) -> Mat2 {
        self.rotation
    }

    /// Applies the transform (rotation then translation) to a point.
    pub fn apply(&self, point: Vec2) -> Vec2 {
        self.rotation * point + self.position
    }

    /// Applies the inverse transform (inverse translation then inverse rotation) to a point.
    pub fn apply_inverse(&self, point: Vec2) -> Vec2 {
        // Rotation matrices are orthonormal, so the transpose is the inverse.
        self.rotation.transpose() * (point - self.position)
    }

    /// Rotates a direction without translating it.
    pub fn apply_vector(&self, direction: Vec2) -> Vec2 {
        self.rotation * direction
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
