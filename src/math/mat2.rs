use std::ops::Mul;

use super::vec2::Vec2;

/// A 2x2 matrix stored as two column vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat2 {
    pub col1: Vec2,
    pub col2: Vec2,
}

impl Mat2 {
    pub const IDENTITY: Mat2 = Mat2 {
        col1: Vec2 { x: 1.0, y: 0.0 },
        col2: Vec2 { x: 0.0, y: 1.0 },
    };

    pub fn new(col1: Vec2, col2: Vec2) -> Self {
        Self { col1, col2 }
    }

    /// Counter-clockwise rotation by `angle` radians.
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            col1: Vec2::new(c, s),
            col2: Vec2::new(-s, c),
        }
    }

    pub fn determinant(&self) -> f64 {
        self.col1.x * self.col2.y - self.col2.x * self.col1.y
    }

    pub fn transpose(&self) -> Self {
        Self {
            col1: Vec2::new(self.col1.x, self.col2.x),
            col2: Vec2::new(self.col1.y, self.col2.y),
        }
    }

    /// Returns `None` when the determinant is exactly zero.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }
        let inv_det = 1.0 / det;
        Some(Self {
            col1: Vec2::new(self.col2.y * inv_det, -self.col1.y * inv_det),
            col2: Vec2::new(-self.col2.x * inv_det, self.col1.x * inv_det),
        })
    }
}

impl Mul<Vec2> for Mat2 {
    type Output = Vec2;

    fn mul(self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.col1.x * v.x + self.col2.x * v.y,
            self.col1.y * v.x + self.col2.y * v.y,
        )
    }
}

impl Mul for Mat2 {
    type Output = Mat2;

    fn mul(self, rhs: Mat2) -> Mat2 {
        Mat2::new(self * rhs.col1, self * rhs.col2)
    }
}
