use crate::math::vec2::Vec2;
use crate::world::BodyHandle;

/// One overlap region between two bodies, found and consumed within a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// World position of the contact: the midpoint of the region's entry and exit crossings.
    pub position: Vec2,
    /// Unit normal pointing from body A into body B.
    pub normal: Vec2,
    /// Unit direction along the chord between the entry and exit crossings.
    pub tangent: Vec2,
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    /// Remaining penetration depth along the normal. Consumed by the penetration solve.
    pub penetration: f64,
}

impl Contact {
    pub fn involves(&self, body: BodyHandle) -> bool {
        self.body_a == body || self.body_b == body
    }

    /// Whether two contacts touch a common body, i.e. belong to the same island.
    pub fn shares_body_with(&self, other: &Contact) -> bool {
        self.involves(other.body_a) || self.involves(other.body_b)
    }

    /// Height of the contact along `up`; larger means nearer the top of the scene.
    pub fn height(&self, up: Vec2) -> f64 {
        self.position.dot(up)
    }
}
