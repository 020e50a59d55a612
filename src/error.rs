//! Errors reported by body construction and the scene API.

use thiserror::Error;

use crate::world::BodyHandle;

/// Errors that can occur while building or addressing bodies.
///
/// Degenerate geometry found *during* a simulation tick is never reported
/// here; such contacts are dropped for that tick instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    #[error("polygon contour needs at least 3 points, got {count}")]
    TooFewPoints { count: usize },

    #[error("polygon contour is degenerate (area {area})")]
    DegenerateContour { area: f64 },

    #[error("contour point or parameter is not finite")]
    NonFiniteInput,

    #[error("density must be finite and positive, got {0}")]
    InvalidDensity(f64),

    #[error("no body registered for handle {0:?}")]
    UnknownBody(BodyHandle),
}

pub type Result<T> = std::result::Result<T, PhysicsError>;
