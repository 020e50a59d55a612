pub mod arbiter;
pub mod gravity;
pub mod scene;

slotmap::new_key_type! {
    /// Stable handle to a body owned by a [`Scene`].
    pub struct BodyHandle;
}

pub use arbiter::{partition_islands, Arbiter};
pub use gravity::GravitySource;
pub use scene::{BodySnapshot, Scene};
