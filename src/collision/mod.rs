pub mod collider;
pub mod contact;

pub use collider::{is_at_same_side, Collider};
pub use contact::Contact;
