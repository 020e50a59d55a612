pub mod config;
pub mod material;

pub use config::{AngularMassModel, SceneConfig};
pub use material::{ContactResponse, Material};
