//! 2D rigid-body physics for arbitrary simple polygons.
//!
//! Contours are optionally simplified, then triangulated and centred once when a body is
//! created. Each [`Scene::step`] then applies gravity, integrates every body,
//! finds overlap regions between contours and resolves them island by island
//! with impulses and positional correction.
//!
//! ```no_run
//! use polygon_physics::{Material, Scene, SceneConfig, Vec2};
//!
//! let mut scene = Scene::new(SceneConfig::y_up());
//! scene.set_gravity(Vec2::new(0.0, -10.0));
//! let floor = scene.create_polygon_body(
//!     vec![Vec2::new(-10.0, -1.0), Vec2::new(10.0, -1.0), Vec2::new(10.0, 0.0), Vec2::new(-10.0, 0.0)],
//!     Material::default(),
//! )?;
//! scene.set_body_fixed(floor, true)?;
//! let crate_box = scene.create_default_body(vec![
//!     Vec2::new(-0.5, 2.0),
//!     Vec2::new(0.5, 2.0),
//!     Vec2::new(0.5, 3.0),
//!     Vec2::new(-0.5, 3.0),
//! ])?;
//! for _ in 0..120 {
//!     scene.step(1.0 / 60.0);
//! }
//! println!("{:?}", scene.body(crate_box).map(|b| b.position()));
//! # Ok::<(), polygon_physics::PhysicsError>(())
//! ```

pub mod collision;
pub mod common;
pub mod error;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod solver;
pub mod world;

// Re-export key types for easier use
pub use collision::{Collider, Contact};
pub use common::{AngularMassModel, Material, SceneConfig};
pub use error::{PhysicsError, Result};
pub use math::{Mat2, Transform, Vec2};
pub use objects::RigidBody;
pub use shapes::Polygon;
pub use world::{BodyHandle, BodySnapshot, GravitySource, Scene};
