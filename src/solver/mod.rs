pub mod contact_solver;

pub use contact_solver::{
    compute_friction, effective_mass, reduced_mass, solve_penetration, solve_velocity, PenetrationSettings,
};
