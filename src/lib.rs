//! Two-body orbital transfer toolkit.
//!
//! Conic geometry and vis-viva energy live in [`transfer_orbits`], impulsive transfer
//! budgets in [`transfer_impulsive`]. This crate wires them to the body catalogue and
//! scenario manifests and hosts the `transfer` and `transfer_plot` front-ends.

pub mod scenario;

pub use transfer_config as config;
pub use transfer_export as export;
pub use transfer_impulsive as impulsive;
pub use transfer_orbits as orbits;

pub use transfer_impulsive::{
    ManeuverResult, bielliptic_delta_v, hohmann_delta_v, one_tangent_burn_delta_v,
};
pub use transfer_orbits::{
    GravitationalContext, Orbit, OrbitError, generate_orbit_points, kinetic_energy,
    orbital_speed,
};
