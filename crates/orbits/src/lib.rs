//! Planar two-body orbit helpers: conic geometry, vis-viva speeds, and kinetic energy.
//!
//! Every function here is pure. The central body is described by an explicit
//! [`GravitationalContext`] passed into each call; nothing is read from global state.

pub mod conic;
pub mod context;
pub mod energy;
pub mod error;

pub use conic::{DEFAULT_ORBIT_POINTS, Orbit, TrajectoryPoints, generate_orbit_points};
pub use context::GravitationalContext;
pub use energy::{
    EnergySample, circular_speed, kinetic_energy, oberth_profile, orbital_speed, speed_profile,
};
pub use error::OrbitError;
