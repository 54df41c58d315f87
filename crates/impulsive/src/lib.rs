//! Impulsive transfer calculators between coplanar circular orbits.
//!
//! Hohmann, bi-elliptic and one-tangent-burn transfers, each returning a
//! detailed record plus a uniform [`ManeuverResult`] for reporting, and a thin
//! sweep wrapper for comparing transfers across radius ratios.

pub mod one_tangent;
pub mod result;
pub mod sweep;
pub mod transfers;

pub use one_tangent::{
    AnomalyBounds, OneTangentBurnTransfer, one_tangent_burn, one_tangent_burn_bounds,
    one_tangent_burn_delta_v,
};
pub use result::{Burn, ManeuverKind, ManeuverResult};
pub use sweep::{SweepPoint, compare_transfers, crossover_ratio, logspace};
pub use transfers::{
    BiEllipticTransfer, DEFAULT_INTERMEDIATE_MULTIPLIER, HohmannTransfer, bi_elliptic,
    bi_elliptic_via, bielliptic_delta_v, hohmann, hohmann_delta_v,
};
pub use transfer_orbits::{GravitationalContext, Orbit, OrbitError};
