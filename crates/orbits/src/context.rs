//! Central-body parameters passed into every velocity and maneuver computation.

use serde::Serialize;

use crate::error::OrbitError;

/// Gravitational description of the central body, built from `mu` directly or
/// from the constant `G` and the body mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GravitationalContext {
    mu_m3_s2: f64,
}

impl GravitationalContext {
    /// Build a context from a gravitational parameter (m³/s²).
    pub fn from_mu(mu_m3_s2: f64) -> Result<Self, OrbitError> {
        if !(mu_m3_s2.is_finite() && mu_m3_s2 > 0.0) {
            return Err(OrbitError::InvalidParameter {
                name: "mu",
                value: mu_m3_s2,
            });
        }
        Ok(Self { mu_m3_s2 })
    }

    /// Build a context from `G` (m³ kg⁻¹ s⁻²) and the central-body mass (kg).
    pub fn from_mass(gravitational_constant: f64, mass_kg: f64) -> Result<Self, OrbitError> {
        if !(gravitational_constant.is_finite() && gravitational_constant > 0.0) {
            return Err(OrbitError::InvalidParameter {
                name: "G",
                value: gravitational_constant,
            });
        }
        if !(mass_kg.is_finite() && mass_kg > 0.0) {
            return Err(OrbitError::InvalidParameter {
                name: "mass",
                value: mass_kg,
            });
        }
        Self::from_mu(gravitational_constant * mass_kg)
    }

    /// Earth with the workspace's default `G` and mass.
    pub fn earth() -> Self {
        use transfer_core::constants::{EARTH_MASS_KG, G};
        Self {
            mu_m3_s2: G * EARTH_MASS_KG,
        }
    }

    /// Gravitational parameter (m³/s²).
    #[inline]
    pub fn mu(&self) -> f64 {
        self.mu_m3_s2
    }
}
