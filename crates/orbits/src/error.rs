use thiserror::Error;

/// Failures raised by orbit geometry and maneuver calculators.
///
/// Every check happens before any arithmetic; a calculator either returns a
/// complete result or one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrbitError {
    #[error("invalid orbit: {reason}")]
    InvalidOrbit { reason: String },
    #[error("outside the physical domain: {reason}")]
    Domain { reason: String },
    #[error(
        "true anomaly {nu_deg:.4}° is infeasible; it must lie in ({nu_min_deg:.4}°, {nu_max_deg:.4}°]"
    )]
    InvalidAnomaly {
        nu_deg: f64,
        nu_min_deg: f64,
        nu_max_deg: f64,
    },
    #[error("invalid parameter `{name}` = {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

impl OrbitError {
    pub fn invalid_orbit(reason: impl Into<String>) -> Self {
        OrbitError::InvalidOrbit {
            reason: reason.into(),
        }
    }

    pub fn domain(reason: impl Into<String>) -> Self {
        OrbitError::Domain {
            reason: reason.into(),
        }
    }
}

/// Require a strictly positive, finite radius.
pub fn ensure_radius(name: &str, value: f64) -> Result<f64, OrbitError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(OrbitError::invalid_orbit(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}
