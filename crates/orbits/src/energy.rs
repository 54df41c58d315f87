//! Vis-viva speeds and kinetic energy.

use serde::Serialize;
use transfer_core::sampling::linspace;

use crate::conic::Orbit;
use crate::context::GravitationalContext;
use crate::error::{OrbitError, ensure_radius};

/// Vis-viva speed `v = sqrt(mu (2/r − 1/a))` at radius `radius_m` on an orbit with
/// semi-major axis `semi_major_axis_m`.
///
/// The radius must be reachable on that orbit (`r ≤ 2a`); beyond it the speed
/// would be imaginary and a [`OrbitError::Domain`] is returned instead of NaN.
pub fn orbital_speed(
    radius_m: f64,
    ctx: &GravitationalContext,
    semi_major_axis_m: f64,
) -> Result<f64, OrbitError> {
    ensure_radius("radius", radius_m)?;
    ensure_radius("semi-major axis", semi_major_axis_m)?;
    let specific = 2.0 / radius_m - 1.0 / semi_major_axis_m;
    if specific < 0.0 {
        return Err(OrbitError::domain(format!(
            "radius {radius_m} m exceeds twice the semi-major axis {semi_major_axis_m} m"
        )));
    }
    Ok((ctx.mu() * specific).sqrt())
}

/// Speed on a circular orbit of radius `radius_m`.
pub fn circular_speed(radius_m: f64, ctx: &GravitationalContext) -> Result<f64, OrbitError> {
    ensure_radius("radius", radius_m)?;
    Ok((ctx.mu() / radius_m).sqrt())
}

/// Kinetic energy `0.5 m v²` (J).
pub fn kinetic_energy(speed_m_s: f64, mass_kg: f64) -> Result<f64, OrbitError> {
    if !speed_m_s.is_finite() {
        return Err(OrbitError::InvalidParameter {
            name: "speed",
            value: speed_m_s,
        });
    }
    if !(mass_kg.is_finite() && mass_kg >= 0.0) {
        return Err(OrbitError::InvalidParameter {
            name: "mass",
            value: mass_kg,
        });
    }
    Ok(0.5 * mass_kg * speed_m_s * speed_m_s)
}

/// Speeds at `samples` radii evenly spaced from periapsis to apoapsis.
pub fn speed_profile(
    orbit: &Orbit,
    ctx: &GravitationalContext,
    samples: usize,
) -> Result<Vec<(f64, f64)>, OrbitError> {
    linspace(orbit.periapsis(), orbit.apoapsis(), samples)
        .into_iter()
        .map(|r| orbital_speed(r, ctx, orbit.semi_major_axis()).map(|v| (r, v)))
        .collect()
}

/// Kinetic energy before and after a prograde impulse at one radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergySample {
    pub radius_m: f64,
    pub speed_m_s: f64,
    pub energy_before_j: f64,
    pub energy_after_j: f64,
    pub energy_gain_j: f64,
}

/// Kinetic energy gained by the same `delta_v_m_s` impulse applied at radii
/// spread between periapsis and apoapsis.
///
/// The gain `m v Δv + m Δv² / 2` grows with the local speed, which is why a
/// burn at periapsis is the most effective (the Oberth effect).
pub fn oberth_profile(
    orbit: &Orbit,
    ctx: &GravitationalContext,
    delta_v_m_s: f64,
    mass_kg: f64,
    samples: usize,
) -> Result<Vec<EnergySample>, OrbitError> {
    if !delta_v_m_s.is_finite() {
        return Err(OrbitError::InvalidParameter {
            name: "delta_v",
            value: delta_v_m_s,
        });
    }
    speed_profile(orbit, ctx, samples)?
        .into_iter()
        .map(|(radius_m, speed_m_s)| {
            let energy_before_j = kinetic_energy(speed_m_s, mass_kg)?;
            let energy_after_j = kinetic_energy(speed_m_s + delta_v_m_s, mass_kg)?;
            Ok(EnergySample {
                radius_m,
                speed_m_s,
                energy_before_j,
                energy_after_j,
                energy_gain_j: energy_after_j - energy_before_j,
            })
        })
        .collect()
}
