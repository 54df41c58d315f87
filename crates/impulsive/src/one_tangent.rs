//! One-tangent-burn transfer: a tangential departure burn onto an ellipse that
//! crosses the target circle at true anomaly `ν`, followed by a non-tangential
//! arrival burn.
//!
//! The transfer ellipse has its periapsis on the initial orbit:
//!
//! ```text
//! Q   = r_i / r_f
//! e   = (Q − 1) / (cos ν − Q)
//! a   = r_i / (1 − e)
//! tan φ = e sin ν / (1 + e cos ν)
//! Δv_b = sqrt(v_f² + v_b² − 2 v_f v_b cos φ)
//! ```
//!
//! Reference: Vallado, *Fundamentals of Astrodynamics and Applications*, §6.3.2,
//! Example 6-3.

use transfer_orbits::error::ensure_radius;
use transfer_orbits::{GravitationalContext, Orbit, OrbitError, circular_speed, orbital_speed};

use crate::result::{Burn, ManeuverKind, ManeuverResult};

/// Slack on the upper bound, which evaluates to 180° only up to rounding.
const ANOMALY_TOLERANCE_DEG: f64 = 1e-3;

/// Feasible true-anomaly range for a one-tangent-burn transfer (degrees).
///
/// The lower bound is exclusive: at `min_deg` the transfer orbit is parabolic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyBounds {
    pub min_deg: f64,
    pub max_deg: f64,
}

impl AnomalyBounds {
    pub fn contains(&self, nu_deg: f64) -> bool {
        nu_deg > self.min_deg && nu_deg <= self.max_deg + ANOMALY_TOLERANCE_DEG
    }
}

/// Compute the feasible true-anomaly bounds for raising `r_initial_m` to `r_final_m`.
pub fn one_tangent_burn_bounds(
    r_initial_m: f64,
    r_final_m: f64,
) -> Result<AnomalyBounds, OrbitError> {
    ensure_radius("initial radius", r_initial_m)?;
    ensure_radius("final radius", r_final_m)?;
    if r_final_m <= r_initial_m {
        return Err(OrbitError::invalid_orbit(format!(
            "one-tangent-burn transfer raises the orbit; final radius {r_final_m} m must exceed initial radius {r_initial_m} m"
        )));
    }

    let q = r_initial_m / r_final_m;
    let min_deg = (2.0 * q - 1.0).acos().to_degrees();
    // Lowest eccentricity reaching r_f, attained with the arrival at apoapsis
    let e_min = (q - 1.0) / (-1.0 - q);
    let max_deg = ((q * (1.0 + e_min) - 1.0) / e_min)
        .clamp(-1.0, 1.0)
        .acos()
        .to_degrees();
    Ok(AnomalyBounds { min_deg, max_deg })
}

/// One-tangent-burn transfer from circular radius r_i to r_f, arriving at true anomaly ν.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OneTangentBurnTransfer {
    pub r_initial_m: f64,
    pub r_final_m: f64,
    pub true_anomaly_deg: f64,
    pub bounds: AnomalyBounds,
    pub eccentricity: f64,
    pub semi_major_axis_m: f64,
    pub transfer_orbit: Orbit,
    pub v_initial_m_s: f64,
    pub v_final_m_s: f64,
    pub v_depart_m_s: f64,
    pub v_arrive_m_s: f64,
    pub flight_path_angle_deg: f64,
    pub dv_a_m_s: f64, // signed, tangential
    pub dv_b_m_s: f64, // magnitude of the combined arrival burn
    pub dv_total_m_s: f64,
    pub tof_seconds: f64,
}

impl OneTangentBurnTransfer {
    pub fn to_result(&self) -> ManeuverResult {
        ManeuverResult::new(
            ManeuverKind::OneTangentBurn,
            self.r_initial_m,
            self.r_final_m,
            vec![
                Burn::tangential(
                    "departure",
                    self.r_initial_m,
                    self.v_initial_m_s,
                    self.v_depart_m_s,
                ),
                Burn {
                    leg: "arrival",
                    radius_m: self.r_final_m,
                    v_before_m_s: self.v_arrive_m_s,
                    v_after_m_s: self.v_final_m_s,
                    dv_m_s: self.dv_b_m_s,
                    flight_path_angle_deg: self.flight_path_angle_deg,
                },
            ],
            vec![self.transfer_orbit],
            self.tof_seconds,
        )
    }
}

/// Compute the one-tangent-burn transfer for true anomaly `nu_deg` at arrival.
///
/// `nu_deg` is validated against [`one_tangent_burn_bounds`] before any other
/// arithmetic; an infeasible anomaly yields [`OrbitError::InvalidAnomaly`]
/// carrying both bounds.
pub fn one_tangent_burn(
    r_initial_m: f64,
    r_final_m: f64,
    ctx: &GravitationalContext,
    nu_deg: f64,
) -> Result<OneTangentBurnTransfer, OrbitError> {
    let bounds = one_tangent_burn_bounds(r_initial_m, r_final_m)?;
    if !(nu_deg.is_finite() && bounds.contains(nu_deg)) {
        return Err(OrbitError::InvalidAnomaly {
            nu_deg,
            nu_min_deg: bounds.min_deg,
            nu_max_deg: bounds.max_deg,
        });
    }

    let nu = nu_deg.to_radians();
    let q = r_initial_m / r_final_m;
    let e = (q - 1.0) / (nu.cos() - q);
    if !(0.0..1.0).contains(&e) {
        return Err(OrbitError::domain(format!(
            "transfer eccentricity {e} is not elliptical"
        )));
    }
    let a = r_initial_m / (1.0 - e);
    let transfer_orbit = Orbit::new(r_initial_m, a * (1.0 + e))?;

    let v_i = circular_speed(r_initial_m, ctx)?;
    let v_f = circular_speed(r_final_m, ctx)?;
    let v_trans_a = orbital_speed(r_initial_m, ctx, a)?;
    let v_trans_b = orbital_speed(r_final_m, ctx, a)?;

    let dv_a = v_trans_a - v_i;

    let phi = (e * nu.sin() / (1.0 + e * nu.cos())).atan();
    // Law of cosines between the transfer velocity and the circular velocity
    let dv_b = (v_f * v_f + v_trans_b * v_trans_b - 2.0 * v_f * v_trans_b * phi.cos())
        .max(0.0)
        .sqrt();

    let cos_ecc_anomaly = ((e + nu.cos()) / (1.0 + e * nu.cos())).clamp(-1.0, 1.0);
    let ecc_anomaly = cos_ecc_anomaly.acos();
    let tof = (a.powi(3) / ctx.mu()).sqrt() * (ecc_anomaly - e * ecc_anomaly.sin());

    Ok(OneTangentBurnTransfer {
        r_initial_m,
        r_final_m,
        true_anomaly_deg: nu_deg,
        bounds,
        eccentricity: e,
        semi_major_axis_m: a,
        transfer_orbit,
        v_initial_m_s: v_i,
        v_final_m_s: v_f,
        v_depart_m_s: v_trans_a,
        v_arrive_m_s: v_trans_b,
        flight_path_angle_deg: phi.to_degrees(),
        dv_a_m_s: dv_a,
        dv_b_m_s: dv_b,
        dv_total_m_s: dv_a.abs() + dv_b,
        tof_seconds: tof,
    })
}

/// Total one-tangent-burn delta-v (m/s).
pub fn one_tangent_burn_delta_v(
    r_initial_m: f64,
    r_final_m: f64,
    ctx: &GravitationalContext,
    true_anomaly_deg: f64,
) -> Result<f64, OrbitError> {
    one_tangent_burn(r_initial_m, r_final_m, ctx, true_anomaly_deg).map(|t| t.dv_total_m_s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfers::hohmann;

    const R_EARTH_VALLADO: f64 = 6_378.137e3;

    fn vallado() -> GravitationalContext {
        GravitationalContext::from_mu(3.986_004_418e14).unwrap()
    }

    #[test]
    fn vallado_example_6_3() {
        let r_i = R_EARTH_VALLADO + 191.344_11e3;
        let r_f = R_EARTH_VALLADO + 35_781.348_57e3;
        let t = one_tangent_burn(r_i, r_f, &vallado(), 160.0).unwrap();
        assert!((t.eccentricity - 0.770_572_6).abs() < 1e-6, "e = {}", t.eccentricity);
        assert!((t.semi_major_axis_m - 28_634_249.0).abs() < 10.0);
        assert!((t.dv_a_m_s - 2_575.39).abs() < 0.1, "dv_a = {}", t.dv_a_m_s);
        assert!((t.dv_b_m_s - 2_123.94).abs() < 0.1, "dv_b = {}", t.dv_b_m_s);
        assert!((t.dv_total_m_s - 4_699.33).abs() < 0.1);
        assert!((t.flight_path_angle_deg - 43.688_8).abs() < 1e-3);
        assert!((t.tof_seconds - 12_446.7).abs() < 1.0, "tof = {}", t.tof_seconds);
    }

    #[test]
    fn bounds_for_leo_to_geo() {
        let r_i = R_EARTH_VALLADO + 191.344_11e3;
        let r_f = R_EARTH_VALLADO + 35_781.348_57e3;
        let bounds = one_tangent_burn_bounds(r_i, r_f).unwrap();
        assert!((bounds.min_deg - 133.4997).abs() < 1e-3, "min = {}", bounds.min_deg);
        assert!((bounds.max_deg - 180.0).abs() < 1e-3, "max = {}", bounds.max_deg);
    }

    #[test]
    fn anomaly_below_lower_bound_reports_both_bounds() {
        let r_i = R_EARTH_VALLADO + 191.344_11e3;
        let r_f = R_EARTH_VALLADO + 35_781.348_57e3;
        match one_tangent_burn(r_i, r_f, &vallado(), 120.0) {
            Err(OrbitError::InvalidAnomaly {
                nu_deg,
                nu_min_deg,
                nu_max_deg,
            }) => {
                assert_eq!(nu_deg, 120.0);
                assert!((nu_min_deg - 133.4997).abs() < 1e-3);
                assert!((nu_max_deg - 180.0).abs() < 1e-3);
            }
            other => panic!("expected InvalidAnomaly, got {other:?}"),
        }
        assert!(matches!(
            one_tangent_burn(r_i, r_f, &vallado(), 181.0),
            Err(OrbitError::InvalidAnomaly { .. })
        ));
        assert!(matches!(
            one_tangent_burn(r_i, r_f, &vallado(), f64::NAN),
            Err(OrbitError::InvalidAnomaly { .. })
        ));
    }

    #[test]
    fn parabolic_lower_bound_is_excluded() {
        let bounds = one_tangent_burn_bounds(7_000e3, 70_000e3).unwrap();
        assert!(matches!(
            one_tangent_burn(7_000e3, 70_000e3, &vallado(), bounds.min_deg),
            Err(OrbitError::InvalidAnomaly { .. })
        ));
    }

    #[test]
    fn half_revolution_reduces_to_hohmann() {
        let ctx = vallado();
        let t = one_tangent_burn(7_000e3, 42_164e3, &ctx, 180.0).unwrap();
        let h = hohmann(7_000e3, 42_164e3, &ctx).unwrap();
        assert!((t.dv_total_m_s - h.dv_total_m_s).abs() < 1e-6);
        assert!((t.tof_seconds - h.tof_seconds).abs() < 1e-3);
        assert!(t.flight_path_angle_deg.abs() < 1e-9);
    }

    #[test]
    fn lowering_is_rejected() {
        assert!(matches!(
            one_tangent_burn_bounds(42_164e3, 7_000e3),
            Err(OrbitError::InvalidOrbit { .. })
        ));
        assert!(matches!(
            one_tangent_burn(7_000e3, 7_000e3, &vallado(), 160.0),
            Err(OrbitError::InvalidOrbit { .. })
        ));
    }

    #[test]
    fn arrival_burn_is_reported_with_flight_path_angle() {
        let t = one_tangent_burn(7_000e3, 70_000e3, &vallado(), 145.0).unwrap();
        let result = t.to_result();
        assert_eq!(result.kind, ManeuverKind::OneTangentBurn);
        let arrival = result.burn("arrival").unwrap();
        assert!(!arrival.is_tangential());
        assert!(arrival.flight_path_angle_deg > 0.0);
        assert!((result.dv_total_m_s - t.dv_total_m_s).abs() < 1e-9);
        assert_eq!(result.transfer_orbits[0].periapsis(), 7_000e3);
        assert!(result.transfer_orbits[0].apoapsis() > 70_000e3);
    }
}
