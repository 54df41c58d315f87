//! Analytic estimators for impulsive transfers in the coplanar, circular limit.
//!
//! Provides Hohmann and bi-elliptic transfer calculators that return delta-v components
//! and time of flight for two-body Keplerian motion around the body described by a
//! [`GravitationalContext`]. All lengths are metres, speeds m/s.

use transfer_orbits::error::ensure_radius;
use transfer_orbits::{GravitationalContext, Orbit, OrbitError, circular_speed, orbital_speed};

use crate::result::{Burn, ManeuverKind, ManeuverResult};

/// Default ratio between the bi-elliptic intermediate apoapsis and the final radius.
///
/// Large enough to approach the limiting case where the intermediate apoapsis
/// recedes to infinity and the bi-elliptic transfer is most favourable.
pub const DEFAULT_INTERMEDIATE_MULTIPLIER: f64 = 1000.0;

/// Hohmann transfer between circular, coplanar orbits of radii r1 and r2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HohmannTransfer {
    pub r_initial_m: f64,
    pub r_final_m: f64,
    pub transfer_orbit: Orbit,
    pub v_initial_m_s: f64,
    pub v_final_m_s: f64,
    pub v_depart_m_s: f64,
    pub v_arrive_m_s: f64,
    pub dv1_m_s: f64,      // signed: negative for inward (retro) burn
    pub dv2_m_s: f64,      // signed: negative for retro capture when arriving inward
    pub dv_total_m_s: f64, // |dv1| + |dv2|
    pub tof_seconds: f64,
}

impl HohmannTransfer {
    pub fn to_result(&self) -> ManeuverResult {
        ManeuverResult::new(
            ManeuverKind::Hohmann,
            self.r_initial_m,
            self.r_final_m,
            vec![
                Burn::tangential(
                    "departure",
                    self.r_initial_m,
                    self.v_initial_m_s,
                    self.v_depart_m_s,
                ),
                Burn::tangential(
                    "arrival",
                    self.r_final_m,
                    self.v_arrive_m_s,
                    self.v_final_m_s,
                ),
            ],
            vec![self.transfer_orbit],
            self.tof_seconds,
        )
    }
}

/// Compute the classical Hohmann transfer between two circular coplanar orbits.
///
/// Inputs:
/// - `r_initial_m`: initial circular orbit radius (m)
/// - `r_final_m`: target circular orbit radius (m)
/// - `ctx`: central body
pub fn hohmann(
    r_initial_m: f64,
    r_final_m: f64,
    ctx: &GravitationalContext,
) -> Result<HohmannTransfer, OrbitError> {
    ensure_radius("initial radius", r_initial_m)?;
    ensure_radius("final radius", r_final_m)?;

    let transfer_orbit = Orbit::new(r_initial_m.min(r_final_m), r_initial_m.max(r_final_m))?;
    let a_t = transfer_orbit.semi_major_axis();

    let v1 = circular_speed(r_initial_m, ctx)?;
    let v2 = circular_speed(r_final_m, ctx)?;

    // Transfer speed at each end: periapsis/apoapsis depending on direction
    let v_t1 = orbital_speed(r_initial_m, ctx, a_t)?;
    let v_t2 = orbital_speed(r_final_m, ctx, a_t)?;

    let dv1 = v_t1 - v1; // positive for outward, negative for inward
    let dv2 = v2 - v_t2; // positive for outward (prograde capture), negative for inward (retro capture)

    Ok(HohmannTransfer {
        r_initial_m,
        r_final_m,
        transfer_orbit,
        v_initial_m_s: v1,
        v_final_m_s: v2,
        v_depart_m_s: v_t1,
        v_arrive_m_s: v_t2,
        dv1_m_s: dv1,
        dv2_m_s: dv2,
        dv_total_m_s: dv1.abs() + dv2.abs(),
        tof_seconds: transfer_orbit.half_period(ctx),
    })
}

/// Total Hohmann delta-v (m/s).
pub fn hohmann_delta_v(
    r_initial_m: f64,
    r_final_m: f64,
    ctx: &GravitationalContext,
) -> Result<f64, OrbitError> {
    hohmann(r_initial_m, r_final_m, ctx).map(|h| h.dv_total_m_s)
}

/// Bi-elliptic transfer parameterized by the intermediate apoapsis radius r_b.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiEllipticTransfer {
    pub r_initial_m: f64,
    pub r_final_m: f64,
    pub rb_m: f64,
    pub first_orbit: Orbit,
    pub second_orbit: Orbit,
    pub v_initial_m_s: f64,
    pub v_final_m_s: f64,
    pub v_peri_1_m_s: f64,
    pub v_apo_1_m_s: f64,
    pub v_peri_2_m_s: f64,
    pub v_apo_2_m_s: f64,
    pub dv1_m_s: f64,
    pub dv2_m_s: f64,
    pub dv3_m_s: f64,
    pub dv_total_m_s: f64,
    pub tof_seconds: f64,
}

impl BiEllipticTransfer {
    pub fn to_result(&self) -> ManeuverResult {
        ManeuverResult::new(
            ManeuverKind::BiElliptic,
            self.r_initial_m,
            self.r_final_m,
            vec![
                Burn::tangential(
                    "departure",
                    self.r_initial_m,
                    self.v_initial_m_s,
                    self.v_peri_1_m_s,
                ),
                Burn::tangential(
                    "intermediate",
                    self.rb_m,
                    self.v_apo_1_m_s,
                    self.v_peri_2_m_s,
                ),
                Burn::tangential(
                    "arrival",
                    self.r_final_m,
                    self.v_apo_2_m_s,
                    self.v_final_m_s,
                ),
            ],
            vec![self.first_orbit, self.second_orbit],
            self.tof_seconds,
        )
    }
}

/// Compute a bi-elliptic transfer whose intermediate apoapsis is
/// `intermediate_multiplier × r_final_m`.
///
/// This does not optimize the intermediate radius; [`DEFAULT_INTERMEDIATE_MULTIPLIER`]
/// approximates the limit where the transfer is cheapest. For very large r2/r1
/// ratios (beyond ~11.94) the bi-elliptic transfer beats Hohmann.
pub fn bi_elliptic(
    r_initial_m: f64,
    r_final_m: f64,
    ctx: &GravitationalContext,
    intermediate_multiplier: f64,
) -> Result<BiEllipticTransfer, OrbitError> {
    if !(intermediate_multiplier.is_finite() && intermediate_multiplier > 0.0) {
        return Err(OrbitError::InvalidParameter {
            name: "intermediate multiplier",
            value: intermediate_multiplier,
        });
    }
    ensure_radius("final radius", r_final_m)?;
    bi_elliptic_via(
        r_initial_m,
        r_final_m,
        r_final_m * intermediate_multiplier,
        ctx,
    )
}

/// Compute a bi-elliptic transfer using a specified intermediate apoapsis radius `rb_m`.
///
/// Evaluates the three impulsive burns and TOF for the two transfer ellipses:
/// (r1 -> rb) and (rb -> r2). Users may sweep `rb_m` to study trade-offs.
pub fn bi_elliptic_via(
    r_initial_m: f64,
    r_final_m: f64,
    rb_m: f64,
    ctx: &GravitationalContext,
) -> Result<BiEllipticTransfer, OrbitError> {
    ensure_radius("initial radius", r_initial_m)?;
    ensure_radius("final radius", r_final_m)?;
    ensure_radius("intermediate radius", rb_m)?;
    if rb_m < r_initial_m.max(r_final_m) {
        return Err(OrbitError::InvalidParameter {
            name: "intermediate radius",
            value: rb_m,
        });
    }

    let v1 = circular_speed(r_initial_m, ctx)?;
    let v2 = circular_speed(r_final_m, ctx)?;

    // First ellipse: r1 -> rb
    let first_orbit = Orbit::new(r_initial_m, rb_m)?;
    let a1 = first_orbit.semi_major_axis();
    let v_peri_1 = orbital_speed(r_initial_m, ctx, a1)?;
    let v_apo_1 = orbital_speed(rb_m, ctx, a1)?;

    // Second ellipse: rb -> r2
    let second_orbit = Orbit::new(r_final_m, rb_m)?;
    let a2 = second_orbit.semi_major_axis();
    let v_peri_2 = orbital_speed(rb_m, ctx, a2)?;
    let v_apo_2 = orbital_speed(r_final_m, ctx, a2)?;

    // Burns (signed)
    let dv1 = v_peri_1 - v1; // at r1
    let dv2 = v_peri_2 - v_apo_1; // at rb (match velocities)
    let dv3 = v2 - v_apo_2; // at r2

    Ok(BiEllipticTransfer {
        r_initial_m,
        r_final_m,
        rb_m,
        first_orbit,
        second_orbit,
        v_initial_m_s: v1,
        v_final_m_s: v2,
        v_peri_1_m_s: v_peri_1,
        v_apo_1_m_s: v_apo_1,
        v_peri_2_m_s: v_peri_2,
        v_apo_2_m_s: v_apo_2,
        dv1_m_s: dv1,
        dv2_m_s: dv2,
        dv3_m_s: dv3,
        dv_total_m_s: dv1.abs() + dv2.abs() + dv3.abs(),
        tof_seconds: first_orbit.half_period(ctx) + second_orbit.half_period(ctx),
    })
}

/// Total bi-elliptic delta-v (m/s).
pub fn bielliptic_delta_v(
    r_initial_m: f64,
    r_final_m: f64,
    ctx: &GravitationalContext,
    intermediate_multiplier: f64,
) -> Result<f64, OrbitError> {
    bi_elliptic(r_initial_m, r_final_m, ctx, intermediate_multiplier).map(|b| b.dv_total_m_s)
}
