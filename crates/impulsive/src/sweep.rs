//! Batch comparison of Hohmann and bi-elliptic transfers across radius ratios.
//!
//! A thin loop over the scalar calculators; no formula lives here.

use serde::{Deserialize, Serialize};
use transfer_orbits::{GravitationalContext, OrbitError, circular_speed};

use crate::transfers::{bielliptic_delta_v, hohmann_delta_v};

pub use transfer_core::sampling::logspace;

/// Transfer costs at one ratio `R = r_final / r_initial`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub ratio: f64,
    pub hohmann_dv_m_s: f64,
    pub bi_elliptic_dv_m_s: f64,
    /// Hohmann delta-v divided by the initial circular speed.
    pub hohmann_normalized: f64,
    /// Bi-elliptic delta-v divided by the initial circular speed.
    pub bi_elliptic_normalized: f64,
}

impl SweepPoint {
    pub fn bi_elliptic_is_cheaper(&self) -> bool {
        self.bi_elliptic_dv_m_s < self.hohmann_dv_m_s
    }
}

/// Evaluate both transfers for every ratio in `ratios`, starting from a circular
/// orbit of radius `r_initial_m`.
///
/// Fails on the first ratio the calculators reject; no partial sweep is returned.
pub fn compare_transfers(
    ratios: &[f64],
    r_initial_m: f64,
    ctx: &GravitationalContext,
    intermediate_multiplier: f64,
) -> Result<Vec<SweepPoint>, OrbitError> {
    let v_circular = circular_speed(r_initial_m, ctx)?;
    ratios
        .iter()
        .map(|&ratio| {
            let r_final_m = ratio * r_initial_m;
            let hohmann_dv_m_s = hohmann_delta_v(r_initial_m, r_final_m, ctx)?;
            let bi_elliptic_dv_m_s =
                bielliptic_delta_v(r_initial_m, r_final_m, ctx, intermediate_multiplier)?;
            Ok(SweepPoint {
                ratio,
                hohmann_dv_m_s,
                bi_elliptic_dv_m_s,
                hohmann_normalized: hohmann_dv_m_s / v_circular,
                bi_elliptic_normalized: bi_elliptic_dv_m_s / v_circular,
            })
        })
        .collect()
}

/// First ratio in the sweep at which the bi-elliptic transfer is cheaper.
pub fn crossover_ratio(points: &[SweepPoint]) -> Option<f64> {
    points
        .iter()
        .find(|p| p.bi_elliptic_is_cheaper())
        .map(|p| p.ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfers::DEFAULT_INTERMEDIATE_MULTIPLIER;

    #[test]
    fn crossover_sits_just_above_the_classical_limit() {
        let ctx = GravitationalContext::from_mu(3.986e14).unwrap();
        let ratios = logspace(0.0, 2.0, 1000);
        let points =
            compare_transfers(&ratios, 7_000e3, &ctx, DEFAULT_INTERMEDIATE_MULTIPLIER).unwrap();
        assert_eq!(points.len(), 1000);
        let crossover = crossover_ratio(&points).expect("bi-elliptic wins somewhere");
        assert!((11.9..12.1).contains(&crossover), "crossover = {crossover}");
        assert!(points.iter().filter(|p| p.ratio < 11.9).all(|p| !p.bi_elliptic_is_cheaper()));
        assert!(points.iter().filter(|p| p.ratio > 12.1).all(|p| p.bi_elliptic_is_cheaper()));
    }

    #[test]
    fn normalization_is_independent_of_scale() {
        let ctx = GravitationalContext::from_mu(3.986e14).unwrap();
        let unit = compare_transfers(&[20.0], 1.0, &ctx, 1000.0).unwrap();
        let leo = compare_transfers(&[20.0], 7_000e3, &ctx, 1000.0).unwrap();
        assert!((unit[0].hohmann_normalized - 0.534_731).abs() < 1e-6);
        assert!((unit[0].bi_elliptic_normalized - 0.506_887).abs() < 1e-6);
        assert!((unit[0].hohmann_normalized - leo[0].hohmann_normalized).abs() < 1e-9);
    }

    #[test]
    fn sweep_fails_as_a_whole() {
        let ctx = GravitationalContext::from_mu(3.986e14).unwrap();
        assert!(compare_transfers(&[2.0, -1.0, 3.0], 7_000e3, &ctx, 1000.0).is_err());
    }
}
