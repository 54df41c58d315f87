use transfer_calculator::impulsive::{
    ManeuverKind, bi_elliptic, bielliptic_delta_v, hohmann, hohmann_delta_v, one_tangent_burn,
    one_tangent_burn_bounds, one_tangent_burn_delta_v,
};
use transfer_calculator::orbits::{GravitationalContext, OrbitError};

const MU_EARTH: f64 = 3.986e14;
const R_EARTH: f64 = 6_371e3;

fn earth() -> GravitationalContext {
    GravitationalContext::from_mu(MU_EARTH).unwrap()
}

#[test]
fn hohmann_symmetry_and_time_match() {
    let ctx = earth();
    let (r1, r2) = (7_000e3, 42_164e3);
    let h12 = hohmann(r1, r2, &ctx).unwrap();
    let h21 = hohmann(r2, r1, &ctx).unwrap();

    assert_eq!(h12.dv_total_m_s, h21.dv_total_m_s);
    assert!((h12.tof_seconds - h21.tof_seconds).abs() < 1e-6);

    // outward transfer burns prograde first, inward burns retrograde first
    assert!(h12.dv1_m_s > 0.0);
    assert!(h21.dv1_m_s < 0.0);
    assert!((h12.dv1_m_s + h21.dv2_m_s).abs() < 1e-9);
}

#[test]
fn bielliptic_beats_hohmann_above_the_crossover() {
    let ctx = earth();
    let r_i = 7_000e3;
    let r_f = r_i * 20.0;
    let ho = hohmann_delta_v(r_i, r_f, &ctx).unwrap();
    let bi = bielliptic_delta_v(r_i, r_f, &ctx, 1000.0).unwrap();
    assert!(bi < ho, "bi-elliptic {bi} should undercut Hohmann {ho}");
}

#[test]
fn hohmann_wins_below_the_crossover() {
    let ctx = earth();
    let r_i = 7_000e3;
    for ratio in [5.0, 10.0] {
        let ho = hohmann_delta_v(r_i, r_i * ratio, &ctx).unwrap();
        let bi = bielliptic_delta_v(r_i, r_i * ratio, &ctx, 1000.0).unwrap();
        assert!(ho < bi, "ratio {ratio}: Hohmann {ho} vs bi-elliptic {bi}");
    }
}

#[test]
fn bi_elliptic_burns_and_tof_are_consistent() {
    let ctx = earth();
    let bi = bi_elliptic(7_000e3, 140_000e3, &ctx, 1000.0).unwrap();
    assert!((bi.dv_total_m_s - 3_824.99).abs() < 0.1, "{}", bi.dv_total_m_s);
    let result = bi.to_result();
    assert_eq!(result.kind, ManeuverKind::BiElliptic);
    assert_eq!(result.burns.len(), 3);
    assert!((result.dv_total_m_s - bi.dv_total_m_s).abs() < 1e-9);
    let half_periods: f64 = result
        .transfer_orbits
        .iter()
        .map(|o| o.half_period(&ctx))
        .sum();
    assert!((result.tof_seconds - half_periods).abs() < 1e-6);
}

#[test]
fn source_one_tangent_scenario_is_validated_before_computing() {
    let ctx = GravitationalContext::earth();
    let r_i = 191.344_11e3 + R_EARTH;
    let r_f = 35_781.348_57e3 + R_EARTH;

    let bounds = one_tangent_burn_bounds(r_i, r_f).unwrap();
    assert!((bounds.min_deg - 133.522).abs() < 1e-2, "{}", bounds.min_deg);
    assert!((bounds.max_deg - 180.0).abs() < 1e-3);

    let transfer = one_tangent_burn(r_i, r_f, &ctx, 160.0).unwrap();
    assert!((transfer.dv_total_m_s - 4_702.74).abs() < 0.5, "{}", transfer.dv_total_m_s);
    assert!((transfer.eccentricity - 0.7708).abs() < 1e-3);

    match one_tangent_burn_delta_v(r_i, r_f, &ctx, 120.0) {
        Err(OrbitError::InvalidAnomaly {
            nu_deg,
            nu_min_deg,
            nu_max_deg,
        }) => {
            assert_eq!(nu_deg, 120.0);
            assert!((nu_min_deg - bounds.min_deg).abs() < 1e-12);
            assert!((nu_max_deg - bounds.max_deg).abs() < 1e-12);
        }
        other => panic!("expected InvalidAnomaly, got {other:?}"),
    }
}

#[test]
fn calculators_are_deterministic() {
    let ctx = earth();
    let a = one_tangent_burn_delta_v(7_000e3, 70_000e3, &ctx, 150.0).unwrap();
    let b = one_tangent_burn_delta_v(7_000e3, 70_000e3, &ctx, 150.0).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());
    let h1 = hohmann(7_000e3, 42_164e3, &ctx).unwrap();
    let h2 = hohmann(7_000e3, 42_164e3, &ctx).unwrap();
    assert_eq!(h1, h2);
}
