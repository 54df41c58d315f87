use transfer_calculator::orbits::{
    DEFAULT_ORBIT_POINTS, GravitationalContext, Orbit, OrbitError, circular_speed,
    generate_orbit_points, kinetic_energy, orbital_speed,
};

#[test]
fn equal_apsides_trace_a_circle() {
    let r = 42_164e3;
    let points = generate_orbit_points(r, r, DEFAULT_ORBIT_POINTS).unwrap();
    assert_eq!(points.len(), DEFAULT_ORBIT_POINTS);
    for &(x, y) in points.iter() {
        assert!((x.hypot(y) - r).abs() < 1e-6 * r);
    }
}

#[test]
fn apsides_land_on_the_x_axis() {
    let (rp, ra) = (7_000e3, 42_164e3);
    // odd count puts a sample exactly at theta = pi
    let points = generate_orbit_points(rp, ra, 1001).unwrap();
    let (x0, y0) = points.as_slice()[0];
    assert!((x0 - rp).abs() < 1e-6);
    assert!(y0.abs() < 1e-6);
    let (xa, ya) = points.as_slice()[500];
    assert!((xa + ra).abs() < 1e-3);
    assert!(ya.abs() < 1e-3);
}

#[test]
fn inverted_apsides_are_rejected() {
    assert!(matches!(
        generate_orbit_points(42_164e3, 7_000e3, 100),
        Err(OrbitError::InvalidOrbit { .. })
    ));
    assert!(matches!(
        generate_orbit_points(7_000e3, 42_164e3, 1),
        Err(OrbitError::InvalidParameter { .. })
    ));
}

#[test]
fn vis_viva_matches_circular_speed_at_the_radius() {
    let ctx = GravitationalContext::earth();
    let a = 7_000e3;
    let v = orbital_speed(a, &ctx, a).unwrap();
    assert!((v - (ctx.mu() / a).sqrt()).abs() < 1e-9);
    let circular = circular_speed(a, &ctx).unwrap();
    assert!((v - circular).abs() / circular < 1e-12);
}

#[test]
fn kinetic_energy_of_the_reference_spacecraft() {
    assert_eq!(kinetic_energy(1_000.0, 1_000.0).unwrap(), 5e8);
    assert!(kinetic_energy(1_000.0, -1.0).is_err());
}

#[test]
fn other_bodies_use_their_own_context() {
    let moon = GravitationalContext::from_mass(6.674_30e-11, 7.342e22).unwrap();
    let orbit = Orbit::circular(1_837.4e3).unwrap();
    let period_min = orbit.period(&moon) / 60.0;
    assert!((period_min - 118.0).abs() < 2.0, "{period_min}");
}
