//! Data-driven scenario drivers.
//!
//! A [`ScenarioConfig`] names a central body from the catalogue and one maneuver.
//! [`run`] resolves the body, converts altitudes to radii when asked to, calls the
//! calculators and returns everything the report and plotting layers need.

use std::f64::consts::PI;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};
use transfer_config::{BodyConfig, ConfigError, ManeuverConfig, ScenarioConfig, find_body};
use transfer_core::sampling::logspace;
use transfer_impulsive::{
    DEFAULT_INTERMEDIATE_MULTIPLIER, ManeuverResult, SweepPoint, bi_elliptic, bi_elliptic_via,
    compare_transfers, hohmann, one_tangent_burn,
};
use transfer_orbits::{
    EnergySample, GravitationalContext, Orbit, OrbitError, TrajectoryPoints, oberth_profile,
};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Orbit(#[from] OrbitError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unknown central body `{0}`")]
    UnknownBody(String),
}

/// How a trajectory is stroked. Split variants carry the sample index where the style flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    SolidThenDashed(usize),
    DashedThenSolid(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlottedOrbit {
    pub label: String,
    pub points: TrajectoryPoints,
    pub style: LineStyle,
}

/// Named point of interest, in metres.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub label: String,
    pub position: (f64, f64),
}

/// Orbits around a central body, focus at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitDiagram {
    pub title: String,
    pub body_name: String,
    pub body_radius_m: f64,
    pub orbits: Vec<PlottedOrbit>,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioOutcome {
    Transfer {
        result: ManeuverResult,
        diagram: OrbitDiagram,
    },
    OrbitChange {
        initial: Orbit,
        changed: Orbit,
        diagram: OrbitDiagram,
    },
    Oberth {
        orbit: Orbit,
        delta_v_m_s: f64,
        samples: Vec<EnergySample>,
    },
    Sweep {
        r_initial_m: f64,
        points: Vec<SweepPoint>,
    },
}

impl ScenarioOutcome {
    pub fn diagram(&self) -> Option<&OrbitDiagram> {
        match self {
            ScenarioOutcome::Transfer { diagram, .. }
            | ScenarioOutcome::OrbitChange { diagram, .. } => Some(diagram),
            _ => None,
        }
    }
}

/// Load the body catalogue and the scenario manifests.
pub fn load(
    scenarios: &Path,
    bodies: &Path,
) -> Result<(Vec<ScenarioConfig>, Vec<BodyConfig>), ScenarioError> {
    let scenarios = transfer_config::load_scenarios(scenarios)?;
    let bodies = transfer_config::load_bodies(bodies)?;
    debug!(scenarios = scenarios.len(), bodies = bodies.len(), "configuration loaded");
    Ok((scenarios, bodies))
}

/// Look a body up by name, failing with [`ScenarioError::UnknownBody`].
pub fn resolve_body<'a>(
    bodies: &'a [BodyConfig],
    name: &str,
) -> Result<&'a BodyConfig, ScenarioError> {
    find_body(bodies, name).ok_or_else(|| ScenarioError::UnknownBody(name.to_string()))
}

/// Gravitational context for a catalogue body.
pub fn context_for(body: &BodyConfig) -> Result<GravitationalContext, OrbitError> {
    match body.mu_m3_s2 {
        Some(mu) => GravitationalContext::from_mu(mu),
        None => GravitationalContext::from_mass(body.gravitational_constant, body.mass_kg),
    }
}

/// Run one scenario against the catalogue.
pub fn run(
    scenario: &ScenarioConfig,
    bodies: &[BodyConfig],
) -> Result<ScenarioOutcome, ScenarioError> {
    let body = resolve_body(bodies, &scenario.body)?;
    let ctx = context_for(body)?;
    info!(
        scenario = %scenario.name,
        kind = scenario.maneuver.kind(),
        body = %body.name,
        mu = ctx.mu(),
        "running scenario"
    );
    let offset = if scenario.radii_are_altitudes {
        body.radius_m
    } else {
        0.0
    };
    let radius = |value: f64| value + offset;
    let sketch = Sketch {
        scenario,
        body,
        points: scenario.orbit_points,
    };

    let outcome = match scenario.maneuver {
        ManeuverConfig::OrbitChange {
            periapsis_m,
            apoapsis_m,
            new_periapsis_m,
            new_apoapsis_m,
            burn_window_deg,
        } => {
            let initial = Orbit::new(radius(periapsis_m), radius(apoapsis_m))?;
            let changed = Orbit::new(radius(new_periapsis_m), radius(new_apoapsis_m))?;
            let diagram = sketch.orbit_change(&initial, &changed, burn_window_deg)?;
            ScenarioOutcome::OrbitChange {
                initial,
                changed,
                diagram,
            }
        }
        ManeuverConfig::Oberth {
            periapsis_m,
            apoapsis_m,
            delta_v_m_s,
            spacecraft_mass_kg,
            samples,
        } => {
            let orbit = Orbit::new(radius(periapsis_m), radius(apoapsis_m))?;
            let samples =
                oberth_profile(&orbit, &ctx, delta_v_m_s, spacecraft_mass_kg, samples)?;
            if let (Some(peri), Some(apo)) = (samples.first(), samples.last()) {
                info!(
                    gain_periapsis_j = peri.energy_gain_j,
                    gain_apoapsis_j = apo.energy_gain_j,
                    "oberth profile computed"
                );
            }
            ScenarioOutcome::Oberth {
                orbit,
                delta_v_m_s,
                samples,
            }
        }
        ManeuverConfig::Hohmann {
            r_initial_m,
            r_final_m,
        } => {
            let transfer = hohmann(radius(r_initial_m), radius(r_final_m), &ctx)?;
            let result = transfer.to_result();
            let half = sketch.points / 2;
            // Samples start at periapsis; an outward transfer flies the first half.
            let (style, departure, arrival) = if transfer.r_final_m >= transfer.r_initial_m {
                (
                    LineStyle::SolidThenDashed(half),
                    (transfer.r_initial_m, 0.0),
                    (-transfer.r_final_m, 0.0),
                )
            } else {
                (
                    LineStyle::DashedThenSolid(half),
                    (-transfer.r_initial_m, 0.0),
                    (transfer.r_final_m, 0.0),
                )
            };
            let diagram = sketch.transfer(
                &result,
                &[style],
                vec![
                    marker("Departure burn", departure),
                    marker("Arrival burn", arrival),
                ],
            )?;
            ScenarioOutcome::Transfer { result, diagram }
        }
        ManeuverConfig::BiElliptic {
            r_initial_m,
            r_final_m,
            intermediate_multiplier,
            intermediate_radius_m,
        } => {
            let (r_i, r_f) = (radius(r_initial_m), radius(r_final_m));
            let transfer = match intermediate_radius_m {
                Some(rb) => bi_elliptic_via(r_i, r_f, radius(rb), &ctx)?,
                None => bi_elliptic(
                    r_i,
                    r_f,
                    &ctx,
                    intermediate_multiplier.unwrap_or(DEFAULT_INTERMEDIATE_MULTIPLIER),
                )?,
            };
            debug!(rb_m = transfer.rb_m, "intermediate apoapsis");
            let result = transfer.to_result();
            let half = sketch.points / 2;
            let diagram = sketch.transfer(
                &result,
                &[
                    LineStyle::SolidThenDashed(half),
                    LineStyle::DashedThenSolid(half),
                ],
                vec![
                    marker("Departure burn", (transfer.r_initial_m, 0.0)),
                    marker("Intermediate burn", (-transfer.rb_m, 0.0)),
                    marker("Arrival burn", (transfer.r_final_m, 0.0)),
                ],
            )?;
            ScenarioOutcome::Transfer { result, diagram }
        }
        ManeuverConfig::OneTangent {
            r_initial_m,
            r_final_m,
            true_anomaly_deg,
        } => {
            let transfer = one_tangent_burn(
                radius(r_initial_m),
                radius(r_final_m),
                &ctx,
                true_anomaly_deg,
            )?;
            debug!(
                nu_min_deg = transfer.bounds.min_deg,
                nu_max_deg = transfer.bounds.max_deg,
                eccentricity = transfer.eccentricity,
                "one-tangent-burn geometry"
            );
            let result = transfer.to_result();
            let arrival = eccentric_anomaly(transfer.eccentricity, true_anomaly_deg.to_radians());
            let split = sample_index(arrival, sketch.points);
            let diagram = sketch.transfer(
                &result,
                &[LineStyle::SolidThenDashed(split)],
                vec![
                    marker("Departure burn", (transfer.r_initial_m, 0.0)),
                    marker("Arrival burn", transfer.transfer_orbit.point_at(arrival)),
                ],
            )?;
            ScenarioOutcome::Transfer { result, diagram }
        }
        ManeuverConfig::Sweep {
            ratio_min_exp,
            ratio_max_exp,
            samples,
            r_initial_m,
            intermediate_multiplier,
        } => {
            let r_initial_m = radius(r_initial_m);
            let ratios = logspace(ratio_min_exp, ratio_max_exp, samples);
            let points = compare_transfers(
                &ratios,
                r_initial_m,
                &ctx,
                intermediate_multiplier.unwrap_or(DEFAULT_INTERMEDIATE_MULTIPLIER),
            )?;
            ScenarioOutcome::Sweep {
                r_initial_m,
                points,
            }
        }
    };

    if let ScenarioOutcome::Transfer { result, .. } = &outcome {
        info!(
            dv_total_m_s = result.dv_total_m_s,
            tof_seconds = result.tof_seconds,
            "transfer computed"
        );
    }
    Ok(outcome)
}

struct Sketch<'a> {
    scenario: &'a ScenarioConfig,
    body: &'a BodyConfig,
    points: usize,
}

impl Sketch<'_> {
    fn diagram(&self, orbits: Vec<PlottedOrbit>, markers: Vec<Marker>) -> OrbitDiagram {
        OrbitDiagram {
            title: self
                .scenario
                .description
                .clone()
                .unwrap_or_else(|| self.scenario.name.clone()),
            body_name: self.body.name.clone(),
            body_radius_m: self.body.radius_m,
            orbits,
            markers,
        }
    }

    fn orbit(
        &self,
        label: &str,
        orbit: &Orbit,
        style: LineStyle,
    ) -> Result<PlottedOrbit, OrbitError> {
        Ok(PlottedOrbit {
            label: label.to_string(),
            points: orbit.points(self.points)?,
            style,
        })
    }

    fn orbit_change(
        &self,
        initial: &Orbit,
        changed: &Orbit,
        burn_window_deg: f64,
    ) -> Result<OrbitDiagram, OrbitError> {
        let window = burn_window_deg.to_radians();
        let orbits = vec![
            self.orbit("Initial orbit", initial, LineStyle::Solid)?,
            self.orbit("Orbit after impulse", changed, LineStyle::Dashed)?,
        ];
        let markers = vec![
            marker("Periapsis", (initial.periapsis(), 0.0)),
            marker("Apoapsis", (-initial.apoapsis(), 0.0)),
            marker("Burn start", initial.point_at(-window)),
            marker("Burn end", initial.point_at(window)),
        ];
        Ok(self.diagram(orbits, markers))
    }

    /// Initial circle, every transfer ellipse with its style, then the final circle.
    fn transfer(
        &self,
        result: &ManeuverResult,
        styles: &[LineStyle],
        markers: Vec<Marker>,
    ) -> Result<OrbitDiagram, OrbitError> {
        let mut orbits = vec![self.orbit(
            "Initial orbit",
            &Orbit::circular(result.r_initial_m)?,
            LineStyle::Solid,
        )?];
        for (idx, (orbit, style)) in result.transfer_orbits.iter().zip(styles).enumerate() {
            let label = if result.transfer_orbits.len() == 1 {
                "Transfer orbit".to_string()
            } else {
                format!("Transfer orbit {}", idx + 1)
            };
            orbits.push(self.orbit(&label, orbit, *style)?);
        }
        orbits.push(self.orbit(
            "Final orbit",
            &Orbit::circular(result.r_final_m)?,
            LineStyle::Solid,
        )?);
        Ok(self.diagram(orbits, markers))
    }
}

fn marker(label: &str, position: (f64, f64)) -> Marker {
    Marker {
        label: label.to_string(),
        position,
    }
}

fn eccentric_anomaly(eccentricity: f64, true_anomaly: f64) -> f64 {
    ((eccentricity + true_anomaly.cos()) / (1.0 + eccentricity * true_anomaly.cos()))
        .clamp(-1.0, 1.0)
        .acos()
}

/// Index of the sample closest to eccentric anomaly `angle` in an `n`-point revolution.
fn sample_index(angle: f64, n: usize) -> usize {
    let last = n.saturating_sub(1) as f64;
    ((angle / (2.0 * PI)) * last).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use transfer_core::constants::G;

    fn earth() -> Vec<BodyConfig> {
        vec![BodyConfig {
            name: "EARTH".to_string(),
            mass_kg: 5.972e24,
            radius_m: 6_371e3,
            mu_m3_s2: None,
            gravitational_constant: G,
        }]
    }

    fn scenario(maneuver: ManeuverConfig) -> ScenarioConfig {
        ScenarioConfig {
            name: "test".to_string(),
            description: None,
            body: "earth".to_string(),
            radii_are_altitudes: false,
            orbit_points: 101,
            maneuver,
        }
    }

    fn transfer(outcome: &ScenarioOutcome) -> (&ManeuverResult, &OrbitDiagram) {
        match outcome {
            ScenarioOutcome::Transfer { result, diagram } => (result, diagram),
            other => panic!("expected a transfer, got {other:?}"),
        }
    }

    #[test]
    fn hohmann_scenario_draws_three_orbits() {
        let outcome = run(
            &scenario(ManeuverConfig::Hohmann {
                r_initial_m: 7_000e3,
                r_final_m: 42_164e3,
            }),
            &earth(),
        )
        .unwrap();
        let (result, diagram) = transfer(&outcome);
        assert_eq!(result.burns.len(), 2);
        assert_eq!(diagram.orbits.len(), 3);
        assert_eq!(diagram.orbits[1].style, LineStyle::SolidThenDashed(50));
        assert_eq!(diagram.orbits[1].points.len(), 101);
        assert_eq!(diagram.markers[1].position, (-42_164e3, 0.0));
        assert_eq!(diagram.body_name, "EARTH");
    }

    #[test]
    fn inward_hohmann_flies_the_second_half() {
        let outcome = run(
            &scenario(ManeuverConfig::Hohmann {
                r_initial_m: 42_164e3,
                r_final_m: 7_000e3,
            }),
            &earth(),
        )
        .unwrap();
        let (_, diagram) = transfer(&outcome);
        assert_eq!(diagram.orbits[1].style, LineStyle::DashedThenSolid(50));
        assert_eq!(diagram.markers[0].position, (-42_164e3, 0.0));
    }

    #[test]
    fn bi_elliptic_scenario_prefers_explicit_radius() {
        let outcome = run(
            &scenario(ManeuverConfig::BiElliptic {
                r_initial_m: 7_000e3,
                r_final_m: 140_000e3,
                intermediate_multiplier: Some(2.0),
                intermediate_radius_m: Some(7.0e10),
            }),
            &earth(),
        )
        .unwrap();
        let (result, diagram) = transfer(&outcome);
        assert_eq!(result.transfer_orbits.len(), 2);
        assert_eq!(result.transfer_orbits[0].apoapsis(), 7.0e10);
        assert_eq!(diagram.orbits.len(), 4);
        assert_eq!(diagram.markers.len(), 3);
    }

    #[test]
    fn one_tangent_arrival_marker_sits_on_the_final_circle() {
        let outcome = run(
            &scenario(ManeuverConfig::OneTangent {
                r_initial_m: 7_000e3,
                r_final_m: 70_000e3,
                true_anomaly_deg: 145.0,
            }),
            &earth(),
        )
        .unwrap();
        let (result, diagram) = transfer(&outcome);
        assert!((result.dv_total_m_s - 6_360.72).abs() < 0.5, "{}", result.dv_total_m_s);
        let (x, y) = diagram.markers[1].position;
        assert!((x.hypot(y) - 70_000e3).abs() < 1.0);
        assert!(y > 0.0);
        match diagram.orbits[1].style {
            LineStyle::SolidThenDashed(split) => assert!(split > 0 && split < 50),
            other => panic!("unexpected style {other:?}"),
        }
    }

    #[test]
    fn altitudes_are_measured_from_the_surface() {
        let mut config = scenario(ManeuverConfig::Hohmann {
            r_initial_m: 629e3,
            r_final_m: 35_793e3,
        });
        config.radii_are_altitudes = true;
        let outcome = run(&config, &earth()).unwrap();
        let (result, _) = transfer(&outcome);
        assert_eq!(result.r_initial_m, 7_000e3);
        assert_eq!(result.r_final_m, 42_164e3);
    }

    #[test]
    fn orbit_change_marks_the_burn_window() {
        let outcome = run(
            &scenario(ManeuverConfig::OrbitChange {
                periapsis_m: 7_000e3,
                apoapsis_m: 42_164e3,
                new_periapsis_m: 8_000e3,
                new_apoapsis_m: 50_000e3,
                burn_window_deg: 5.0,
            }),
            &earth(),
        )
        .unwrap();
        let diagram = outcome.diagram().unwrap();
        assert_eq!(diagram.orbits[1].style, LineStyle::Dashed);
        let start = diagram.markers[2].position;
        let end = diagram.markers[3].position;
        assert!(start.1 < 0.0 && end.1 > 0.0);
        assert!((start.0 - end.0).abs() < 1e-6);
    }

    #[test]
    fn oberth_and_sweep_scenarios_have_no_diagram() {
        let oberth = run(
            &scenario(ManeuverConfig::Oberth {
                periapsis_m: 7_000e3,
                apoapsis_m: 42_164e3,
                delta_v_m_s: 1_000.0,
                spacecraft_mass_kg: 1_000.0,
                samples: 20,
            }),
            &earth(),
        )
        .unwrap();
        assert!(oberth.diagram().is_none());
        let sweep = run(
            &scenario(ManeuverConfig::Sweep {
                ratio_min_exp: 0.0,
                ratio_max_exp: 2.0,
                samples: 30,
                r_initial_m: 7_000e3,
                intermediate_multiplier: None,
            }),
            &earth(),
        )
        .unwrap();
        match sweep {
            ScenarioOutcome::Sweep { points, .. } => assert_eq!(points.len(), 30),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn failures_surface_without_fallback() {
        let mut config = scenario(ManeuverConfig::Hohmann {
            r_initial_m: 7_000e3,
            r_final_m: 42_164e3,
        });
        config.body = "PLUTO".to_string();
        assert!(matches!(
            run(&config, &earth()),
            Err(ScenarioError::UnknownBody(name)) if name == "PLUTO"
        ));

        let infeasible = scenario(ManeuverConfig::OneTangent {
            r_initial_m: 7_000e3,
            r_final_m: 70_000e3,
            true_anomaly_deg: 90.0,
        });
        assert!(matches!(
            run(&infeasible, &earth()),
            Err(ScenarioError::Orbit(OrbitError::InvalidAnomaly { .. }))
        ));
    }
}
