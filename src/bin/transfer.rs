use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use chrono::{SecondsFormat, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use transfer_calculator::config::{BodyConfig, load_bodies};
use transfer_calculator::export::json::{self, ManeuverDocument};
use transfer_calculator::export::report::{ManeuverReport, OberthReport, OrbitReport, SweepReport};
use transfer_calculator::export::{csv as export_csv, writer_for_path};
use transfer_calculator::impulsive::{
    DEFAULT_INTERMEDIATE_MULTIPLIER, ManeuverResult, bi_elliptic, bi_elliptic_via,
    compare_transfers, hohmann, logspace, one_tangent_burn,
};
use transfer_calculator::orbits::{GravitationalContext, Orbit};
use transfer_calculator::scenario::{self, ScenarioOutcome};
use transfer_core::units::km_to_m;

const DEFAULT_BODY: &str = "EARTH";

/// Impulsive transfer calculator for circular, coplanar orbits.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Hohmann, bi-elliptic and one-tangent-burn transfer budgets"
)]
struct Cli {
    /// Body catalogue (YAML list, TOML file, or directory of TOML files)
    #[arg(long, global = true, default_value = "configs/bodies")]
    bodies: PathBuf,

    /// Central body name (case-insensitive, default EARTH); scenarios name their own
    #[arg(long, global = true)]
    body: Option<String>,

    /// Override the gravitational parameter (m^3/s^2), scenarios included
    #[arg(long, global = true)]
    mu: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Two-burn Hohmann transfer
    Hohmann {
        #[command(flatten)]
        radii: Radii,
        #[command(flatten)]
        output: JsonOutput,
    },
    /// Three-burn bi-elliptic transfer
    BiElliptic {
        #[command(flatten)]
        radii: Radii,
        /// Intermediate apoapsis as a multiple of the final radius
        #[arg(long, default_value_t = DEFAULT_INTERMEDIATE_MULTIPLIER)]
        multiplier: f64,
        /// Explicit intermediate apoapsis in km (overrides --multiplier)
        #[arg(long)]
        intermediate_km: Option<f64>,
        #[command(flatten)]
        output: JsonOutput,
    },
    /// One-tangent-burn transfer arriving at the given true anomaly
    OneTangent {
        #[command(flatten)]
        radii: Radii,
        /// True anomaly of the transfer orbit at arrival (degrees)
        #[arg(long)]
        nu_deg: f64,
        #[command(flatten)]
        output: JsonOutput,
    },
    /// Geometry and speeds of a single orbit
    Orbit {
        #[arg(long)]
        periapsis_km: f64,
        #[arg(long)]
        apoapsis_km: f64,
        /// Interpret radii as altitudes above the surface
        #[arg(long, default_value_t = false)]
        altitude: bool,
        /// Write sampled trajectory points to CSV (use '-' for stdout)
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long, default_value_t = 1000)]
        points: usize,
    },
    /// Compare Hohmann and bi-elliptic totals over log-spaced radius ratios
    Sweep {
        #[arg(long, default_value_t = 7000.0)]
        r_initial_km: f64,
        #[arg(long, default_value_t = 0.0)]
        min_exp: f64,
        #[arg(long, default_value_t = 2.0)]
        max_exp: f64,
        #[arg(long, default_value_t = 1000)]
        samples: usize,
        #[arg(long, default_value_t = DEFAULT_INTERMEDIATE_MULTIPLIER)]
        multiplier: f64,
        /// Write the sweep table to CSV (use '-' for stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run scenario manifests
    Scenario {
        /// Scenario manifest (YAML list, TOML file, or directory of TOML files)
        #[arg(long, default_value = "configs/scenarios")]
        scenarios: PathBuf,
        /// Run only the scenario with this name
        #[arg(long)]
        name: Option<String>,
        /// Directory for CSV and JSON artifacts
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct Radii {
    /// Initial circular orbit radius (km)
    #[arg(long)]
    r_initial_km: f64,
    /// Final circular orbit radius (km)
    #[arg(long)]
    r_final_km: f64,
    /// Interpret radii as altitudes above the surface
    #[arg(long, default_value_t = false)]
    altitude: bool,
}

#[derive(Args, Debug)]
struct JsonOutput {
    /// Write the result as JSON (use '-' for stdout)
    #[arg(long)]
    json: Option<PathBuf>,
}

struct Central {
    name: String,
    radius_m: f64,
    ctx: GravitationalContext,
}

impl Central {
    fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let bodies = load_bodies(&cli.bodies)
            .with_context(|| format!("loading body catalogue {}", cli.bodies.display()))?;
        let name = cli.body.as_deref().unwrap_or(DEFAULT_BODY);
        let body = scenario::resolve_body(&bodies, name)?;
        let ctx = match cli.mu {
            Some(mu) => GravitationalContext::from_mu(mu)?,
            None => scenario::context_for(body)?,
        };
        info!(body = %body.name, mu = ctx.mu(), "central body");
        Ok(Self {
            name: body.name.clone(),
            radius_m: body.radius_m,
            ctx,
        })
    }

    fn radius(&self, km: f64, altitude: bool) -> f64 {
        km_to_m(km) + if altitude { self.radius_m } else { 0.0 }
    }

    fn radii(&self, radii: &Radii) -> (f64, f64) {
        (
            self.radius(radii.r_initial_km, radii.altitude),
            self.radius(radii.r_final_km, radii.altitude),
        )
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Command::Hohmann { radii, output } => {
            let central = Central::resolve(cli)?;
            let (r_i, r_f) = central.radii(radii);
            let result = hohmann(r_i, r_f, &central.ctx)?.to_result();
            emit_maneuver("hohmann", &central, &result, output)
        }
        Command::BiElliptic {
            radii,
            multiplier,
            intermediate_km,
            output,
        } => {
            let central = Central::resolve(cli)?;
            let (r_i, r_f) = central.radii(radii);
            let transfer = match intermediate_km {
                Some(rb_km) => {
                    let rb = central.radius(*rb_km, radii.altitude);
                    bi_elliptic_via(r_i, r_f, rb, &central.ctx)?
                }
                None => bi_elliptic(r_i, r_f, &central.ctx, *multiplier)?,
            };
            emit_maneuver("bi_elliptic", &central, &transfer.to_result(), output)
        }
        Command::OneTangent {
            radii,
            nu_deg,
            output,
        } => {
            let central = Central::resolve(cli)?;
            let (r_i, r_f) = central.radii(radii);
            let result = one_tangent_burn(r_i, r_f, &central.ctx, *nu_deg)?.to_result();
            emit_maneuver("one_tangent", &central, &result, output)
        }
        Command::Orbit {
            periapsis_km,
            apoapsis_km,
            altitude,
            csv,
            points,
        } => {
            let central = Central::resolve(cli)?;
            let orbit = Orbit::new(
                central.radius(*periapsis_km, *altitude),
                central.radius(*apoapsis_km, *altitude),
            )?;
            println!(
                "{}",
                OrbitReport {
                    orbit: &orbit,
                    ctx: &central.ctx
                }
            );
            if let Some(path) = csv {
                export_csv::write_trajectory(writer_for_path(path)?, &orbit.points(*points)?)?;
            }
            Ok(())
        }
        Command::Sweep {
            r_initial_km,
            min_exp,
            max_exp,
            samples,
            multiplier,
            output,
        } => {
            let central = Central::resolve(cli)?;
            let ratios = logspace(*min_exp, *max_exp, *samples);
            let points =
                compare_transfers(&ratios, km_to_m(*r_initial_km), &central.ctx, *multiplier)?;
            match output {
                Some(path) if path == Path::new("-") => {
                    export_csv::write_sweep(writer_for_path(path)?, &points)?;
                }
                Some(path) => {
                    export_csv::write_sweep(writer_for_path(path)?, &points)?;
                    println!("{}", SweepReport(&points));
                    println!("Wrote {}", path.display());
                }
                None => println!("{}", SweepReport(&points)),
            }
            Ok(())
        }
        Command::Scenario {
            scenarios,
            name,
            output_dir,
        } => run_scenarios(cli, scenarios, name.as_deref(), output_dir.as_deref()),
    }
}

fn emit_maneuver(
    label: &str,
    central: &Central,
    result: &ManeuverResult,
    output: &JsonOutput,
) -> anyhow::Result<()> {
    match &output.json {
        Some(path) => {
            write_json(path, label, central, result)?;
            if path != Path::new("-") {
                println!("{}", ManeuverReport(result));
            }
        }
        None => println!("{}", ManeuverReport(result)),
    }
    Ok(())
}

fn write_json(
    path: &Path,
    label: &str,
    central: &Central,
    result: &ManeuverResult,
) -> anyhow::Result<()> {
    let generated_utc = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let document = ManeuverDocument {
        scenario: label,
        body: &central.name,
        mu_m3_s2: central.ctx.mu(),
        generated_utc: &generated_utc,
        result,
    };
    json::write_maneuver(writer_for_path(path)?, &document)?;
    Ok(())
}

fn run_scenarios(
    cli: &Cli,
    scenarios: &Path,
    name: Option<&str>,
    output_dir: Option<&Path>,
) -> anyhow::Result<()> {
    if let Some(body) = &cli.body {
        return Err(anyhow!(
            "--body {body} does not apply to scenarios; each manifest names its own body"
        ));
    }
    let (configs, mut bodies) = scenario::load(scenarios, &cli.bodies)?;
    if let Some(mu) = cli.mu {
        GravitationalContext::from_mu(mu)?;
        info!(mu, "overriding every body's gravitational parameter");
        for body in &mut bodies {
            body.mu_m3_s2 = Some(mu);
        }
    }
    let selected: Vec<_> = configs
        .iter()
        .filter(|cfg| name.is_none_or(|n| cfg.name == n))
        .collect();
    if selected.is_empty() {
        return Err(anyhow!(
            "no scenario named '{}' in {}",
            name.unwrap_or_default(),
            scenarios.display()
        ));
    }
    if let Some(dir) = output_dir {
        fs::create_dir_all(dir)?;
    }

    for cfg in selected {
        let outcome = scenario::run(cfg, &bodies)
            .with_context(|| format!("scenario '{}'", cfg.name))?;
        println!("=== {} ({}) ===", cfg.name, cfg.maneuver.kind());
        match &outcome {
            ScenarioOutcome::Transfer { result, .. } => {
                println!("{}", ManeuverReport(result));
                if let Some(dir) = output_dir {
                    let central = scenario_central(&bodies, &cfg.body)?;
                    let path = dir.join(format!("{}.json", cfg.name));
                    write_json(&path, &cfg.name, &central, result)?;
                }
            }
            ScenarioOutcome::OrbitChange {
                initial, changed, ..
            } => {
                let central = scenario_central(&bodies, &cfg.body)?;
                for (label, orbit) in [("Initial orbit", initial), ("Orbit after impulse", changed)] {
                    println!("{label}");
                    println!(
                        "{}",
                        OrbitReport {
                            orbit,
                            ctx: &central.ctx
                        }
                    );
                }
            }
            ScenarioOutcome::Oberth {
                delta_v_m_s,
                samples,
                ..
            } => {
                println!(
                    "{}",
                    OberthReport {
                        delta_v_m_s: *delta_v_m_s,
                        samples
                    }
                );
                if let Some(dir) = output_dir {
                    let path = dir.join(format!("{}_energy.csv", cfg.name));
                    export_csv::write_energy_profile(writer_for_path(&path)?, samples)?;
                }
            }
            ScenarioOutcome::Sweep { points, .. } => {
                println!("{}", SweepReport(points));
                if let Some(dir) = output_dir {
                    let path = dir.join(format!("{}_sweep.csv", cfg.name));
                    export_csv::write_sweep(writer_for_path(&path)?, points)?;
                }
            }
        }
        println!();
    }
    Ok(())
}

fn scenario_central(bodies: &[BodyConfig], name: &str) -> anyhow::Result<Central> {
    let body = scenario::resolve_body(bodies, name)?;
    Ok(Central {
        name: body.name.clone(),
        radius_m: body.radius_m,
        ctx: scenario::context_for(body)?,
    })
}
