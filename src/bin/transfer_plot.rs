use std::f64::consts::TAU;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use plotters::prelude::*;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use transfer_calculator::export::csv::read_sweep;
use transfer_calculator::impulsive::{
    DEFAULT_INTERMEDIATE_MULTIPLIER, SweepPoint, compare_transfers, crossover_ratio, logspace,
};
use transfer_calculator::orbits::{EnergySample, GravitationalContext};
use transfer_calculator::scenario::{self, LineStyle, OrbitDiagram, ScenarioOutcome};
use transfer_core::units::{j_to_mj, km_to_m};

/// Samples per dash when stroking a dashed trajectory.
const DASH_SAMPLES: usize = 10;

const PALETTE: [RGBColor; 5] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
];

#[derive(Parser, Debug)]
#[command(author, version, about = "Render orbit diagrams and transfer comparisons to PNG")]
struct Cli {
    #[arg(long, default_value_t = 1000)]
    width: u32,
    #[arg(long, default_value_t = 1000)]
    height: u32,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plot a scenario from the manifests
    Scenario {
        #[arg(long, default_value = "configs/scenarios")]
        scenarios: PathBuf,
        #[arg(long, default_value = "configs/bodies")]
        bodies: PathBuf,
        /// Scenario name
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "artifacts/scenario.png")]
        output: PathBuf,
    },
    /// Semilog chart of normalised Hohmann and bi-elliptic delta-v
    Sweep {
        /// Sweep CSV written by `transfer sweep --output`; computed when omitted
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, default_value_t = 0.0)]
        min_exp: f64,
        #[arg(long, default_value_t = 2.0)]
        max_exp: f64,
        #[arg(long, default_value_t = 1000)]
        samples: usize,
        #[arg(long, default_value_t = DEFAULT_INTERMEDIATE_MULTIPLIER)]
        multiplier: f64,
        #[arg(long, default_value = "artifacts/sweep.png")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let size = (cli.width, cli.height);
    let output = match &cli.command {
        Command::Scenario {
            scenarios,
            bodies,
            name,
            output,
        } => {
            let (configs, bodies) = scenario::load(scenarios, bodies)?;
            let config = configs
                .iter()
                .find(|cfg| cfg.name == *name)
                .ok_or_else(|| anyhow!("no scenario named '{name}' in {}", scenarios.display()))?;
            let outcome =
                scenario::run(config, &bodies).with_context(|| format!("scenario '{name}'"))?;
            prepare_output(output)?;
            match &outcome {
                ScenarioOutcome::Transfer { diagram, .. }
                | ScenarioOutcome::OrbitChange { diagram, .. } => {
                    draw_diagram(diagram, output, size)?
                }
                ScenarioOutcome::Oberth { samples, .. } => {
                    draw_oberth(&config.name, samples, output, size)?
                }
                ScenarioOutcome::Sweep { points, .. } => draw_sweep(points, output, size)?,
            }
            output
        }
        Command::Sweep {
            input,
            min_exp,
            max_exp,
            samples,
            multiplier,
            output,
        } => {
            let points = match input {
                Some(path) => read_sweep(path)
                    .with_context(|| format!("reading sweep CSV {}", path.display()))?,
                None => {
                    // Normalised costs do not depend on the body or the starting radius.
                    let ctx = GravitationalContext::earth();
                    let ratios = logspace(*min_exp, *max_exp, *samples);
                    compare_transfers(&ratios, km_to_m(7_000.0), &ctx, *multiplier)?
                }
            };
            prepare_output(output)?;
            draw_sweep(&points, output, size)?;
            output
        }
    };
    info!(output = %output.display(), "plot written");
    println!("Wrote {}", output.display());
    Ok(())
}

fn prepare_output(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn draw_diagram(diagram: &OrbitDiagram, output: &Path, size: (u32, u32)) -> anyhow::Result<()> {
    let root = BitMapBackend::new(output, size).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 16.0, FontStyle::Normal);

    let extent_km = diagram
        .orbits
        .iter()
        .map(|orbit| orbit.points.max_radius())
        .fold(diagram.body_radius_m, f64::max)
        * 1e-3
        * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(diagram.title.clone(), caption_font)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(-extent_km..extent_km, -extent_km..extent_km)?;

    chart
        .configure_mesh()
        .x_desc("x (km)")
        .y_desc("y (km)")
        .label_style(label_font.clone())
        .x_labels(7)
        .y_labels(7)
        .draw()?;

    let body_color = RGBColor(70, 110, 200).mix(0.5);
    let body_radius_km = diagram.body_radius_m * 1e-3;
    let disc: Vec<(f64, f64)> = (0..180)
        .map(|k| {
            let theta = TAU * k as f64 / 180.0;
            (body_radius_km * theta.cos(), body_radius_km * theta.sin())
        })
        .collect();
    chart
        .draw_series(std::iter::once(Polygon::new(disc, body_color.filled())))?
        .label(diagram.body_name.clone())
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], body_color.filled()));

    for (idx, orbit) in diagram.orbits.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];
        let style = ShapeStyle::from(&color).stroke_width(2);
        let points = orbit.points.scaled(1e-3);
        let (head, tail) = match orbit.style {
            LineStyle::SolidThenDashed(split) | LineStyle::DashedThenSolid(split) => {
                points.split_at(split)
            }
            LineStyle::Solid | LineStyle::Dashed => points.split_at(points.len()),
        };
        let segments = stroke(orbit.style, head, tail);
        chart
            .draw_series(segments.into_iter().map(|seg| PathElement::new(seg, style)))?
            .label(orbit.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    let marker_color = RGBColor(200, 30, 30);
    for marker in &diagram.markers {
        let position = (marker.position.0 * 1e-3, marker.position.1 * 1e-3);
        chart.draw_series(std::iter::once(Circle::new(
            position,
            5,
            marker_color.filled(),
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            marker.label.clone(),
            (position.0 + extent_km * 0.02, position.1 + extent_km * 0.02),
            label_font.clone().color(&marker_color),
        )))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .label_font(label_font)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Path segments for one trajectory. `head` and `tail` are the samples either side
/// of the style split; the tail repeats the last head sample so the stroke is continuous.
fn stroke(style: LineStyle, head: &[(f64, f64)], tail: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    let joined_tail = || -> Vec<(f64, f64)> { head.last().into_iter().chain(tail).copied().collect() };
    match style {
        LineStyle::Solid => vec![head.iter().chain(tail).copied().collect()],
        LineStyle::Dashed => dashes(&head.iter().chain(tail).copied().collect::<Vec<_>>()),
        LineStyle::SolidThenDashed(_) => {
            let mut segments = vec![head.to_vec()];
            segments.extend(dashes(&joined_tail()));
            segments
        }
        LineStyle::DashedThenSolid(_) => {
            let mut segments = dashes(head);
            segments.push(joined_tail());
            segments
        }
    }
}

fn dashes(points: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    points
        .chunks(DASH_SAMPLES)
        .step_by(2)
        .map(<[(f64, f64)]>::to_vec)
        .collect()
}

fn draw_oberth(
    title: &str,
    samples: &[EnergySample],
    output: &Path,
    size: (u32, u32),
) -> anyhow::Result<()> {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return Err(anyhow!("energy profile is empty"));
    };
    let root = BitMapBackend::new(output, size).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 20.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 14.0, FontStyle::Normal);

    let r_min = first.radius_m * 1e-3;
    let r_max = (last.radius_m * 1e-3).max(r_min + 1.0);
    let (energy_area, gain_area) = root.split_horizontally((size.0 / 2) as i32);

    let curves = energy_curves(samples);
    let energy_max = curves
        .iter()
        .flat_map(|(_, points, _)| points.iter().map(|&(_, e)| e))
        .fold(0.0, f64::max)
        * 1.05;
    {
        let mut chart = ChartBuilder::on(&energy_area)
            .margin(20)
            .caption(format!("{title}: kinetic energy"), caption_font.clone())
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(r_min..r_max, 0.0..energy_max.max(1e-9))?;
        chart
            .configure_mesh()
            .x_desc("radius (km)")
            .y_desc("kinetic energy (MJ)")
            .label_style(label_font.clone())
            .draw()?;
        for (idx, (label, points, line)) in curves.into_iter().enumerate() {
            let style = ShapeStyle::from(&PALETTE[idx]).stroke_width(2);
            chart
                .draw_series(
                    stroke(line, &points, &[])
                        .into_iter()
                        .map(|seg| PathElement::new(seg, style)),
                )?
                .label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.85))
            .border_style(&BLACK)
            .label_font(label_font.clone())
            .draw()?;
    }

    let gains: Vec<(f64, f64)> = samples
        .iter()
        .map(|s| (s.radius_m * 1e-3, j_to_mj(s.energy_gain_j)))
        .collect();
    let gain_max = gains.iter().map(|&(_, g)| g).fold(0.0, f64::max) * 1.05;
    {
        let mut chart = ChartBuilder::on(&gain_area)
            .margin(20)
            .caption(format!("{title}: kinetic energy gain"), caption_font)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(r_min..r_max, 0.0..gain_max.max(1e-9))?;
        chart
            .configure_mesh()
            .x_desc("radius (km)")
            .y_desc("energy gain (MJ)")
            .label_style(label_font)
            .draw()?;
        chart.draw_series(std::iter::once(PathElement::new(
            gains,
            ShapeStyle::from(&PALETTE[2]).stroke_width(2),
        )))?;
    }

    root.present()?;
    Ok(())
}

/// Kinetic energy (MJ) against radius (km) before and after the impulse.
fn energy_curves(samples: &[EnergySample]) -> [(&'static str, Vec<(f64, f64)>, LineStyle); 2] {
    let curve = |energy: fn(&EnergySample) -> f64| -> Vec<(f64, f64)> {
        samples
            .iter()
            .map(|s| (s.radius_m * 1e-3, j_to_mj(energy(s))))
            .collect()
    };
    [
        ("before impulse", curve(|s| s.energy_before_j), LineStyle::Solid),
        ("after impulse", curve(|s| s.energy_after_j), LineStyle::Dashed),
    ]
}

fn draw_sweep(points: &[SweepPoint], output: &Path, size: (u32, u32)) -> anyhow::Result<()> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Err(anyhow!("sweep has no points"));
    };
    let root = BitMapBackend::new(output, size).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 16.0, FontStyle::Normal);

    let x_min = first.ratio.max(f64::MIN_POSITIVE);
    let x_max = last.ratio.max(x_min * 1.0001);
    let y_max = points
        .iter()
        .map(|p| p.hohmann_normalized.max(p.bi_elliptic_normalized))
        .fold(0.0, f64::max)
        * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Hohmann vs bi-elliptic", caption_font)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d((x_min..x_max).log_scale(), 0.0..y_max.max(1e-3))?;

    chart
        .configure_mesh()
        .x_desc("r_final / r_initial")
        .y_desc("delta-v / initial circular speed")
        .label_style(label_font.clone())
        .draw()?;

    let series: [(&str, RGBColor, fn(&SweepPoint) -> f64); 2] = [
        ("Hohmann", PALETTE[0], |p| p.hohmann_normalized),
        ("Bi-elliptic", PALETTE[1], |p| p.bi_elliptic_normalized),
    ];
    for (label, color, value) in series {
        let style = ShapeStyle::from(&color).stroke_width(2);
        let line: Vec<(f64, f64)> = points.iter().map(|p| (p.ratio, value(p))).collect();
        chart
            .draw_series(std::iter::once(PathElement::new(line, style)))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    if let Some(ratio) = crossover_ratio(points) {
        let grey = BLACK.mix(0.5);
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(ratio, 0.0), (ratio, y_max)],
            ShapeStyle::from(&grey).stroke_width(1),
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            format!("R = {ratio:.2}"),
            (ratio * 1.05, y_max * 0.05),
            label_font.clone(),
        )))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .label_font(label_font)
        .draw()?;

    root.present()?;
    Ok(())
}
