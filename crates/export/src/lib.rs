//! Export helpers for text reports, CSV tables and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod report {
    //! Human-readable reports. Radii are printed in km, speeds in km/h with km/s alongside.

    use std::fmt;

    use transfer_core::time::{seconds_to_hours, split_duration};
    use transfer_core::units::{j_to_mj, m_to_km, ms_to_kmh, ms_to_kms};
    use transfer_impulsive::{ManeuverResult, SweepPoint, crossover_ratio};
    use transfer_orbits::{EnergySample, GravitationalContext, Orbit};

    const RULE: &str = "-------------------------------------------";

    /// Formats a [`ManeuverResult`] burn by burn.
    pub struct ManeuverReport<'a>(pub &'a ManeuverResult);

    impl fmt::Display for ManeuverReport<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let result = self.0;
            writeln!(f, "Results of the {} transfer:", result.kind)?;
            writeln!(f, "{RULE}")?;
            writeln!(f, "{:<26}: {:.3} km", "Initial radius", m_to_km(result.r_initial_m))?;
            writeln!(f, "{:<26}: {:.3} km", "Final radius", m_to_km(result.r_final_m))?;
            for burn in &result.burns {
                writeln!(f, "{} burn at {:.3} km", burn.leg, m_to_km(burn.radius_m))?;
                writeln!(
                    f,
                    "  {:<24}: {:.1} -> {:.1} km/h",
                    "speed",
                    ms_to_kmh(burn.v_before_m_s),
                    ms_to_kmh(burn.v_after_m_s)
                )?;
                writeln!(
                    f,
                    "  {:<24}: {:+.1} km/h ({:+.4} km/s)",
                    "delta-v",
                    ms_to_kmh(burn.dv_m_s),
                    ms_to_kms(burn.dv_m_s)
                )?;
                if !burn.is_tangential() {
                    writeln!(
                        f,
                        "  {:<24}: {:.4} deg",
                        "flight-path angle", burn.flight_path_angle_deg
                    )?;
                }
            }
            for (idx, orbit) in result.transfer_orbits.iter().enumerate() {
                writeln!(
                    f,
                    "{:<26}: periapsis {:.3} km, apoapsis {:.3} km, e = {:.4}",
                    format!("Transfer orbit {}", idx + 1),
                    m_to_km(orbit.periapsis()),
                    m_to_km(orbit.apoapsis()),
                    orbit.eccentricity()
                )?;
            }
            let (days, hours, minutes) = split_duration(result.tof_seconds);
            writeln!(
                f,
                "{:<26}: {:.3} h ({days} d {hours} h {minutes} min)",
                "Time of flight",
                seconds_to_hours(result.tof_seconds)
            )?;
            writeln!(f, "{RULE}")?;
            write!(
                f,
                "Delta-V total = {:.1} km/h ({:.4} km/s)",
                ms_to_kmh(result.dv_total_m_s),
                ms_to_kms(result.dv_total_m_s)
            )
        }
    }

    /// Geometry and speeds of a single orbit.
    pub struct OrbitReport<'a> {
        pub orbit: &'a Orbit,
        pub ctx: &'a GravitationalContext,
    }

    impl fmt::Display for OrbitReport<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let orbit = self.orbit;
            writeln!(f, "{:<26}: {:.3} km", "Periapsis", m_to_km(orbit.periapsis()))?;
            writeln!(f, "{:<26}: {:.3} km", "Apoapsis", m_to_km(orbit.apoapsis()))?;
            writeln!(f, "{:<26}: {:.3} km", "Semi-major axis", m_to_km(orbit.semi_major_axis()))?;
            writeln!(f, "{:<26}: {:.3} km", "Semi-minor axis", m_to_km(orbit.semi_minor_axis()))?;
            writeln!(f, "{:<26}: {:.6}", "Eccentricity", orbit.eccentricity())?;
            for (label, speed) in [
                ("Periapsis speed", orbit.periapsis_speed(self.ctx)),
                ("Apoapsis speed", orbit.apoapsis_speed(self.ctx)),
            ] {
                writeln!(
                    f,
                    "{label:<26}: {:.1} km/h ({:.4} km/s)",
                    ms_to_kmh(speed),
                    ms_to_kms(speed)
                )?;
            }
            write!(f, "{:<26}: {:.2} min", "Period", orbit.period(self.ctx) / 60.0)
        }
    }

    /// One-line-per-fact summary of a Hohmann vs bi-elliptic sweep.
    pub struct SweepReport<'a>(pub &'a [SweepPoint]);

    impl fmt::Display for SweepReport<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let points = self.0;
            let (Some(first), Some(last)) = (points.first(), points.last()) else {
                return write!(f, "Empty sweep");
            };
            writeln!(f, "Hohmann vs bi-elliptic over {} ratios", points.len())?;
            writeln!(f, "{RULE}")?;
            writeln!(f, "{:<26}: {:.4} .. {:.4}", "Ratio range", first.ratio, last.ratio)?;
            match crossover_ratio(points) {
                Some(ratio) => write!(f, "{:<26}: {ratio:.4}", "Bi-elliptic cheaper from"),
                None => write!(f, "Bi-elliptic is never cheaper in this range"),
            }
        }
    }

    /// Kinetic energy gain at periapsis and apoapsis for the same impulse.
    pub struct OberthReport<'a> {
        pub delta_v_m_s: f64,
        pub samples: &'a [EnergySample],
    }

    impl fmt::Display for OberthReport<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let (Some(peri), Some(apo)) = (self.samples.first(), self.samples.last()) else {
                return write!(f, "Empty energy profile");
            };
            writeln!(
                f,
                "Oberth effect for a {:.1} m/s prograde impulse",
                self.delta_v_m_s
            )?;
            writeln!(f, "{RULE}")?;
            for (label, sample) in [("At periapsis", peri), ("At apoapsis", apo)] {
                writeln!(
                    f,
                    "{label:<26}: r = {:.3} km, v = {:.1} m/s, gain = {:.3} MJ",
                    m_to_km(sample.radius_m),
                    sample.speed_m_s,
                    j_to_mj(sample.energy_gain_j)
                )?;
            }
            if apo.energy_gain_j > 0.0 {
                write!(
                    f,
                    "{:<26}: {:.3}",
                    "Periapsis/apoapsis gain",
                    peri.energy_gain_j / apo.energy_gain_j
                )
            } else {
                write!(f, "{:<26}: n/a", "Periapsis/apoapsis gain")
            }
        }
    }
}

pub mod csv {
    //! CSV tables written through the `csv` crate.

    use std::io::Write;
    use std::path::Path;

    use serde::Serialize;
    use transfer_impulsive::SweepPoint;
    use transfer_orbits::{EnergySample, TrajectoryPoints};

    #[derive(Serialize)]
    struct TrajectoryRow {
        x_m: f64,
        y_m: f64,
    }

    /// Write one row per sweep point, with a header.
    pub fn write_sweep<W: Write>(writer: W, points: &[SweepPoint]) -> ::csv::Result<()> {
        let mut wtr = ::csv::Writer::from_writer(writer);
        for point in points {
            wtr.serialize(point)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Read a sweep table previously written by [`write_sweep`].
    pub fn read_sweep(path: &Path) -> ::csv::Result<Vec<SweepPoint>> {
        let mut reader = ::csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
        reader.deserialize().collect()
    }

    /// Write the `(x, y)` samples of a trajectory.
    pub fn write_trajectory<W: Write>(writer: W, points: &TrajectoryPoints) -> ::csv::Result<()> {
        let mut wtr = ::csv::Writer::from_writer(writer);
        for &(x_m, y_m) in points.iter() {
            wtr.serialize(TrajectoryRow { x_m, y_m })?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write an Oberth energy profile.
    pub fn write_energy_profile<W: Write>(
        writer: W,
        samples: &[EnergySample],
    ) -> ::csv::Result<()> {
        let mut wtr = ::csv::Writer::from_writer(writer);
        for sample in samples {
            wtr.serialize(sample)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

pub mod json {
    use std::io::{self, Write};

    use serde::Serialize;
    use transfer_impulsive::ManeuverResult;

    /// Envelope written around a maneuver result.
    #[derive(Debug, Serialize)]
    pub struct ManeuverDocument<'a> {
        pub scenario: &'a str,
        pub body: &'a str,
        pub mu_m3_s2: f64,
        pub generated_utc: &'a str,
        pub result: &'a ManeuverResult,
    }

    pub fn write_maneuver<W: Write>(
        mut writer: W,
        document: &ManeuverDocument<'_>,
    ) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut writer, document)?;
        writeln!(writer)?;
        writer.flush()
    }
}
