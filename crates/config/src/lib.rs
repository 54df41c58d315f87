//! Configuration models and loaders for the transfer calculator.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use transfer_core::constants::G;

/// Central body parsed from the catalogue.
#[derive(Debug, Deserialize, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub mass_kg: f64,
    pub radius_m: f64,
    /// Overrides `gravitational_constant × mass_kg` when present.
    #[serde(default)]
    pub mu_m3_s2: Option<f64>,
    #[serde(default = "default_gravitational_constant")]
    pub gravitational_constant: f64,
}

impl BodyConfig {
    /// Gravitational parameter (m³/s²).
    pub fn mu(&self) -> f64 {
        self.mu_m3_s2
            .unwrap_or(self.gravitational_constant * self.mass_kg)
    }
}

/// Analysis scenario parsed from a manifest.
#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioConfig {
    pub name: String,
    /// Human-readable title for reports and plots.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_body")]
    pub body: String,
    /// Treat every radius in `maneuver` as an altitude above the body's surface.
    #[serde(default)]
    pub radii_are_altitudes: bool,
    #[serde(default = "default_orbit_points")]
    pub orbit_points: usize,
    pub maneuver: ManeuverConfig,
}

/// Maneuver parameters in scenario manifests.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type")]
pub enum ManeuverConfig {
    #[serde(rename = "orbit_change")]
    OrbitChange {
        periapsis_m: f64,
        apoapsis_m: f64,
        new_periapsis_m: f64,
        new_apoapsis_m: f64,
        #[serde(default = "default_burn_window_deg")]
        burn_window_deg: f64,
    },
    #[serde(rename = "oberth")]
    Oberth {
        periapsis_m: f64,
        apoapsis_m: f64,
        delta_v_m_s: f64,
        spacecraft_mass_kg: f64,
        #[serde(default = "default_samples")]
        samples: usize,
    },
    #[serde(rename = "hohmann")]
    Hohmann { r_initial_m: f64, r_final_m: f64 },
    #[serde(rename = "bi_elliptic")]
    BiElliptic {
        r_initial_m: f64,
        r_final_m: f64,
        /// Intermediate apoapsis as a multiple of `r_final_m`.
        #[serde(default)]
        intermediate_multiplier: Option<f64>,
        /// Explicit intermediate apoapsis; wins over the multiplier.
        #[serde(default)]
        intermediate_radius_m: Option<f64>,
    },
    #[serde(rename = "one_tangent")]
    OneTangent {
        r_initial_m: f64,
        r_final_m: f64,
        true_anomaly_deg: f64,
    },
    #[serde(rename = "sweep")]
    Sweep {
        #[serde(default)]
        ratio_min_exp: f64,
        #[serde(default = "default_ratio_max_exp")]
        ratio_max_exp: f64,
        #[serde(default = "default_samples")]
        samples: usize,
        #[serde(default = "default_sweep_radius_m")]
        r_initial_m: f64,
        #[serde(default)]
        intermediate_multiplier: Option<f64>,
    },
}

impl ManeuverConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            ManeuverConfig::OrbitChange { .. } => "orbit_change",
            ManeuverConfig::Oberth { .. } => "oberth",
            ManeuverConfig::Hohmann { .. } => "hohmann",
            ManeuverConfig::BiElliptic { .. } => "bi_elliptic",
            ManeuverConfig::OneTangent { .. } => "one_tangent",
            ManeuverConfig::Sweep { .. } => "sweep",
        }
    }
}

fn default_gravitational_constant() -> f64 {
    G
}

fn default_body() -> String {
    "EARTH".to_string()
}

fn default_orbit_points() -> usize {
    1000
}

fn default_samples() -> usize {
    1000
}

fn default_burn_window_deg() -> f64 {
    5.0
}

fn default_ratio_max_exp() -> f64 {
    2.0
}

fn default_sweep_radius_m() -> f64 {
    7_000e3
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load central bodies from a YAML list, a single TOML file, or a directory of TOML files.
pub fn load_bodies<P: AsRef<Path>>(path: P) -> Result<Vec<BodyConfig>, ConfigError> {
    load_records(path)
}

/// Load scenarios from a YAML list, a single TOML file, or a directory of TOML files.
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioConfig>, ConfigError> {
    load_records(path)
}

/// Case-insensitive lookup by body name.
pub fn find_body<'a>(bodies: &'a [BodyConfig], name: &str) -> Option<&'a BodyConfig> {
    bodies.iter().find(|b| b.name.eq_ignore_ascii_case(name))
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
