//! Constants, unit conversions, and shared primitives for the transfer calculator workspace.

/// Physical constants expressed in SI units.
pub mod constants {
    /// Newtonian constant of gravitation (m³ kg⁻¹ s⁻²).
    pub const G: f64 = 6.674_30e-11;
    /// Mass of the Earth (kg).
    pub const EARTH_MASS_KG: f64 = 5.972e24;
    /// Seconds per hour.
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
    /// Seconds per day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::SECONDS_PER_HOUR;

    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert metres per second to kilometres per second.
    #[inline]
    pub fn ms_to_kms(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert metres per second to kilometres per hour.
    #[inline]
    pub fn ms_to_kmh(v: f64) -> f64 {
        v / 1_000.0 * SECONDS_PER_HOUR
    }

    /// Convert joules to megajoules.
    #[inline]
    pub fn j_to_mj(v: f64) -> f64 {
        v / 1.0e6
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::{SECONDS_PER_DAY, SECONDS_PER_HOUR};

    /// Convert seconds to hours.
    #[inline]
    pub fn seconds_to_hours(seconds: f64) -> f64 {
        seconds / SECONDS_PER_HOUR
    }

    /// Split a duration into whole days, hours and minutes.
    pub fn split_duration(seconds: f64) -> (i64, i64, i64) {
        let total_seconds = seconds.max(0.0);
        let days = (total_seconds / SECONDS_PER_DAY).floor() as i64;
        let remaining = total_seconds - days as f64 * SECONDS_PER_DAY;
        let hours = (remaining / SECONDS_PER_HOUR).floor() as i64;
        let minutes = ((remaining - hours as f64 * SECONDS_PER_HOUR) / 60.0).floor() as i64;
        (days, hours, minutes)
    }
}

/// Sampling helpers used by sweeps and profiles.
pub mod sampling {
    /// `n` evenly spaced values from `start` to `end`, both inclusive.
    ///
    /// A single sample returns `start`; zero samples return an empty vector.
    pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
        match n {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (end - start) / (n - 1) as f64;
                (0..n)
                    .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                    .collect()
            }
        }
    }

    /// `n` values spaced evenly on a log scale from `10^start_exp` to `10^end_exp`.
    pub fn logspace(start_exp: f64, end_exp: f64, n: usize) -> Vec<f64> {
        linspace(start_exp, end_exp, n)
            .into_iter()
            .map(|exp| 10f64.powf(exp))
            .collect()
    }
}
