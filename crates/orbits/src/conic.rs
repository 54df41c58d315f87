//! Focus-centred ellipse geometry.
//!
//! The central body sits at the origin (one focus of the ellipse), periapsis on
//! the +x axis and apoapsis on the −x axis.

use std::f64::consts::{PI, TAU};

use serde::Serialize;

use crate::context::GravitationalContext;
use crate::error::{OrbitError, ensure_radius};

/// Default sample count for a full revolution.
pub const DEFAULT_ORBIT_POINTS: usize = 1000;

/// Closed elliptical orbit described by its apsides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Orbit {
    periapsis_m: f64,
    apoapsis_m: f64,
}

impl Orbit {
    /// Build an orbit from periapsis and apoapsis radii (m).
    ///
    /// `periapsis_m == apoapsis_m` is a circle. Swapped apsides are rejected
    /// rather than silently reordered.
    pub fn new(periapsis_m: f64, apoapsis_m: f64) -> Result<Self, OrbitError> {
        ensure_radius("periapsis radius", periapsis_m)?;
        ensure_radius("apoapsis radius", apoapsis_m)?;
        if periapsis_m > apoapsis_m {
            return Err(OrbitError::invalid_orbit(format!(
                "periapsis radius {periapsis_m} m exceeds apoapsis radius {apoapsis_m} m"
            )));
        }
        let orbit = Self {
            periapsis_m,
            apoapsis_m,
        };
        let e = orbit.eccentricity();
        if !(e < 1.0 && orbit.semi_minor_axis() > 0.0) {
            return Err(OrbitError::domain(format!(
                "apsides {periapsis_m} m and {apoapsis_m} m give eccentricity {e}, not an ellipse"
            )));
        }
        Ok(orbit)
    }

    /// Circular orbit of radius `radius_m`.
    pub fn circular(radius_m: f64) -> Result<Self, OrbitError> {
        Self::new(radius_m, radius_m)
    }

    pub fn periapsis(&self) -> f64 {
        self.periapsis_m
    }

    pub fn apoapsis(&self) -> f64 {
        self.apoapsis_m
    }

    /// `a = (R_p + R_a) / 2`
    pub fn semi_major_axis(&self) -> f64 {
        0.5 * (self.periapsis_m + self.apoapsis_m)
    }

    /// Distance from the geometric centre to the occupied focus, `c = a − R_p`.
    pub fn focal_offset(&self) -> f64 {
        self.semi_major_axis() - self.periapsis_m
    }

    /// `b = sqrt(a² − c²)`
    pub fn semi_minor_axis(&self) -> f64 {
        let a = self.semi_major_axis();
        let c = self.focal_offset();
        (a * a - c * c).sqrt()
    }

    /// `e = c / a`, always in `[0, 1)`.
    pub fn eccentricity(&self) -> f64 {
        self.focal_offset() / self.semi_major_axis()
    }

    /// Orbital period (s).
    pub fn period(&self, ctx: &GravitationalContext) -> f64 {
        TAU * (self.semi_major_axis().powi(3) / ctx.mu()).sqrt()
    }

    /// Time to coast from periapsis to apoapsis (s), half a period.
    pub fn half_period(&self, ctx: &GravitationalContext) -> f64 {
        PI * (self.semi_major_axis().powi(3) / ctx.mu()).sqrt()
    }

    /// Speed at periapsis, the fastest point of the orbit.
    pub fn periapsis_speed(&self, ctx: &GravitationalContext) -> f64 {
        apsis_speed(self.periapsis_m, self.semi_major_axis(), ctx)
    }

    /// Speed at apoapsis, the slowest point of the orbit.
    pub fn apoapsis_speed(&self, ctx: &GravitationalContext) -> f64 {
        apsis_speed(self.apoapsis_m, self.semi_major_axis(), ctx)
    }

    /// Point on the ellipse for the parametric angle `theta` (rad), focus at the origin.
    pub fn point_at(&self, theta: f64) -> (f64, f64) {
        let a = self.semi_major_axis();
        let c = self.focal_offset();
        let b = self.semi_minor_axis();
        (a * theta.cos() - c, b * theta.sin())
    }

    /// Sample one full revolution with `num_points` points (`θ` from 0 to 2π inclusive).
    pub fn points(&self, num_points: usize) -> Result<TrajectoryPoints, OrbitError> {
        if num_points < 2 {
            return Err(OrbitError::InvalidParameter {
                name: "num_points",
                value: num_points as f64,
            });
        }
        let a = self.semi_major_axis();
        let c = self.focal_offset();
        let b = self.semi_minor_axis();
        let last = (num_points - 1) as f64;
        let points = (0..num_points)
            .map(|k| {
                let theta = TAU * k as f64 / last;
                (a * theta.cos() - c, b * theta.sin())
            })
            .collect();
        Ok(TrajectoryPoints { points })
    }
}

// Apsides always satisfy r <= 2a, so the radicand is non-negative.
fn apsis_speed(radius_m: f64, semi_major_axis_m: f64, ctx: &GravitationalContext) -> f64 {
    (ctx.mu() * (2.0 / radius_m - 1.0 / semi_major_axis_m))
        .max(0.0)
        .sqrt()
}

/// Ordered (x, y) samples of one revolution, in the caller's length unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryPoints {
    points: Vec<(f64, f64)>,
}

impl TrajectoryPoints {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(f64, f64)> + '_ {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Copy with every coordinate multiplied by `factor` (e.g. `1e-3` for km).
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|&(x, y)| (x * factor, y * factor))
                .collect(),
        }
    }

    /// Split into the samples before and after index `mid` (clamped to the length).
    pub fn split_at(&self, mid: usize) -> (&[(f64, f64)], &[(f64, f64)]) {
        self.points.split_at(mid.min(self.points.len()))
    }

    /// Largest distance from the origin across all samples.
    pub fn max_radius(&self) -> f64 {
        self.points
            .iter()
            .map(|&(x, y)| x.hypot(y))
            .fold(0.0, f64::max)
    }
}

/// Sample the focus-centred ellipse with apsides `r_periapsis` and `r_apoapsis`.
pub fn generate_orbit_points(
    r_periapsis: f64,
    r_apoapsis: f64,
    num_points: usize,
) -> Result<TrajectoryPoints, OrbitError> {
    Orbit::new(r_periapsis, r_apoapsis)?.points(num_points)
}
