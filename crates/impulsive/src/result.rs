//! Uniform maneuver record consumed by report and export layers.

use std::fmt;

use serde::Serialize;
use transfer_orbits::Orbit;

/// Which transfer produced a [`ManeuverResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManeuverKind {
    Hohmann,
    BiElliptic,
    OneTangentBurn,
}

impl ManeuverKind {
    pub fn label(&self) -> &'static str {
        match self {
            ManeuverKind::Hohmann => "Hohmann",
            ManeuverKind::BiElliptic => "Bi-elliptic",
            ManeuverKind::OneTangentBurn => "One-tangent-burn",
        }
    }
}

impl fmt::Display for ManeuverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single impulsive burn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Burn {
    pub leg: &'static str,
    pub radius_m: f64,
    pub v_before_m_s: f64,
    pub v_after_m_s: f64,
    /// Signed for tangential burns (negative = retrograde), magnitude otherwise.
    pub dv_m_s: f64,
    /// Flight-path angle of the transfer orbit at the burn, zero when tangential.
    pub flight_path_angle_deg: f64,
}

impl Burn {
    pub(crate) fn tangential(
        leg: &'static str,
        radius_m: f64,
        v_before_m_s: f64,
        v_after_m_s: f64,
    ) -> Self {
        Self {
            leg,
            radius_m,
            v_before_m_s,
            v_after_m_s,
            dv_m_s: v_after_m_s - v_before_m_s,
            flight_path_angle_deg: 0.0,
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.dv_m_s.abs()
    }

    pub fn is_tangential(&self) -> bool {
        self.flight_path_angle_deg == 0.0
    }
}

/// Delta-v budget of a complete transfer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManeuverResult {
    pub kind: ManeuverKind,
    pub r_initial_m: f64,
    pub r_final_m: f64,
    pub burns: Vec<Burn>,
    pub transfer_orbits: Vec<Orbit>,
    /// Sum of the burn magnitudes.
    pub dv_total_m_s: f64,
    pub tof_seconds: f64,
}

impl ManeuverResult {
    pub(crate) fn new(
        kind: ManeuverKind,
        r_initial_m: f64,
        r_final_m: f64,
        burns: Vec<Burn>,
        transfer_orbits: Vec<Orbit>,
        tof_seconds: f64,
    ) -> Self {
        let dv_total_m_s = burns.iter().map(Burn::magnitude).sum();
        Self {
            kind,
            r_initial_m,
            r_final_m,
            burns,
            transfer_orbits,
            dv_total_m_s,
            tof_seconds,
        }
    }

    /// Look up a burn by leg name.
    pub fn burn(&self, leg: &str) -> Option<&Burn> {
        self.burns.iter().find(|b| b.leg == leg)
    }
}
