use std::f64::consts::FRAC_PI_2;
use std::fmt;

use serde::Deserialize;

use crate::control::rocket::TransitionAltitudes;
use crate::errors::SimulationError;

/// Which variable indexes the thrust-angle table. Fixed for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuidanceMode {
    #[default]
    Time,
    Altitude,
}

impl fmt::Display for GuidanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuidanceMode::Time => write!(f, "time-indexed"),
            GuidanceMode::Altitude => write!(f, "altitude-indexed"),
        }
    }
}

/// Piecewise-linear lookup over `(x, value)` knots sorted by `x`.
/// Values outside the knot range are held at the nearest end.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlTable {
    knots: Vec<(f64, f64)>,
}

impl ControlTable {
    pub fn new(knots: Vec<(f64, f64)>) -> Result<Self, SimulationError> {
        if knots.is_empty() {
            return Err(SimulationError::InitializationError(
                "control table needs at least one knot".to_string(),
            ));
        }
        if knots.iter().any(|&(x, _)| !x.is_finite()) {
            return Err(SimulationError::InitializationError(
                "control table knot positions must be finite".to_string(),
            ));
        }
        if knots.windows(2).any(|pair| pair[0].0 > pair[1].0) {
            return Err(SimulationError::InitializationError(
                "control table knots must be sorted".to_string(),
            ));
        }
        Ok(ControlTable { knots })
    }

    pub fn from_degrees(xs: &[f64], degrees: &[f64]) -> Result<Self, SimulationError> {
        if xs.len() != degrees.len() {
            return Err(SimulationError::InitializationError(format!(
                "control table has {} positions but {} angles",
                xs.len(),
                degrees.len()
            )));
        }
        let knots = xs
            .iter()
            .zip(degrees)
            .map(|(&x, &angle)| (x, angle.to_radians()))
            .collect();
        ControlTable::new(knots)
    }

    pub fn knots(&self) -> &[(f64, f64)] {
        &self.knots
    }

    pub fn interpolate(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }

        let (first_x, first_value) = self.knots[0];
        let (last_x, last_value) = self.knots[self.knots.len() - 1];
        if x <= first_x {
            return first_value;
        }
        if x >= last_x {
            return last_value;
        }

        // first_x < x < last_x, so 1 <= upper < len
        let upper = self.knots.partition_point(|&(knot_x, _)| knot_x <= x);
        let (x0, y0) = self.knots[upper - 1];
        let (x1, y1) = self.knots[upper];
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}

/// Commanded thrust inclination from the radial direction.
#[derive(Debug, Clone, PartialEq)]
pub enum GuidanceProfile {
    TimeIndexed(ControlTable),
    AltitudeIndexed(ControlTable),
}

impl GuidanceProfile {
    pub fn new(mode: GuidanceMode, altitudes: &TransitionAltitudes) -> Result<Self, SimulationError> {
        match mode {
            GuidanceMode::Time => Self::time_indexed(),
            GuidanceMode::Altitude => Self::altitude_indexed(altitudes),
        }
    }

    /// Vertical for 30 s, then pitch over to horizontal by 150 s.
    pub fn time_indexed() -> Result<Self, SimulationError> {
        let times = [0.0, 30.0, 50.0, 69.0, 100.0, 150.0, 250.0, 400.0];
        let angles = [0.0, 0.0, 30.0, 50.0, 80.0, 90.0, 90.0, 90.0];
        Ok(GuidanceProfile::TimeIndexed(ControlTable::from_degrees(
            &times, &angles,
        )?))
    }

    /// Gravity turn keyed to the three transition altitudes.
    pub fn altitude_indexed(altitudes: &TransitionAltitudes) -> Result<Self, SimulationError> {
        let TransitionAltitudes { h0, h1, h2 } = *altitudes;
        let heights = [
            0.0,
            h0,
            h0 + 0.20 * (h1 - h0),
            h0 + 0.40 * (h1 - h0),
            h0 + 0.65 * (h1 - h0),
            h1,
            h1 + 0.30 * (h2 - h1),
            h1 + 0.60 * (h2 - h1),
            h2,
        ];
        let angles = [0.0, 3.0, 12.0, 28.0, 45.0, 62.0, 77.0, 88.0, 90.0];
        Ok(GuidanceProfile::AltitudeIndexed(ControlTable::from_degrees(
            &heights, &angles,
        )?))
    }

    pub fn mode(&self) -> GuidanceMode {
        match self {
            GuidanceProfile::TimeIndexed(_) => GuidanceMode::Time,
            GuidanceProfile::AltitudeIndexed(_) => GuidanceMode::Altitude,
        }
    }

    pub fn thrust_angle(&self, flight_time: f64, altitude: f64) -> f64 {
        match self {
            GuidanceProfile::TimeIndexed(table) => table.interpolate(flight_time),
            GuidanceProfile::AltitudeIndexed(table) => {
                table.interpolate(altitude).clamp(0.0, FRAC_PI_2)
            }
        }
    }
}
