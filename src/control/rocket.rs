use std::f64::consts::PI;

use serde::Deserialize;

use crate::constants::{
    FIRST_TRANSITION_ALTITUDE, ROCKET_DIAMETER, ROCKET_DRAG_COEFFICIENT,
    SECOND_TRANSITION_ALTITUDE, SPECIFIC_IMPULSE, STRUCTURAL_MASS, THIRD_TRANSITION_ALTITUDE,
};
use crate::errors::SimulationError;

/// Altitudes (m) at which the altitude-indexed gravity turn changes slope.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TransitionAltitudes {
    pub h0: f64,
    pub h1: f64,
    pub h2: f64,
}

impl Default for TransitionAltitudes {
    fn default() -> Self {
        TransitionAltitudes {
            h0: FIRST_TRANSITION_ALTITUDE,
            h1: SECOND_TRANSITION_ALTITUDE,
            h2: THIRD_TRANSITION_ALTITUDE,
        }
    }
}

/// Vehicle properties that stay fixed for the whole flight.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VehicleParameters {
    pub structural_mass: f64,
    pub diameter: f64,
    pub specific_impulse: f64,
    pub drag_coefficient: f64,
    pub transition_altitudes: TransitionAltitudes,
}

impl VehicleParameters {
    /// Frontal area of the body, treated as a disc of the vehicle diameter.
    pub fn frontal_area(&self) -> f64 {
        PI * (self.diameter / 2.0).powi(2)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.structural_mass > 0.0) || !self.structural_mass.is_finite() {
            return Err(SimulationError::InitializationError(format!(
                "structural mass must be positive, got {}",
                self.structural_mass
            )));
        }
        for (name, value) in [
            ("diameter", self.diameter),
            ("specific impulse", self.specific_impulse),
            ("drag coefficient", self.drag_coefficient),
        ] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(SimulationError::InitializationError(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }

        let TransitionAltitudes { h0, h1, h2 } = self.transition_altitudes;
        if !(0.0 <= h0 && h0 < h1 && h1 < h2) || !h2.is_finite() {
            return Err(SimulationError::InitializationError(format!(
                "transition altitudes must satisfy 0 <= h0 < h1 < h2, got {}, {}, {}",
                h0, h1, h2
            )));
        }
        Ok(())
    }
}

impl Default for VehicleParameters {
    fn default() -> Self {
        VehicleParameters {
            structural_mass: STRUCTURAL_MASS,
            diameter: ROCKET_DIAMETER,
            specific_impulse: SPECIFIC_IMPULSE,
            drag_coefficient: ROCKET_DRAG_COEFFICIENT,
            transition_altitudes: TransitionAltitudes::default(),
        }
    }
}
