//! Three-layer standard-atmosphere approximation.
//!
//! Temperatures are in °C and pressures in kPa, following the NASA Glenn
//! curve fits; density comes out of the ideal gas law in kg/m³.

pub const TROPOSPHERE_HEIGHT: f64 = 11_000.0; // m
pub const LOWER_STRATOSPHERE_HEIGHT: f64 = 25_000.0; // m

const CELSIUS_TO_KELVIN: f64 = 273.1;
const AIR_GAS_CONSTANT: f64 = 0.2869; // kJ/(kg·K)

/// Temperature and pressure of one evaluated layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphericConditions {
    pub temperature: f64,
    pub pressure: f64,
}

impl AtmosphericConditions {
    pub fn at_altitude(altitude: f64) -> Self {
        if altitude < TROPOSPHERE_HEIGHT {
            let temperature = 15.04 - 0.00649 * altitude;
            let pressure = 101.29 * ((temperature + CELSIUS_TO_KELVIN) / 288.08).powf(5.256);
            AtmosphericConditions { temperature, pressure }
        } else if altitude < LOWER_STRATOSPHERE_HEIGHT {
            let temperature = -56.46;
            let pressure = 22.65 * (1.73 - 0.000157 * altitude).exp();
            AtmosphericConditions { temperature, pressure }
        } else {
            let temperature = -131.21 + 0.00299 * altitude;
            let pressure = 2.488 * ((temperature + CELSIUS_TO_KELVIN) / 216.6).powf(-11.388);
            AtmosphericConditions { temperature, pressure }
        }
    }

    pub fn density(&self) -> f64 {
        self.pressure / (AIR_GAS_CONSTANT * (self.temperature + CELSIUS_TO_KELVIN))
    }
}

/// Air density at `altitude` metres above the surface.
///
/// Undefined below the surface; callers clamp the altitude or the result.
pub fn air_density(altitude: f64) -> f64 {
    AtmosphericConditions::at_altitude(altitude).density()
}
