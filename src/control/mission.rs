use std::f64::consts::PI;

use serde::Deserialize;

use crate::constants::{EARTH_MASS, EARTH_RADIUS, GRAVITATIONAL_CONSTANT};

/// Central body the vehicle ascends from. Point-mass gravity only.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CelestialBody {
    pub name: String,
    pub radius: f64,
    pub mass: f64,
}

impl CelestialBody {
    pub fn new(name: String, radius: f64, mass: f64) -> Self {
        CelestialBody { name, radius, mass }
    }

    pub fn earth() -> Self {
        CelestialBody::new("Earth".to_string(), EARTH_RADIUS, EARTH_MASS)
    }

    /// Standard gravitational parameter GM (m³/s²).
    pub fn mu(&self) -> f64 {
        GRAVITATIONAL_CONSTANT * self.mass
    }

    pub fn altitude(&self, radial_distance: f64) -> f64 {
        radial_distance - self.radius
    }

    pub fn surface_gravity(&self) -> f64 {
        self.gravity_at_radius(self.radius)
    }

    pub fn gravity_at_radius(&self, radial_distance: f64) -> f64 {
        self.mu() / radial_distance.powi(2)
    }

    pub fn escape_velocity(&self, altitude: f64) -> f64 {
        let distance = self.radius + altitude;
        (2.0 * self.mu() / distance).sqrt()
    }

    pub fn circular_velocity(&self, altitude: f64) -> f64 {
        let distance = self.radius + altitude;
        (self.mu() / distance).sqrt()
    }

    pub fn orbital_period(&self, altitude: f64) -> f64 {
        let distance = self.radius + altitude;
        2.0 * PI * distance / self.circular_velocity(altitude)
    }
}

impl Default for CelestialBody {
    fn default() -> Self {
        CelestialBody::earth()
    }
}
