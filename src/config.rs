use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::{
    constants::{
        EARTH_RADIUS, FUEL_MASS, INITIAL_MASS_FLOW, LAUNCH_ALTITUDE, LOG_INTERVAL,
        MAX_SIMULATION_TIME, TIME_STEP,
    },
    control::{
        fuel_management::MassDepletionSchedule, guidance::GuidanceMode, mission::CelestialBody,
        rocket::VehicleParameters,
    },
    errors::SimulationError,
    trajectory_system::integrator::IntegrationMethod,
};

/// State at t = 0 plus the propellant loaded on top of the structural mass.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct InitialConditions {
    pub r: f64,
    pub q: f64,
    pub q_dot: f64,
    pub theta: f64,
    pub gamma: f64,
    pub gamma_dot: f64,
    pub fuel_mass: f64,
    pub thrust_angle: f64,
    pub mass_flow: f64,
}

impl Default for InitialConditions {
    fn default() -> Self {
        InitialConditions {
            r: EARTH_RADIUS + LAUNCH_ALTITUDE,
            q: 0.0,
            q_dot: 0.0,
            theta: 0.0,
            gamma: 0.0,
            gamma_dot: 0.0,
            fuel_mass: FUEL_MASS,
            thrust_angle: 0.0,
            mass_flow: INITIAL_MASS_FLOW,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunParameters {
    pub dt: f64,
    pub t_max: f64,
    pub method: IntegrationMethod,
    /// Iterations between progress events, 0 for none.
    pub log_interval: usize,
}

impl Default for RunParameters {
    fn default() -> Self {
        RunParameters {
            dt: TIME_STEP,
            t_max: MAX_SIMULATION_TIME,
            method: IntegrationMethod::default(),
            log_interval: LOG_INTERVAL,
        }
    }
}

/// Everything a run needs, fixed at construction.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub planet: CelestialBody,
    pub vehicle: VehicleParameters,
    pub initial: InitialConditions,
    pub run: RunParameters,
    pub guidance: GuidanceMode,
    pub schedule: MassDepletionSchedule,
}

impl SimulationConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, SimulationError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn initial_mass(&self) -> f64 {
        self.vehicle.structural_mass + self.initial.fuel_mass
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let RunParameters { dt, t_max, .. } = self.run;
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(invalid(format!("time step must be positive, got {}", dt)));
        }
        if !(t_max > 0.0) || !t_max.is_finite() {
            return Err(invalid(format!(
                "maximum simulation time must be positive and finite, got {}",
                t_max
            )));
        }

        if !(self.planet.radius > 0.0) || !(self.planet.mass > 0.0) {
            return Err(invalid(format!(
                "planet radius and mass must be positive, got {} and {}",
                self.planet.radius, self.planet.mass
            )));
        }

        let initial = &self.initial;
        let components = [
            ("r", initial.r),
            ("q", initial.q),
            ("q_dot", initial.q_dot),
            ("theta", initial.theta),
            ("gamma", initial.gamma),
            ("gamma_dot", initial.gamma_dot),
            ("thrust_angle", initial.thrust_angle),
            ("mass_flow", initial.mass_flow),
        ];
        if let Some((name, value)) = components.iter().find(|(_, value)| !value.is_finite()) {
            return Err(invalid(format!(
                "initial {} must be finite, got {}",
                name, value
            )));
        }
        if initial.r <= 0.0 {
            return Err(invalid(format!(
                "initial radius must be positive, got {}",
                initial.r
            )));
        }
        if !(initial.fuel_mass >= 0.0) {
            return Err(invalid(format!(
                "fuel mass must be non-negative, got {}",
                initial.fuel_mass
            )));
        }

        self.vehicle.validate()?;
        self.schedule.validate()
    }
}

fn invalid(message: String) -> SimulationError {
    SimulationError::InitializationError(message)
}
