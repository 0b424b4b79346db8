use std::fmt;

use crate::{
    config::SimulationConfig,
    control::{guidance::GuidanceProfile, mission::CelestialBody},
    errors::SimulationError,
    telemetry_system::telemetry::{Notifier, SimulationEvent},
    trajectory_system::{integrator::Integrator, kinematics::VehicleState},
};

use super::history::StateHistory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    TimeLimit,
    GroundImpact,
    NumericalError,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::TimeLimit => write!(f, "time limit"),
            TerminationReason::GroundImpact => write!(f, "ground impact"),
            TerminationReason::NumericalError => write!(f, "numerical error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSummary {
    pub termination_reason: TerminationReason,
    pub iterations: usize,
    /// Simulated seconds.
    pub elapsed_time: f64,
    /// Altitude of the last state, clamped at zero (m).
    pub final_altitude: f64,
    pub final_angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStatus {
    Running,
    Terminated(TerminationReason),
}

/// Owns the stepping loop, the working state, and the history of one run.
pub struct Simulation {
    config: SimulationConfig,
    integrator: Integrator,
    state: VehicleState,
    history: StateHistory,
    max_iterations: usize,
    iterations: usize,
    elapsed_time: f64,
    fuel_exhausted: bool,
    status: SimulationStatus,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let guidance = GuidanceProfile::new(config.guidance, &config.vehicle.transition_altitudes)?;
        let integrator = Integrator::new(
            &config.vehicle,
            &config.planet,
            guidance,
            config.schedule.clone(),
            config.run.method,
        );

        let initial = &config.initial;
        let state = VehicleState {
            r: initial.r,
            q: initial.q,
            q_dot: initial.q_dot,
            theta: initial.theta,
            gamma: initial.gamma,
            gamma_dot: initial.gamma_dot,
            mass: config.initial_mass(),
            thrust_angle: initial.thrust_angle,
            mass_flow: initial.mass_flow,
        };
        let max_iterations = ((config.run.t_max / config.run.dt).floor() as usize).max(1);

        Ok(Simulation {
            integrator,
            state,
            history: StateHistory::new(state),
            max_iterations,
            iterations: 0,
            elapsed_time: 0.0,
            fuel_exhausted: false,
            status: SimulationStatus::Running,
            config,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn planet(&self) -> &CelestialBody {
        &self.config.planet
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn into_history(self) -> StateHistory {
        self.history
    }

    pub fn status(&self) -> SimulationStatus {
        self.status
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Runs one loop iteration. Does nothing once the run has terminated.
    pub fn step(&mut self, notifier: &mut dyn Notifier) -> SimulationStatus {
        if self.status != SimulationStatus::Running {
            return self.status;
        }
        if self.iterations >= self.max_iterations {
            self.status = SimulationStatus::Terminated(TerminationReason::TimeLimit);
            return self.status;
        }

        self.iterations += 1;
        let structural_mass = self.config.vehicle.structural_mass;
        let dt = self.config.run.dt;

        if self.state.mass <= structural_mass {
            self.state.mass = structural_mass;
            self.state.mass_flow = 0.0;
            if !self.fuel_exhausted {
                self.fuel_exhausted = true;
                notifier.notify(&SimulationEvent::FuelExhausted {
                    time: self.elapsed_time,
                    altitude: self.current_altitude(),
                });
            }
        }

        self.state = self.integrator.step(&self.state, self.history.len(), dt);
        self.history.push(self.state);
        self.elapsed_time += dt;

        if let Some(reason) = check_state(&self.state, self.config.planet.radius) {
            self.status = SimulationStatus::Terminated(reason);
            return self.status;
        }

        let log_interval = self.config.run.log_interval;
        if log_interval > 0 && self.iterations % log_interval == 0 {
            notifier.notify(&SimulationEvent::Progress {
                iteration: self.iterations,
                time: self.elapsed_time,
                altitude: self.current_altitude(),
                radial_velocity: self.state.q,
                angular_velocity: self.state.gamma,
                mass: self.state.mass,
                thrust_angle: self.state.thrust_angle,
            });
        }

        if self.elapsed_time >= self.config.run.t_max || self.iterations >= self.max_iterations {
            self.status = SimulationStatus::Terminated(TerminationReason::TimeLimit);
        }
        self.status
    }

    /// Steps until a terminal state and reports the outcome.
    pub fn run(&mut self, notifier: &mut dyn Notifier) -> SimulationSummary {
        let announce = self.config.run.log_interval != 0;
        if announce {
            notifier.notify(&SimulationEvent::Started {
                method: self.integrator.scheme_name(),
                dt: self.config.run.dt,
            });
        }

        let reason = loop {
            if let SimulationStatus::Terminated(reason) = self.step(notifier) {
                break reason;
            }
        };

        let summary = self.summarize(reason);
        if announce {
            notifier.notify(&SimulationEvent::Finished(summary));
        }
        summary
    }

    pub fn summary(&self) -> Option<SimulationSummary> {
        match self.status {
            SimulationStatus::Terminated(reason) => Some(self.summarize(reason)),
            SimulationStatus::Running => None,
        }
    }

    fn summarize(&self, reason: TerminationReason) -> SimulationSummary {
        SimulationSummary {
            termination_reason: reason,
            iterations: self.iterations,
            elapsed_time: self.elapsed_time,
            final_altitude: self.current_altitude(),
            final_angle: self.state.theta,
        }
    }

    fn current_altitude(&self) -> f64 {
        self.config.planet.altitude(self.state.r).max(0.0)
    }
}

/// Ground contact wins over a non-finite state; `None` means keep flying.
fn check_state(state: &VehicleState, planet_radius: f64) -> Option<TerminationReason> {
    if state.r <= planet_radius {
        Some(TerminationReason::GroundImpact)
    } else if !state.is_finite() {
        Some(TerminationReason::NumericalError)
    } else {
        None
    }
}
