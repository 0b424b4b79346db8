use tracing::{info, warn};

use crate::simulation::driver::SimulationSummary;

/// Side-channel events emitted by the simulation driver.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    Started {
        method: &'static str,
        dt: f64,
    },
    Progress {
        iteration: usize,
        time: f64,
        altitude: f64,
        radial_velocity: f64,
        angular_velocity: f64,
        mass: f64,
        thrust_angle: f64,
    },
    FuelExhausted {
        time: f64,
        altitude: f64,
    },
    Finished(SimulationSummary),
}

pub trait Notifier {
    fn notify(&mut self, event: &SimulationEvent);
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&mut self, _event: &SimulationEvent) {}
}

/// Forwards events to `tracing`. Installing a subscriber is up to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, event: &SimulationEvent) {
        match event {
            SimulationEvent::Started { method, dt } => {
                info!(method, dt, "Starting simulation");
            }
            SimulationEvent::Progress {
                iteration,
                time,
                altitude,
                radial_velocity,
                angular_velocity,
                mass,
                thrust_angle,
            } => {
                info!(
                    iteration,
                    time = %format_time(*time),
                    altitude = %format_altitude(*altitude),
                    radial_velocity,
                    angular_velocity,
                    mass,
                    thrust_angle_deg = thrust_angle.to_degrees(),
                    "Progress"
                );
            }
            SimulationEvent::FuelExhausted { time, altitude } => {
                warn!(
                    time = %format_time(*time),
                    altitude = %format_altitude(*altitude),
                    "Fuel exhausted"
                );
            }
            SimulationEvent::Finished(summary) => {
                info!(
                    reason = %summary.termination_reason,
                    iterations = summary.iterations,
                    elapsed = %format_time(summary.elapsed_time),
                    final_altitude = %format_altitude(summary.final_altitude),
                    final_angle = summary.final_angle,
                    "Simulation finished"
                );
            }
        }
    }
}

/// Keeps every event in arrival order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<SimulationEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog::default()
    }

    pub fn events(&self) -> &[SimulationEvent] {
        &self.events
    }

    pub fn fuel_exhausted_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SimulationEvent::FuelExhausted { .. }))
            .count()
    }

    pub fn progress_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SimulationEvent::Progress { .. }))
            .count()
    }
}

impl Notifier for EventLog {
    fn notify(&mut self, event: &SimulationEvent) {
        self.events.push(event.clone());
    }
}

pub fn format_time(elapsed_time: f64) -> String {
    if elapsed_time >= 3600.0 {
        let hours = (elapsed_time / 3600.0).floor();
        let minutes = ((elapsed_time % 3600.0) / 60.0).floor();
        let seconds = elapsed_time % 60.0;
        format!("{:.0}h {:.0}m {:.2}s", hours, minutes, seconds)
    } else if elapsed_time >= 60.0 {
        let minutes = (elapsed_time / 60.0).floor();
        let seconds = elapsed_time % 60.0;
        format!("{:.0}m {:.2}s", minutes, seconds)
    } else {
        format!("{:.2}s", elapsed_time)
    }
}

pub fn format_altitude(altitude: f64) -> String {
    if altitude >= 1000.0 {
        format!("{:.2} km", altitude / 1000.0)
    } else {
        format!("{:.2} m", altitude)
    }
}
