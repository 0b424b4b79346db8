use std::f64::consts::{PI, TAU};

use crate::{control::mission::CelestialBody, simulation::history::StateHistory};

/// Figures of merit derived from a finished history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightMetrics {
    pub max_altitude: f64,
    pub max_radial_velocity: f64,
    pub max_tangential_velocity: f64,
    pub max_velocity: f64,
    /// `(samples - 1) * dt` (s).
    pub flight_time: f64,
    /// Net angle swept, summed from wrapped increments (rad).
    pub angular_displacement: f64,
    /// Ground track length at the surface (m).
    pub surface_distance: f64,
    /// Straight-line distance between the first and last positions (m).
    pub chord_distance: f64,
}

impl FlightMetrics {
    pub fn from_history(history: &StateHistory, planet: &CelestialBody, dt: f64) -> Self {
        let mut max_altitude = f64::NEG_INFINITY;
        let mut max_radial_velocity = f64::NEG_INFINITY;
        let mut max_tangential_velocity = f64::NEG_INFINITY;
        let mut max_velocity = 0.0_f64;
        for state in history {
            max_altitude = max_altitude.max(planet.altitude(state.r));
            max_radial_velocity = max_radial_velocity.max(state.q);
            max_tangential_velocity = max_tangential_velocity.max(state.tangential_velocity());
            max_velocity = max_velocity.max(state.speed());
        }

        let angular_displacement: f64 = history
            .as_slice()
            .windows(2)
            .map(|pair| wrap_angle(pair[1].theta - pair[0].theta))
            .sum();
        let chord = history.last().position() - history.initial().position();

        FlightMetrics {
            max_altitude,
            max_radial_velocity,
            max_tangential_velocity,
            max_velocity,
            flight_time: (history.len() - 1) as f64 * dt,
            angular_displacement,
            surface_distance: planet.radius * angular_displacement.abs(),
            chord_distance: chord.magnitude(),
        }
    }
}

/// Maps an angle into (−π, π].
fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped == -PI {
        PI
    } else {
        wrapped
    }
}
