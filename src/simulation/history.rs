use std::ops::Index;
use std::slice;

use crate::{
    control::mission::CelestialBody, trajectory_system::kinematics::VehicleState,
    utils::vector2d::Vector2D,
};

/// Append-only record of a run, index 0 being the initial condition.
///
/// Only the driver can append; consumers get shared slices and iterators.
#[derive(Debug, Clone, PartialEq)]
pub struct StateHistory {
    states: Vec<VehicleState>,
}

impl StateHistory {
    pub(crate) fn new(initial: VehicleState) -> Self {
        StateHistory {
            states: vec![initial],
        }
    }

    pub(crate) fn push(&mut self, state: VehicleState) {
        self.states.push(state);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn as_slice(&self) -> &[VehicleState] {
        &self.states
    }

    pub fn iter(&self) -> slice::Iter<'_, VehicleState> {
        self.states.iter()
    }

    pub fn get(&self, index: usize) -> Option<&VehicleState> {
        self.states.get(index)
    }

    pub fn initial(&self) -> &VehicleState {
        &self.states[0]
    }

    pub fn last(&self) -> &VehicleState {
        &self.states[self.states.len() - 1]
    }

    pub fn altitudes(&self, planet: &CelestialBody) -> Vec<f64> {
        self.states
            .iter()
            .map(|state| planet.altitude(state.r))
            .collect()
    }

    /// Planet-centred Cartesian positions, x along θ = 0.
    pub fn trajectory_points(&self) -> Vec<Vector2D> {
        self.states.iter().map(VehicleState::position).collect()
    }
}

impl Index<usize> for StateHistory {
    type Output = VehicleState;

    fn index(&self, index: usize) -> &VehicleState {
        &self.states[index]
    }
}

impl<'a> IntoIterator for &'a StateHistory {
    type Item = &'a VehicleState;
    type IntoIter = slice::Iter<'a, VehicleState>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn sample(r: f64, theta: f64) -> VehicleState {
        VehicleState {
            r,
            q: 0.0,
            q_dot: 0.0,
            theta,
            gamma: 0.0,
            gamma_dot: 0.0,
            mass: 1.0,
            thrust_angle: 0.0,
            mass_flow: 0.0,
        }
    }

    #[test]
    fn test_history_starts_with_initial_state() {
        let history = StateHistory::new(sample(10.0, 0.0));

        assert_eq!(history.len(), 1);
        assert!(!history.is_empty());
        assert_eq!(history.initial(), history.last());
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut history = StateHistory::new(sample(10.0, 0.0));
        history.push(sample(11.0, 0.1));
        history.push(sample(12.0, 0.2));

        let radii: Vec<f64> = history.iter().map(|state| state.r).collect();
        assert_eq!(radii, vec![10.0, 11.0, 12.0]);
        assert_eq!(history[1].theta, 0.1);
        assert_eq!(history.last().r, 12.0);
        assert!(history.get(3).is_none());
    }

    #[test]
    fn test_altitudes_relative_to_planet() {
        let planet = CelestialBody::earth();
        let mut history = StateHistory::new(sample(planet.radius + 100.0, 0.0));
        history.push(sample(planet.radius + 250.0, 0.0));

        assert_eq!(history.altitudes(&planet), vec![100.0, 250.0]);
    }

    #[test]
    fn test_trajectory_points_are_cartesian() {
        let mut history = StateHistory::new(sample(2.0, 0.0));
        history.push(sample(3.0, FRAC_PI_2));

        let points = history.trajectory_points();
        assert_relative_eq!(points[0].x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(points[1].x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(points[1].y, 3.0, epsilon = 1e-12);
    }
}
