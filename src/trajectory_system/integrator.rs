use std::fmt;

use serde::Deserialize;

use crate::control::{
    fuel_management::MassDepletionSchedule, guidance::GuidanceProfile, mission::CelestialBody,
    propulsion::PropulsionSystem, rocket::VehicleParameters,
};

use super::kinematics::{EquationsOfMotion, VehicleState};

/// Fixed-point passes per implicit step. There is no convergence test.
pub const FIXED_POINT_PASSES: usize = 3;

/// Single-step time integration of the equations of motion.
///
/// `state` arrives with this step's mass, mass flow, and thrust angle already
/// applied; the scheme only moves `r`, `q`, `theta`, `gamma` and records the
/// accelerations it used.
pub trait StepScheme {
    fn name(&self) -> &'static str;

    fn advance(&self, equations: &EquationsOfMotion, state: &mut VehicleState, dt: f64);
}

/// Forward update from one evaluation at the start of the step.
///
/// Components are updated in the order γ, q, θ, r and the later ones use the
/// values just written.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitStep;

impl StepScheme for ExplicitStep {
    fn name(&self) -> &'static str {
        "Forward Euler"
    }

    fn advance(&self, equations: &EquationsOfMotion, state: &mut VehicleState, dt: f64) {
        let accelerations = equations.accelerations(state);
        state.q_dot = accelerations.radial;
        state.gamma_dot = accelerations.angular;

        state.gamma += accelerations.angular * dt;
        state.q += accelerations.radial * dt;
        state.theta += state.gamma * dt;
        state.r += state.q * dt;
    }
}

/// Backward update solved by fixed-point iteration, seeded with the
/// current `q`, `gamma`, `r`.
#[derive(Debug, Clone, Copy)]
pub struct ImplicitStep {
    pub passes: usize,
}

impl Default for ImplicitStep {
    fn default() -> Self {
        ImplicitStep {
            passes: FIXED_POINT_PASSES,
        }
    }
}

impl StepScheme for ImplicitStep {
    fn name(&self) -> &'static str {
        "Backward Euler"
    }

    fn advance(&self, equations: &EquationsOfMotion, state: &mut VehicleState, dt: f64) {
        let thrust = equations.thrust(state.mass_flow, state.thrust_angle);
        let inverse_mass = 1.0 / state.mass;

        let mut r_trial = state.r;
        let mut q_trial = state.q;
        let mut gamma_trial = state.gamma;
        let mut q_dot = state.q_dot;
        let mut gamma_dot = state.gamma_dot;

        for _ in 0..self.passes {
            r_trial = state.r + dt * q_trial;

            let specific = (thrust + equations.drag(r_trial, q_trial, gamma_trial)) * inverse_mass;

            q_dot = equations.radial_acceleration(r_trial, gamma_trial, specific.x);
            q_trial = state.q + dt * q_dot;

            // Coriolis term takes the q just computed in this pass
            gamma_dot = equations.angular_acceleration(r_trial, q_trial, gamma_trial, specific.y);
            gamma_trial = state.gamma + dt * gamma_dot;
        }

        state.theta += dt * gamma_trial;
        state.r = r_trial;
        state.q = q_trial;
        state.gamma = gamma_trial;
        state.q_dot = q_dot;
        state.gamma_dot = gamma_dot;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationMethod {
    Explicit,
    #[default]
    Implicit,
}

impl IntegrationMethod {
    pub fn scheme(self) -> Box<dyn StepScheme> {
        match self {
            IntegrationMethod::Explicit => Box::new(ExplicitStep),
            IntegrationMethod::Implicit => Box::new(ImplicitStep::default()),
        }
    }
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationMethod::Explicit => f.write_str(ExplicitStep.name()),
            IntegrationMethod::Implicit => f.write_str(ImplicitStep::default().name()),
        }
    }
}

/// One full step: commanded rates, fuel burn, guidance, then the chosen
/// scheme. Holds no mutable state of its own.
pub struct Integrator {
    equations: EquationsOfMotion,
    guidance: GuidanceProfile,
    schedule: MassDepletionSchedule,
    structural_mass: f64,
    scheme: Box<dyn StepScheme>,
}

impl Integrator {
    pub fn new(
        vehicle: &VehicleParameters,
        planet: &CelestialBody,
        guidance: GuidanceProfile,
        schedule: MassDepletionSchedule,
        method: IntegrationMethod,
    ) -> Self {
        Integrator {
            equations: EquationsOfMotion::new(vehicle, planet),
            guidance,
            schedule,
            structural_mass: vehicle.structural_mass,
            scheme: method.scheme(),
        }
    }

    pub fn scheme_name(&self) -> &'static str {
        self.scheme.name()
    }

    pub fn equations(&self) -> &EquationsOfMotion {
        &self.equations
    }

    /// Produces the snapshot that follows `state`. Flight time is
    /// `dt * recorded_samples`, the history length before this step.
    pub fn step(&self, state: &VehicleState, recorded_samples: usize, dt: f64) -> VehicleState {
        let flight_time = dt * recorded_samples as f64;
        let altitude = self.equations.planet().altitude(state.r);
        let mut next = *state;

        let commanded = self.schedule.commanded_mass_flow(flight_time);
        next.mass_flow = PropulsionSystem::available_mass_flow(
            commanded,
            state.mass - self.structural_mass,
            dt,
        );
        next.mass = PropulsionSystem::deplete(state.mass, next.mass_flow, dt, self.structural_mass);
        next.thrust_angle = self.guidance.thrust_angle(flight_time, altitude);

        self.scheme.advance(&self.equations, &mut next, dt);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::fuel_management::BurnPhase;
    use crate::control::guidance::GuidanceMode;
    use approx::assert_relative_eq;

    fn coasting_schedule() -> MassDepletionSchedule {
        MassDepletionSchedule::new(Vec::new()).unwrap()
    }

    fn vacuum_vehicle() -> VehicleParameters {
        VehicleParameters {
            structural_mass: 1_000.0,
            drag_coefficient: 0.0,
            ..VehicleParameters::default()
        }
    }

    fn resting_state(planet: &CelestialBody, altitude: f64, q: f64, mass: f64) -> VehicleState {
        VehicleState {
            r: planet.radius + altitude,
            q,
            q_dot: 0.0,
            theta: 0.0,
            gamma: 0.0,
            gamma_dot: 0.0,
            mass,
            thrust_angle: 0.0,
            mass_flow: 0.0,
        }
    }

    fn integrator(
        vehicle: &VehicleParameters,
        schedule: MassDepletionSchedule,
        method: IntegrationMethod,
    ) -> Integrator {
        let planet = CelestialBody::earth();
        let guidance =
            GuidanceProfile::new(GuidanceMode::Time, &vehicle.transition_altitudes).unwrap();
        Integrator::new(vehicle, &planet, guidance, schedule, method)
    }

    #[test]
    fn test_explicit_update_order() {
        let vehicle = vacuum_vehicle();
        let planet = CelestialBody::earth();
        let integrator = integrator(&vehicle, coasting_schedule(), IntegrationMethod::Explicit);
        let dt = 0.5;
        let state = resting_state(&planet, 100.0, 20.0, 1_000.0);

        let next = integrator.step(&state, 1, dt);
        let g = planet.gravity_at_radius(state.r);

        assert_relative_eq!(next.q_dot, -g, epsilon = 1e-12);
        assert_relative_eq!(next.q, 20.0 - g * dt, epsilon = 1e-12);
        // Position uses the freshly updated velocity
        assert_relative_eq!(next.r, state.r + (20.0 - g * dt) * dt, epsilon = 1e-6);
    }

    #[test]
    fn test_implicit_uses_end_of_step_gravity() {
        let vehicle = vacuum_vehicle();
        let planet = CelestialBody::earth();
        let integrator = integrator(&vehicle, coasting_schedule(), IntegrationMethod::Implicit);
        let dt = 1.0;
        let state = resting_state(&planet, 100.0, 100.0, 1_000.0);

        let next = integrator.step(&state, 1, dt);

        assert!(next.r > state.r);
        assert_relative_eq!(next.q, state.q + dt * next.q_dot, epsilon = 1e-12);
        // Gravity evaluated at the predicted radius, not the start one
        assert!(next.q_dot > -planet.gravity_at_radius(state.r));
        assert_eq!(next.theta, 0.0);
    }

    #[test]
    fn test_fuel_burn_capped_by_tanks() {
        let vehicle = vacuum_vehicle();
        let planet = CelestialBody::earth();
        let integrator = integrator(&vehicle, MassDepletionSchedule::default(), IntegrationMethod::Implicit);
        let state = resting_state(&planet, 100.0, 0.0, 1_050.0);

        let next = integrator.step(&state, 1, 0.1);

        assert_relative_eq!(next.mass_flow, 500.0, epsilon = 1e-9);
        assert_eq!(next.mass, vehicle.structural_mass);

        let after = integrator.step(&next, 2, 0.1);
        assert_eq!(after.mass_flow, 0.0);
        assert_eq!(after.mass, vehicle.structural_mass);
    }

    #[test]
    fn test_schedule_follows_flight_time() {
        let vehicle = vacuum_vehicle();
        let planet = CelestialBody::earth();
        let schedule = MassDepletionSchedule::new(vec![BurnPhase {
            until: 10.0,
            mass_flow: 5.0,
        }])
        .unwrap();
        let integrator = integrator(&vehicle, schedule, IntegrationMethod::Explicit);
        let state = resting_state(&planet, 100.0, 0.0, 5_000.0);

        assert_eq!(integrator.step(&state, 9, 1.0).mass_flow, 5.0);
        assert_eq!(integrator.step(&state, 10, 1.0).mass_flow, 0.0);
    }

    #[test]
    fn test_guidance_applied_each_step() {
        let vehicle = vacuum_vehicle();
        let planet = CelestialBody::earth();
        let integrator = integrator(&vehicle, coasting_schedule(), IntegrationMethod::Implicit);
        let state = resting_state(&planet, 100.0, 0.0, 5_000.0);

        let next = integrator.step(&state, 400, 0.1);
        assert_relative_eq!(next.thrust_angle, 15.0_f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn test_scheme_names() {
        assert_eq!(IntegrationMethod::Explicit.to_string(), "Forward Euler");
        assert_eq!(IntegrationMethod::Implicit.to_string(), "Backward Euler");
        assert_eq!(IntegrationMethod::default(), IntegrationMethod::Implicit);

        for method in [IntegrationMethod::Explicit, IntegrationMethod::Implicit] {
            assert_eq!(method.to_string(), method.scheme().name());
        }
    }
}
