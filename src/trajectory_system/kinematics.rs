use crate::{
    control::{
        environment::air_density, mission::CelestialBody, propulsion::PropulsionSystem,
        rocket::VehicleParameters,
    },
    utils::vector2d::Vector2D,
};

use super::aerodynamics::Aerodynamics;

/// Snapshot of the vehicle in planet-centred polar coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    /// Distance from the planet centre (m).
    pub r: f64,
    /// Radial velocity (m/s).
    pub q: f64,
    /// Radial acceleration of the last step (m/s²).
    pub q_dot: f64,
    /// Angular position (rad), accumulates over revolutions.
    pub theta: f64,
    /// Angular velocity (rad/s).
    pub gamma: f64,
    /// Angular acceleration of the last step (rad/s²).
    pub gamma_dot: f64,
    /// Total mass (kg).
    pub mass: f64,
    /// Thrust inclination from the radial direction (rad).
    pub thrust_angle: f64,
    /// Fuel mass flow applied during the last step (kg/s).
    pub mass_flow: f64,
}

impl VehicleState {
    pub fn tangential_velocity(&self) -> f64 {
        self.r * self.gamma
    }

    /// Velocity as (radial, tangential) components.
    pub fn velocity(&self) -> Vector2D {
        Vector2D::new(self.q, self.tangential_velocity())
    }

    pub fn speed(&self) -> f64 {
        self.velocity().magnitude()
    }

    pub fn position(&self) -> Vector2D {
        Vector2D::from_polar(self.r, self.theta)
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.q.is_finite() && self.theta.is_finite() && self.gamma.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accelerations {
    pub radial: f64,
    pub angular: f64,
}

/// Planar point-mass dynamics under gravity, thrust, and drag.
#[derive(Debug, Clone)]
pub struct EquationsOfMotion {
    planet: CelestialBody,
    aerodynamics: Aerodynamics,
    propulsion: PropulsionSystem,
}

impl EquationsOfMotion {
    pub fn new(vehicle: &VehicleParameters, planet: &CelestialBody) -> Self {
        EquationsOfMotion {
            planet: planet.clone(),
            aerodynamics: Aerodynamics::for_vehicle(vehicle),
            propulsion: PropulsionSystem::new(vehicle.specific_impulse),
        }
    }

    pub fn planet(&self) -> &CelestialBody {
        &self.planet
    }

    pub fn air_density(&self, r: f64) -> f64 {
        air_density(self.planet.altitude(r)).max(0.0)
    }

    /// Thrust force as (radial, tangential) components.
    pub fn thrust(&self, mass_flow: f64, thrust_angle: f64) -> Vector2D {
        let magnitude = self.propulsion.thrust(mass_flow);
        Vector2D::new(
            magnitude * thrust_angle.cos(),
            magnitude * thrust_angle.sin(),
        )
    }

    pub fn drag(&self, r: f64, q: f64, gamma: f64) -> Vector2D {
        self.aerodynamics
            .calculate_drag(Vector2D::new(q, r * gamma), self.air_density(r))
    }

    /// q̇ = −GM/r² + F_r/m + r·γ², with `specific_force` already divided by mass.
    pub fn radial_acceleration(&self, r: f64, gamma: f64, specific_force: f64) -> f64 {
        -self.planet.gravity_at_radius(r) + specific_force + r * gamma.powi(2)
    }

    /// γ̇ = (F_t/m − 2·q·γ) / r, with `specific_force` already divided by mass.
    pub fn angular_acceleration(&self, r: f64, q: f64, gamma: f64, specific_force: f64) -> f64 {
        (specific_force - 2.0 * q * gamma) / r
    }

    /// Both accelerations evaluated once at `state`, using its mass, flow, and
    /// thrust angle.
    pub fn accelerations(&self, state: &VehicleState) -> Accelerations {
        let force = self.thrust(state.mass_flow, state.thrust_angle)
            + self.drag(state.r, state.q, state.gamma);
        let specific = force * (1.0 / state.mass);

        Accelerations {
            radial: self.radial_acceleration(state.r, state.gamma, specific.x),
            angular: self.angular_acceleration(state.r, state.q, state.gamma, specific.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn coasting_state(r: f64, q: f64, gamma: f64) -> VehicleState {
        VehicleState {
            r,
            q,
            q_dot: 0.0,
            theta: 0.0,
            gamma,
            gamma_dot: 0.0,
            mass: 1_000.0,
            thrust_angle: 0.0,
            mass_flow: 0.0,
        }
    }

    fn vacuum_vehicle() -> VehicleParameters {
        VehicleParameters {
            drag_coefficient: 0.0,
            ..VehicleParameters::default()
        }
    }

    #[test]
    fn test_free_fall_from_rest() {
        let earth = CelestialBody::earth();
        let equations = EquationsOfMotion::new(&VehicleParameters::default(), &earth);
        let state = coasting_state(earth.radius + 100.0, 0.0, 0.0);

        let accelerations = equations.accelerations(&state);
        assert_relative_eq!(
            accelerations.radial,
            -earth.gravity_at_radius(state.r),
            epsilon = 1e-12
        );
        assert_eq!(accelerations.angular, 0.0);
    }

    #[test]
    fn test_circular_orbit_is_balanced() {
        let earth = CelestialBody::earth();
        let equations = EquationsOfMotion::new(&vacuum_vehicle(), &earth);
        let r = earth.radius + 200_000.0;
        let gamma = earth.circular_velocity(200_000.0) / r;

        let accelerations = equations.accelerations(&coasting_state(r, 0.0, gamma));
        assert!(
            accelerations.radial.abs() < 1e-9,
            "Centrifugal term should cancel gravity: {}",
            accelerations.radial
        );
        assert_eq!(accelerations.angular, 0.0);
    }

    #[test]
    fn test_coriolis_slows_rising_rotation() {
        let earth = CelestialBody::earth();
        let equations = EquationsOfMotion::new(&vacuum_vehicle(), &earth);
        let r = earth.radius + 200_000.0;

        let accelerations = equations.accelerations(&coasting_state(r, 50.0, 1e-3));
        assert_relative_eq!(accelerations.angular, -2.0 * 50.0 * 1e-3 / r, epsilon = 1e-18);
    }

    #[test]
    fn test_thrust_direction() {
        let earth = CelestialBody::earth();
        let equations = EquationsOfMotion::new(&vacuum_vehicle(), &earth);
        let magnitude = 300.0 * 100.0 * 9.81;

        let vertical = equations.thrust(100.0, 0.0);
        assert_relative_eq!(vertical.x, magnitude, epsilon = 1e-6);
        assert_relative_eq!(vertical.y, 0.0, epsilon = 1e-6);

        let horizontal = equations.thrust(100.0, FRAC_PI_2);
        assert_relative_eq!(horizontal.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(horizontal.y, magnitude, epsilon = 1e-6);
    }

    #[test]
    fn test_drag_reduces_upward_acceleration() {
        let earth = CelestialBody::earth();
        let with_drag = EquationsOfMotion::new(&VehicleParameters::default(), &earth);
        let without_drag = EquationsOfMotion::new(&vacuum_vehicle(), &earth);
        let state = coasting_state(earth.radius + 1_000.0, 200.0, 0.0);

        assert!(
            with_drag.accelerations(&state).radial < without_drag.accelerations(&state).radial,
            "Drag should slow an ascending vehicle"
        );
    }

    #[test]
    fn test_density_clamped_below_surface() {
        let earth = CelestialBody::earth();
        let equations = EquationsOfMotion::new(&VehicleParameters::default(), &earth);

        assert!(equations.air_density(earth.radius + 1e6) >= 0.0);
        assert!(equations.air_density(earth.radius) > 1.0);
    }

    #[test]
    fn test_state_velocity_components() {
        let state = coasting_state(2.0, 3.0, 2.0);

        assert_eq!(state.velocity(), Vector2D::new(3.0, 4.0));
        assert_relative_eq!(state.speed(), 5.0, epsilon = 1e-12);
        assert!(state.is_finite());

        let broken = VehicleState {
            gamma: f64::NAN,
            ..state
        };
        assert!(!broken.is_finite());
    }
}
