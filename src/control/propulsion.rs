use crate::constants::STANDARD_GRAVITY;

/// Engine model: thrust follows directly from mass flow and specific impulse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropulsionSystem {
    pub specific_impulse: f64,
}

impl PropulsionSystem {
    pub fn new(specific_impulse: f64) -> Self {
        PropulsionSystem { specific_impulse }
    }

    pub fn thrust(&self, mass_flow: f64) -> f64 {
        self.specific_impulse * mass_flow * STANDARD_GRAVITY
    }

    /// Caps a commanded flow so one step of `dt` cannot burn more than what
    /// is left in the tanks.
    pub fn available_mass_flow(commanded: f64, fuel_remaining: f64, dt: f64) -> f64 {
        if fuel_remaining > 0.0 {
            commanded.min(fuel_remaining / dt)
        } else {
            0.0
        }
    }

    /// Vehicle mass after burning `mass_flow` for `dt`, never below the dry mass.
    pub fn deplete(mass: f64, mass_flow: f64, dt: f64, structural_mass: f64) -> f64 {
        (mass - mass_flow * dt).max(structural_mass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_thrust_from_mass_flow() {
        let engine = PropulsionSystem::new(300.0);
        assert_relative_eq!(engine.thrust(4492.0), 300.0 * 4492.0 * 9.81, epsilon = 1e-6);
        assert_eq!(engine.thrust(0.0), 0.0);
    }

    #[test]
    fn test_flow_limited_by_remaining_fuel() {
        assert_eq!(PropulsionSystem::available_mass_flow(4492.0, 1e6, 0.1), 4492.0);
        assert_relative_eq!(
            PropulsionSystem::available_mass_flow(4492.0, 100.0, 0.1),
            1000.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_no_flow_without_fuel() {
        assert_eq!(PropulsionSystem::available_mass_flow(4492.0, 0.0, 0.1), 0.0);
        assert_eq!(PropulsionSystem::available_mass_flow(4492.0, -5.0, 0.1), 0.0);
    }

    #[test]
    fn test_depletion_floored_at_structural_mass() {
        assert_relative_eq!(PropulsionSystem::deplete(1500.0, 100.0, 1.0, 500.0), 1400.0);
        assert_eq!(PropulsionSystem::deplete(520.0, 100.0, 1.0, 500.0), 500.0);
    }
}
