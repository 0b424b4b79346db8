use serde::Deserialize;

use crate::errors::SimulationError;

/// Constant mass flow commanded until `until` seconds of flight.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BurnPhase {
    pub until: f64,
    pub mass_flow: f64,
}

/// Time-indexed mass-flow command, piecewise constant and zero after the
/// last phase. It knows nothing about the fuel actually left on board.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MassDepletionSchedule {
    phases: Vec<BurnPhase>,
}

impl MassDepletionSchedule {
    pub fn new(phases: Vec<BurnPhase>) -> Result<Self, SimulationError> {
        let schedule = MassDepletionSchedule { phases };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn phases(&self) -> &[BurnPhase] {
        &self.phases
    }

    pub fn commanded_mass_flow(&self, flight_time: f64) -> f64 {
        self.phases
            .iter()
            .find(|phase| flight_time < phase.until)
            .map_or(0.0, |phase| phase.mass_flow)
    }

    /// Propellant the schedule would burn if the tanks never ran dry.
    pub fn total_commanded_fuel(&self) -> f64 {
        let mut start = 0.0;
        let mut total = 0.0;
        for phase in &self.phases {
            total += phase.mass_flow * (phase.until - start).max(0.0);
            start = phase.until;
        }
        total
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        for phase in &self.phases {
            if !(phase.mass_flow >= 0.0) || !phase.mass_flow.is_finite() {
                return Err(SimulationError::InitializationError(format!(
                    "burn phase mass flow must be non-negative, got {}",
                    phase.mass_flow
                )));
            }
        }
        if self.phases.windows(2).any(|pair| !(pair[0].until < pair[1].until)) {
            return Err(SimulationError::InitializationError(
                "burn phase end times must be strictly increasing".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MassDepletionSchedule {
    /// Two-phase ascent: high flow off the pad, reduced flow to circularize.
    fn default() -> Self {
        MassDepletionSchedule {
            phases: vec![
                BurnPhase {
                    until: 69.0,
                    mass_flow: 4492.0,
                },
                BurnPhase {
                    until: 280.0,
                    mass_flow: 1118.0,
                },
            ],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_schedule_phases() {
        let schedule = MassDepletionSchedule::default();

        assert_eq!(schedule.commanded_mass_flow(0.0), 4492.0);
        assert_eq!(schedule.commanded_mass_flow(68.999), 4492.0);
        assert_eq!(schedule.commanded_mass_flow(69.0), 1118.0);
        assert_eq!(schedule.commanded_mass_flow(279.9), 1118.0);
        assert_eq!(schedule.commanded_mass_flow(280.0), 0.0);
        assert_eq!(schedule.commanded_mass_flow(10_000.0), 0.0);
    }

    #[test]
    fn test_total_commanded_fuel() {
        let schedule = MassDepletionSchedule::default();

        // 4492 * 69 + 1118 * 211
        assert_abs_diff_eq!(schedule.total_commanded_fuel(), 545_846.0, epsilon = 1e-6);
    }

    #[test]
    fn test_empty_schedule_never_burns() {
        let schedule = MassDepletionSchedule::new(Vec::new()).unwrap();
        assert_eq!(schedule.commanded_mass_flow(0.0), 0.0);
        assert_eq!(schedule.total_commanded_fuel(), 0.0);
    }

    #[test]
    fn test_rejects_unordered_phases() {
        let phases = vec![
            BurnPhase {
                until: 100.0,
                mass_flow: 10.0,
            },
            BurnPhase {
                until: 50.0,
                mass_flow: 5.0,
            },
        ];
        assert!(MassDepletionSchedule::new(phases).is_err());
    }

    #[test]
    fn test_rejects_negative_mass_flow() {
        let phases = vec![BurnPhase {
            until: 100.0,
            mass_flow: -1.0,
        }];
        assert!(matches!(
            MassDepletionSchedule::new(phases),
            Err(SimulationError::InitializationError(_))
        ));
    }
}
