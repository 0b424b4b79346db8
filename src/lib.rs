pub mod config;
pub mod constants;
pub mod control;
pub mod errors;
pub mod simulation;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use config::{InitialConditions, RunParameters, SimulationConfig};
pub use constants::*;
pub use control::environment::air_density;
pub use control::fuel_management::{BurnPhase, MassDepletionSchedule};
pub use control::guidance::{GuidanceMode, GuidanceProfile};
pub use control::mission::CelestialBody;
pub use control::rocket::{TransitionAltitudes, VehicleParameters};

// Re-export commonly used items from trajectory_system
pub use trajectory_system::integrator::{IntegrationMethod, Integrator};
pub use trajectory_system::kinematics::{EquationsOfMotion, VehicleState};

pub use simulation::driver::{Simulation, SimulationStatus, SimulationSummary, TerminationReason};
pub use simulation::history::StateHistory;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::metrics::FlightMetrics;
pub use telemetry_system::telemetry::{
    EventLog, Notifier, SilentNotifier, SimulationEvent, TracingNotifier,
};

// Re-export commonly used utilities
pub use utils::vector2d::Vector2D;
