// Physical Constants
pub const STANDARD_GRAVITY: f64 = 9.81; // m/s², relates Isp to exhaust velocity
pub const EARTH_RADIUS: f64 = 6_371_000.0; // meters
pub const EARTH_MASS: f64 = 5.972e24; // kg
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11; // N⋅m²/kg²

// Reference Vehicle
pub const STRUCTURAL_MASS: f64 = 20_000.0; // kg, dry mass
pub const FUEL_MASS: f64 = 548_000.0; // kg
pub const ROCKET_DIAMETER: f64 = 4.0; // m
pub const SPECIFIC_IMPULSE: f64 = 300.0; // s
pub const ROCKET_DRAG_COEFFICIENT: f64 = 0.47; // sphere

// Launch Conditions
pub const LAUNCH_ALTITUDE: f64 = 100.0; // m above the surface
pub const INITIAL_MASS_FLOW: f64 = 7_500.0; // kg/s, replaced by the schedule on the first step

// Guidance Transition Altitudes
pub const FIRST_TRANSITION_ALTITUDE: f64 = 7_000.0; // m
pub const SECOND_TRANSITION_ALTITUDE: f64 = 25_000.0; // m
pub const THIRD_TRANSITION_ALTITUDE: f64 = 80_000.0; // m

// Simulation Parameters
pub const TIME_STEP: f64 = 0.1; // s
pub const MAX_SIMULATION_TIME: f64 = 20_000.0; // s
pub const LOG_INTERVAL: usize = 100_000; // iterations

// Reference Orbit
pub const LEO_ALTITUDE: f64 = 200_000.0; // m
