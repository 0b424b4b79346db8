pub mod environment;
pub mod fuel_management;
pub mod guidance;
pub mod mission;
pub mod propulsion;
pub mod rocket;
