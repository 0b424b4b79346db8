use crate::{control::rocket::VehicleParameters, utils::vector2d::Vector2D};

/// Floor for speeds and velocity components before they are divided by or
/// used as a drag direction.
pub const VELOCITY_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aerodynamics {
    pub drag_coefficient: f64,
    pub frontal_area: f64,
}

impl Aerodynamics {
    pub fn new(drag_coefficient: f64, frontal_area: f64) -> Self {
        Aerodynamics {
            drag_coefficient,
            frontal_area,
        }
    }

    pub fn for_vehicle(vehicle: &VehicleParameters) -> Self {
        Aerodynamics::new(vehicle.drag_coefficient, vehicle.frontal_area())
    }

    pub fn drag_magnitude(&self, air_density: f64, speed: f64) -> f64 {
        0.5 * self.drag_coefficient * air_density * speed.powi(2) * self.frontal_area
    }

    /// Drag split into radial (`x`) and tangential (`y`) parts.
    ///
    /// Each part is proportional to its share of the speed and points against
    /// its own velocity component; a component at rest gets no drag.
    pub fn calculate_drag(&self, velocity: Vector2D, air_density: f64) -> Vector2D {
        let speed = velocity.magnitude().max(VELOCITY_EPSILON);
        let drag = self.drag_magnitude(air_density, speed);

        Vector2D::new(
            opposing_component(velocity.x, drag, speed),
            opposing_component(velocity.y, drag, speed),
        )
    }
}

fn opposing_component(component: f64, drag: f64, speed: f64) -> f64 {
    if component.abs() > VELOCITY_EPSILON {
        -(drag * component.abs() / speed).copysign(component)
    } else {
        0.0
    }
}
