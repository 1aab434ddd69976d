pub mod actuator;
pub mod environment;

pub use actuator::{actuate, Actuation, ThrustIntent};
pub use environment::{gravity_accel, Wind};
