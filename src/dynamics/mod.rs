pub mod integrator;
pub mod state;

pub use integrator::{integrate, Forces};
pub use state::{Thrusters, Vehicle};
