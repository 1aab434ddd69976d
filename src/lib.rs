pub mod collision;
pub mod config;
pub mod dynamics;
pub mod env;
pub mod error;
pub mod host;
pub mod io;
pub mod physics;
pub mod pilot;
pub mod sim;
pub mod world;

// Flat re-exports for hosts and trainers
pub use config::LanderConfig;
pub use env::{LanderEnv, Observation, StepInfo, StepResult};
pub use error::{ActionError, ConfigError};
pub use host::Session;
pub use physics::ThrustIntent;
pub use sim::{FlightState, Simulation, Snapshot};
