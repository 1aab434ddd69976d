//! Scripted pilots that drive the trainer env without a learner.

pub mod heuristic;
pub mod pid;

pub use heuristic::HeuristicPilot;
pub use pid::Pid;

use crate::env::Observation;
use crate::physics::ThrustIntent;

/// Trait for autopilots.
///
/// Implement this to plug a policy into the headless runner or the
/// viewer's autopilot toggle.
pub trait Pilot {
    /// Choose the next intent from the current observation.
    fn decide(&mut self, obs: &Observation, dt: f64) -> ThrustIntent;

    /// Reset internal state (e.g., PID integrators) between episodes.
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

/// Does nothing, every step.
#[derive(Debug, Clone, Copy, Default)]
pub struct Coast;

impl Pilot for Coast {
    fn decide(&mut self, _obs: &Observation, _dt: f64) -> ThrustIntent {
        ThrustIntent::None
    }

    fn name(&self) -> &str {
        "coast"
    }
}
