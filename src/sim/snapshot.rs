use serde::Serialize;

use crate::dynamics::state::Thrusters;
use crate::world::Platform;
use super::flight::FlightState;

/// Read-only copy of everything a renderer needs for one frame.
/// Owns its data, so nothing drawn from it can reach back into the
/// simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub step: u64,
    pub time: f64,
    pub vehicle: VehicleView,
    pub platforms: Vec<Platform>,
    pub wind: f64,
    pub flight: FlightState,
    pub score: usize,
    pub target: usize,
    pub ground_level: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleView {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub width: f64,
    pub height: f64,
    pub fuel: f64,
    pub max_fuel: f64,
    pub grounded: bool,
    pub thrusters: Thrusters,
}

impl VehicleView {
    pub fn fuel_fraction(&self) -> f64 {
        self.fuel / self.max_fuel
    }
}
