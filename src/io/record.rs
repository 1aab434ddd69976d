use serde::Serialize;

use crate::env::StepResult;
use crate::sim::{FlightState, Simulation};

/// One row of an episode trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    pub step: u64,
    pub time: f64,   // s
    pub x: f64,      // px
    pub y: f64,      // px, +down
    pub vx: f64,     // px/s
    pub vy: f64,     // px/s
    pub fuel: f64,   // [0, max_fuel]
    pub wind: f64,   // px/s^2
    pub thrust: bool,
    pub reward: f64,
    pub score: usize,
    pub landed: bool,
    pub crashed: bool,
    pub terminal: bool,
}

impl StepRecord {
    /// Record the simulation right after `result` was produced.
    pub fn capture(sim: &Simulation, result: &StepResult) -> Self {
        let v = sim.vehicle();
        Self {
            step: sim.steps(),
            time: sim.time(),
            x: v.pos.x,
            y: v.pos.y,
            vx: v.vel.x,
            vy: v.vel.y,
            fuel: v.fuel,
            wind: sim.wind().force(),
            thrust: v.thrusters.any(),
            reward: result.reward,
            score: result.info.score,
            landed: result.info.landed,
            crashed: result.info.crashed,
            terminal: sim.flight() == FlightState::Terminated,
        }
    }

    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }
}
