use std::time::Duration;

use crate::config::LanderConfig;
use crate::physics::ThrustIntent;
use crate::sim::{Simulation, Snapshot, StepOutcome};

// ---------------------------------------------------------------------------
// Frame clock
// ---------------------------------------------------------------------------

/// Turns measured frame time into a simulation step, clamped so a stall
/// (window drag, breakpoint) cannot produce one huge step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    max_dt: f64, // s
}

impl FrameClock {
    pub fn new(max_dt: f64) -> Self {
        Self { max_dt }
    }

    pub fn step_dt(&self, elapsed: Duration) -> f64 {
        elapsed.as_secs_f64().min(self.max_dt)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One interactive run. The host feeds it held-key intents and measured
/// frame times and draws from [`Session::snapshot`].
#[derive(Debug, Clone)]
pub struct Session {
    sim: Simulation,
    clock: FrameClock,
    best_score: usize,
}

impl Session {
    pub fn new(config: LanderConfig, seed: Option<u64>) -> Self {
        let clock = FrameClock::new(config.episode.max_frame_dt);
        Self {
            sim: Simulation::new(config, seed),
            clock,
            best_score: 0,
        }
    }

    /// Step by the clamped frame time, then drop platforms that scrolled
    /// far behind the vehicle.
    pub fn advance(&mut self, intent: ThrustIntent, elapsed: Duration) -> StepOutcome {
        let dt = self.clock.step_dt(elapsed);
        let outcome = self.sim.step(intent, dt);
        self.sim.cull(self.sim.vehicle().pos.x);
        self.best_score = self.best_score.max(self.sim.score());
        outcome
    }

    /// Start over on a fresh layout, back in the idle state.
    pub fn restart(&mut self, seed: Option<u64>) {
        tracing::info!(score = self.sim.score(), best = self.best_score, "restart");
        self.sim.reset(seed);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.sim.snapshot()
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn score(&self) -> usize {
        self.sim.score()
    }

    pub fn best_score(&self) -> usize {
        self.best_score
    }

    pub fn is_over(&self) -> bool {
        self.sim.flight().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::FlightState;

    #[test]
    fn clock_clamps_long_frames() {
        let clock = FrameClock::new(0.05);
        assert_eq!(clock.step_dt(Duration::from_millis(16)), 0.016);
        assert_eq!(clock.step_dt(Duration::from_secs(3)), 0.05);
    }

    #[test]
    fn stalled_frame_moves_like_one_clamped_step() {
        let cfg = LanderConfig::default();
        let mut stalled = Session::new(cfg.clone(), Some(4));
        let mut clamped = Session::new(cfg, Some(4));
        stalled.advance(ThrustIntent::Hover, Duration::from_secs(2));
        clamped.advance(ThrustIntent::Hover, Duration::from_millis(50));
        assert_eq!(stalled.snapshot(), clamped.snapshot());
    }

    #[test]
    fn waits_for_input_then_flies() {
        let mut s = Session::new(LanderConfig::arcade(), Some(2));
        for _ in 0..30 {
            s.advance(ThrustIntent::None, Duration::from_millis(16));
        }
        assert_eq!(s.simulation().flight(), FlightState::Idle);
        s.advance(ThrustIntent::Hover, Duration::from_millis(16));
        assert_eq!(s.simulation().flight(), FlightState::Airborne);
    }

    #[test]
    fn leaving_the_course_ends_run_until_restart() {
        let mut s = Session::new(LanderConfig::arcade(), Some(2));
        let mut frames = 0;
        while !s.is_over() && frames < 2_000 {
            s.advance(ThrustIntent::Hover, Duration::from_millis(16));
            frames += 1;
        }
        assert!(s.is_over(), "Climbing past the ceiling should end the run");
        s.restart(Some(2));
        assert!(!s.is_over());
        assert_eq!(s.simulation().flight(), FlightState::Idle);
        assert_eq!(s.score(), 0);
    }
}
