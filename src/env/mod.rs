//! Fixed-timestep episode wrapper for reinforcement-learning trainers.
//!
//! Each [`LanderEnv::step`] advances the simulation by `fixed_dt`, shapes a
//! reward, and relaunches the vehicle automatically after every landing
//! that does not finish the course.

pub mod episode;
pub mod observation;
pub mod reward;

pub use episode::EpisodeCounters;
pub use observation::Observation;
pub use reward::{shape, RewardInput, TargetPad, Terminal};

use serde::Serialize;

use crate::config::LanderConfig;
use crate::error::{ActionError, ConfigError};
use crate::physics::ThrustIntent;
use crate::sim::{Simulation, StepOutcome};

/// Diagnostics returned with every step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StepInfo {
    pub score: usize,
    pub fuel: f64,
    pub landed: bool,
    pub crashed: bool,
}

/// Returned by [`LanderEnv::reset`]. Carries nothing yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResetInfo {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f64,
    pub terminated: bool,
    pub truncated: bool,
    pub info: StepInfo,
}

pub struct LanderEnv {
    sim: Simulation,
    counters: EpisodeCounters,
}

impl LanderEnv {
    /// Number of discrete actions accepted by [`LanderEnv::step_index`].
    pub const ACTIONS: usize = ThrustIntent::ALL.len();

    /// Create and reset. The vehicle is already airborne when this returns.
    pub fn new(config: LanderConfig, seed: Option<u64>) -> Self {
        let mut env = Self {
            sim: Simulation::new(config, seed),
            counters: EpisodeCounters::default(),
        };
        env.start_episode();
        env
    }

    /// Like [`LanderEnv::new`], but reject a config that fails validation.
    pub fn try_new(config: LanderConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, seed))
    }

    /// Start a new episode. A seed reseeds the generator; `None` continues
    /// the current random stream.
    pub fn reset(&mut self, seed: Option<u64>) -> (Observation, ResetInfo) {
        self.sim.reset(seed);
        self.start_episode();
        (self.observation(), ResetInfo::default())
    }

    fn start_episode(&mut self) {
        self.sim.relaunch(self.sim.config().episode.relaunch_speed);
        self.counters.reset(self.target_distance());
    }

    /// Step with a raw action id in `0..ACTIONS`.
    pub fn step_index(&mut self, action: u8) -> Result<StepResult, ActionError> {
        let intent = ThrustIntent::try_from(action)?;
        Ok(self.step(intent))
    }

    pub fn step(&mut self, intent: ThrustIntent) -> StepResult {
        if self.sim.flight().is_terminal() {
            return StepResult {
                observation: self.observation(),
                reward: 0.0,
                terminated: true,
                truncated: false,
                info: self.info(false, false),
            };
        }

        let dt = self.sim.config().episode.fixed_dt;
        let target_index = self.sim.target_index();
        let outcome = self.sim.step(intent, dt);

        let target = self.sim.field().get_or_last(target_index);
        let pad = TargetPad {
            left: target.x,
            right: target.x + target.width,
            top: target.top(),
        };
        let distance = (self.sim.vehicle().pos - target.landing_point()).norm();
        let terminal = self.classify_terminal(&outcome);

        let input = RewardInput {
            thrust_applied: outcome.thrust_applied,
            prev_distance: self.counters.prev_distance,
            distance,
            pos: self.sim.vehicle().pos,
            vel: self.sim.vehicle().vel,
            target: pad,
            terminal,
        };
        let reward = shape(&input, &self.sim.config().reward);

        self.counters.steps += 1;
        self.counters.total_reward += reward;
        self.counters.prev_distance = distance;

        let terminated = match terminal {
            Terminal::Continuing => false,
            Terminal::Crashed | Terminal::OutOfBounds => true,
            Terminal::Landed { completed: true, .. } => {
                self.sim.complete();
                true
            }
            Terminal::Landed { completed: false, .. } => {
                self.sim.relaunch(self.sim.config().episode.relaunch_speed);
                self.counters.prev_distance = self.target_distance();
                false
            }
        };
        let truncated = self.counters.steps >= self.sim.config().episode.max_steps;

        if terminated || truncated {
            tracing::debug!(
                steps = self.counters.steps,
                score = self.sim.score(),
                total_reward = self.counters.total_reward,
                terminated,
                truncated,
                "episode finished"
            );
        }

        StepResult {
            observation: self.observation(),
            reward,
            terminated,
            truncated,
            info: self.info(outcome.landed_on().is_some(), outcome.crashed().is_some()),
        }
    }

    fn classify_terminal(&mut self, outcome: &StepOutcome) -> Terminal {
        if let Some(platform) = outcome.landed_on() {
            return Terminal::Landed {
                speed: self.sim.vehicle().speed(),
                count: self.counters.record_landing(platform),
                completed: self.sim.is_exhausted(),
            };
        }
        if outcome.crashed().is_some() {
            Terminal::Crashed
        } else if outcome.out_of_bounds {
            Terminal::OutOfBounds
        } else {
            Terminal::Continuing
        }
    }

    fn info(&self, landed: bool, crashed: bool) -> StepInfo {
        StepInfo {
            score: self.sim.score(),
            fuel: self.sim.vehicle().fuel,
            landed,
            crashed,
        }
    }

    fn target_distance(&self) -> f64 {
        (self.sim.vehicle().pos - self.sim.target_platform().landing_point()).norm()
    }

    /// Recompute the distance baseline after editing the simulation
    /// directly through [`LanderEnv::simulation_mut`].
    pub fn sync_distance(&mut self) {
        self.counters.prev_distance = self.target_distance();
    }

    pub fn observation(&self) -> Observation {
        Observation::capture(&self.sim)
    }

    pub fn observation_size(&self) -> usize {
        observation::size(self.sim.config())
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    pub fn counters(&self) -> &EpisodeCounters {
        &self.counters
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
