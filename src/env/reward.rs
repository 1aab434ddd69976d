use nalgebra::Vector2;

use crate::config::RewardConfig;

// ---------------------------------------------------------------------------
// Reward shaping
// ---------------------------------------------------------------------------

/// How the step ended, as far as the shaper is concerned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Terminal {
    Continuing,
    Crashed,
    OutOfBounds,
    Landed {
        /// Speed after snapping onto the pad.
        speed: f64,
        /// Landings on this platform so far this episode, this one included.
        count: u32,
        /// The platform supply is exhausted after this landing.
        completed: bool,
    },
}

/// Target platform geometry at the time of the step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetPad {
    pub left: f64,
    pub right: f64,
    pub top: f64,
}

impl TargetPad {
    /// Strict: the edges themselves do not count.
    pub fn is_aligned(&self, x: f64) -> bool {
        x > self.left && x < self.right
    }
}

/// Everything one step's reward depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardInput {
    pub thrust_applied: bool,
    /// Distance to the target landing point before and after the step.
    pub prev_distance: f64,
    pub distance: f64,
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub target: TargetPad,
    pub terminal: Terminal,
}

/// Shaped reward for one step. Pure: same input, same reward.
pub fn shape(input: &RewardInput, cfg: &RewardConfig) -> f64 {
    let mut reward = cfg.time_penalty;

    if input.thrust_applied {
        reward += cfg.fuel_penalty;
    }

    // closing on the target pays, drifting away costs
    reward += (input.prev_distance - input.distance) * cfg.distance_weight;

    let aligned = input.target.is_aligned(input.pos.x);
    if aligned {
        reward += cfg.alignment_bonus;
        if input.vel.y > 0.0 {
            reward += cfg.descent_bonus;
        }
        if input.pos.y > input.target.top - cfg.approach_height
            && input.vel.norm() < cfg.approach_speed
        {
            reward += cfg.approach_bonus;
        }
    }

    match input.terminal {
        Terminal::Continuing => {}
        Terminal::Crashed => {
            let at_pad = aligned && (input.pos.y - input.target.top).abs() < cfg.crash_platform_height;
            reward += if at_pad {
                cfg.crash_platform_penalty
            } else {
                cfg.crash_ground_penalty
            };
        }
        Terminal::OutOfBounds => reward += cfg.crash_ground_penalty,
        Terminal::Landed { speed, count, completed } => {
            reward += cfg.landing_bonus;
            if speed < cfg.soft_landing_speed {
                reward += cfg.soft_landing_bonus;
            }
            if count > cfg.repeat_landing_grace {
                reward -= cfg.repeat_landing_penalty * f64::from(count - 1);
            }
            if completed {
                reward += cfg.completion_bonus;
            }
        }
    }

    reward
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
