use nalgebra::Vector2;
use rand::Rng;

use crate::config::{PhysicsConfig, WindConfig};

/// Constant downward gravity (+y is down).
pub fn gravity_accel(cfg: &PhysicsConfig) -> Vector2<f64> {
    Vector2::new(0.0, cfg.gravity)
}

// ---------------------------------------------------------------------------
// Wind
// ---------------------------------------------------------------------------

/// Piecewise-constant horizontal wind. The value jumps to a fresh uniform
/// sample in `[-max_force, max_force]` every `resample_interval` steps and
/// holds until the next boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Wind {
    force: f64,
    frames_until_resample: u32,
}

impl Wind {
    /// Zero wind with a full interval ahead of it.
    pub fn calm(cfg: &WindConfig) -> Self {
        Self {
            force: 0.0,
            frames_until_resample: cfg.resample_interval,
        }
    }

    pub fn force(&self) -> f64 {
        self.force
    }

    pub fn frames_until_resample(&self) -> u32 {
        self.frames_until_resample
    }

    /// Count down one step. Returns the new value on a resample boundary.
    /// Disabled wind never draws from `rng`.
    pub fn advance<R: Rng + ?Sized>(&mut self, cfg: &WindConfig, rng: &mut R) -> Option<f64> {
        if !cfg.enabled {
            return None;
        }
        self.frames_until_resample = self.frames_until_resample.saturating_sub(1);
        if self.frames_until_resample > 0 {
            return None;
        }
        self.frames_until_resample = cfg.resample_interval;
        self.force = rng.gen_range(-cfg.max_force..=cfg.max_force);
        tracing::trace!(force = self.force, "wind resampled");
        Some(self.force)
    }
}
