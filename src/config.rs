//! Immutable simulation constants.
//!
//! Every physical and gameplay number the engine uses lives in
//! [`LanderConfig`]. A config value is handed to [`crate::sim::Simulation`]
//! at construction and threaded by reference into each component; nothing
//! reads ambient globals. Defaults reproduce the reference game tuning
//! (pixel units, y measured downward).
//!
//! Configs can be loaded from TOML. Every table and field is optional and
//! falls back to its default:
//!
//! ```toml
//! [physics]
//! gravity = 800.0
//!
//! [wind]
//! enabled = true
//! max_force = 90.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LanderConfig {
    pub physics: PhysicsConfig,
    pub vehicle: VehicleConfig,
    pub platforms: PlatformConfig,
    pub motion: MotionConfig,
    pub wind: WindConfig,
    pub reward: RewardConfig,
    pub episode: EpisodeConfig,
}

impl LanderConfig {
    /// Parse a (possibly partial) TOML document and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: LanderConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Endless arcade tuning: unbounded platform supply.
    pub fn arcade() -> Self {
        let mut config = Self::default();
        config.platforms.endless = true;
        config
    }

    /// Reject bounds that would break generation or integration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        let v = &self.vehicle;
        let pl = &self.platforms;
        let e = &self.episode;

        check(p.drag > 0.0 && p.drag <= 1.0, "physics.drag must be in (0, 1]")?;
        check(p.terminal_velocity > 0.0, "physics.terminal_velocity must be > 0")?;
        check(v.width > 0.0 && v.height > 0.0, "vehicle.width and vehicle.height must be > 0")?;
        check(v.max_fuel > 0.0, "vehicle.max_fuel must be > 0")?;
        check(v.fuel_drain_rate >= 0.0, "vehicle.fuel_drain_rate must be >= 0")?;
        check(
            v.max_landing_vx >= 0.0 && v.max_landing_vy >= 0.0,
            "vehicle landing limits must be >= 0",
        )?;
        check(pl.width > 0.0 && pl.height > 0.0, "platforms.width and platforms.height must be > 0")?;
        check(pl.min_dx >= 0.0, "platforms.min_dx must be >= 0")?;
        check(pl.min_dx <= pl.max_dx, "platforms.min_dx must be <= platforms.max_dx")?;
        check(pl.min_dy <= pl.max_dy, "platforms.min_dy must be <= platforms.max_dy")?;
        check(pl.min_y <= pl.baseline_y, "platforms.min_y must be <= platforms.baseline_y")?;
        check(pl.lookahead >= 1, "platforms.lookahead must be >= 1")?;
        check(
            pl.endless || pl.max_platforms >= 2,
            "platforms.max_platforms must be >= 2 unless platforms.endless is set",
        )?;
        check(
            (0.0..=1.0).contains(&self.motion.probability),
            "motion.probability must be in [0, 1]",
        )?;
        check(
            !self.motion.enabled || self.motion.amplitude > 0.0,
            "motion.amplitude must be > 0 when motion is enabled",
        )?;
        check(self.wind.max_force >= 0.0, "wind.max_force must be >= 0")?;
        check(self.wind.resample_interval >= 1, "wind.resample_interval must be >= 1")?;
        check(e.fixed_dt > 0.0, "episode.fixed_dt must be > 0")?;
        check(e.max_frame_dt > 0.0, "episode.max_frame_dt must be > 0")?;
        check(e.max_steps >= 1, "episode.max_steps must be >= 1")?;
        Ok(())
    }
}

fn check(ok: bool, message: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f64,               // px/s^2, +y is down
    pub drag: f64,                  // per-step multiplier on v.x
    pub terminal_velocity: f64,     // px/s, ceiling on downward v.y
    pub ground_level: f64,          // px
    pub ground_crash_margin: f64,   // px below ground_level that counts as impact
    pub ceiling_y: f64,             // px, above this the vehicle is out of bounds
    pub max_target_distance_x: f64, // px, horizontal leash to the target platform
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 800.0,
            drag: 0.98,
            terminal_velocity: 600.0,
            ground_level: 620.0,
            ground_crash_margin: 200.0,
            ceiling_y: -1000.0,
            max_target_distance_x: 2000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    pub width: f64,             // px
    pub height: f64,            // px
    pub max_fuel: f64,          // fuel units
    pub fuel_drain_rate: f64,   // fuel units/s while any thruster fires
    pub vertical_thrust: f64,   // px/s^2
    pub horizontal_thrust: f64, // px/s^2
    pub hover_multiplier: f64,  // vertical thrust scale when both sides fire
    pub max_landing_vx: f64,    // px/s
    pub max_landing_vy: f64,    // px/s
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 50.0,
            max_fuel: 100.0,
            fuel_drain_rate: 40.0,
            vertical_thrust: 1400.0,
            horizontal_thrust: 700.0,
            hover_multiplier: 1.5,
            max_landing_vx: 180.0,
            max_landing_vy: 220.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub width: f64,
    pub height: f64,
    pub base_height: f64, // cosmetic, never collides
    pub baseline_x: f64,  // platform 0 left edge
    pub baseline_y: f64,  // platform 0 top, also the lowest allowed top
    pub min_dx: f64,      // gap after the previous platform's right edge
    pub max_dx: f64,
    pub min_dy: f64,
    pub max_dy: f64,
    pub min_y: f64, // highest allowed top
    pub lookahead: usize,
    pub max_platforms: usize,
    pub endless: bool,
    pub cull_distance: f64,
}

impl PlatformConfig {
    /// Total platform supply, `None` when endless.
    pub fn platform_cap(&self) -> Option<usize> {
        if self.endless {
            None
        } else {
            Some(self.max_platforms)
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 20.0,
            base_height: 40.0,
            baseline_x: 1280.0 / 2.0 - 120.0 / 2.0,
            baseline_y: 620.0,
            min_dx: 200.0,
            max_dx: 400.0,
            min_dy: -150.0,
            max_dy: 100.0,
            min_y: 200.0,
            lookahead: 4,
            max_platforms: 11,
            endless: false,
            cull_distance: 1280.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub enabled: bool,
    pub probability: f64, // chance a non-initial platform oscillates
    pub amplitude: f64,   // px
    pub speed: f64,       // px/s, peak linear speed
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            probability: 0.5,
            amplitude: 60.0,
            speed: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    pub enabled: bool,
    pub max_force: f64,         // px/s^2
    pub resample_interval: u32, // steps
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_force: 120.0,
            resample_interval: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub time_penalty: f64,
    pub fuel_penalty: f64,
    pub distance_weight: f64,
    pub alignment_bonus: f64,
    pub descent_bonus: f64,
    pub approach_bonus: f64,
    pub approach_height: f64, // px above the target top
    pub approach_speed: f64,  // px/s
    pub landing_bonus: f64,
    pub soft_landing_bonus: f64,
    pub soft_landing_speed: f64,
    pub repeat_landing_penalty: f64,
    pub repeat_landing_grace: u32, // landings on one platform before the penalty starts
    pub completion_bonus: f64,
    pub crash_platform_penalty: f64,
    pub crash_platform_height: f64,
    pub crash_ground_penalty: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            time_penalty: -0.01,
            fuel_penalty: -0.05,
            distance_weight: 5.0,
            alignment_bonus: 0.1,
            descent_bonus: 0.05,
            approach_bonus: 0.1,
            approach_height: 100.0,
            approach_speed: 50.0,
            landing_bonus: 100.0,
            soft_landing_bonus: 10.0,
            soft_landing_speed: 10.0,
            repeat_landing_penalty: 50.0,
            repeat_landing_grace: 2,
            completion_bonus: 200.0,
            crash_platform_penalty: -30.0,
            crash_platform_height: 20.0,
            crash_ground_penalty: -100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeConfig {
    pub fixed_dt: f64,        // s, trainer timestep
    pub max_frame_dt: f64,    // s, clamp on wall-clock frames
    pub max_steps: u32,       // truncation budget
    pub relaunch_speed: f64,  // px/s upward on auto-relaunch
    pub heading_epsilon: f64, // px/s, below this heading reads 0
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_frame_dt: 0.05,
            max_steps: 1000,
            relaunch_speed: 50.0,
            heading_epsilon: 0.1,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(LanderConfig::default().validate().is_ok());
        assert!(LanderConfig::arcade().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = LanderConfig::from_toml_str(
            r#"
            [physics]
            gravity = 500.0

            [wind]
            enabled = true
            "#,
        )
        .unwrap();
        assert!((config.physics.gravity - 500.0).abs() < 1e-12);
        assert!((config.physics.drag - 0.98).abs() < 1e-12, "Untouched fields keep defaults");
        assert!(config.wind.enabled);
        assert_eq!(config.wind.resample_interval, 100);
        assert_eq!(config.vehicle, VehicleConfig::default());
    }

    #[test]
    fn reference_config_file_parses() {
        let config = LanderConfig::from_toml_str(include_str!("../config/lander.toml")).unwrap();
        assert_eq!(config.platforms.platform_cap(), Some(11));
    }

    #[test]
    fn inverted_spacing_rejected() {
        let err = LanderConfig::from_toml_str(
            r#"
            [platforms]
            min_dx = 500.0
            max_dx = 100.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("min_dx"));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = LanderConfig::from_toml_str("[physics\ngravity = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = LanderConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn endless_has_no_cap() {
        assert_eq!(LanderConfig::arcade().platforms.platform_cap(), None);
    }
}
