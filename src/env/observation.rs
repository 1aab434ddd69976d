use serde::Serialize;

use crate::config::LanderConfig;
use crate::sim::Simulation;

// Fixed slots, always present.
const REL_X: usize = 0;
const REL_Y: usize = 1;
const VX: usize = 2;
const VY: usize = 3;
const HEADING: usize = 4;
const FUEL: usize = 5;
const BASE_LEN: usize = 6;

/// Flat observation vector handed to the trainer.
///
/// Layout: `[rel_x, rel_y, vx, vy, heading, fuel_fraction]`, then the
/// current wind force when wind is enabled, then the target platform's
/// horizontal velocity when platform motion is enabled. Relative position
/// is vehicle feet minus the target's landing point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    values: Vec<f64>,
    #[serde(skip)]
    wind_slot: Option<usize>,
    #[serde(skip)]
    motion_slot: Option<usize>,
}

impl Observation {
    pub fn capture(sim: &Simulation) -> Self {
        let cfg = sim.config();
        let v = sim.vehicle();
        let target = sim.target_platform();
        let rel = v.pos - target.landing_point();

        let mut values = Vec::with_capacity(size(cfg));
        values.extend([
            rel.x,
            rel.y,
            v.vel.x,
            v.vel.y,
            v.heading(cfg.episode.heading_epsilon),
            v.fuel / cfg.vehicle.max_fuel,
        ]);

        let wind_slot = cfg.wind.enabled.then(|| {
            values.push(sim.wind().force());
            values.len() - 1
        });
        let motion_slot = cfg.motion.enabled.then(|| {
            values.push(target.velocity());
            values.len() - 1
        });

        Self { values, wind_slot, motion_slot }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Single-precision copy for learners that want `f32`.
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|&x| x as f32).collect()
    }

    pub fn rel_x(&self) -> f64 {
        self.values[REL_X]
    }

    pub fn rel_y(&self) -> f64 {
        self.values[REL_Y]
    }

    pub fn vx(&self) -> f64 {
        self.values[VX]
    }

    pub fn vy(&self) -> f64 {
        self.values[VY]
    }

    pub fn heading(&self) -> f64 {
        self.values[HEADING]
    }

    pub fn fuel_fraction(&self) -> f64 {
        self.values[FUEL]
    }

    pub fn wind(&self) -> Option<f64> {
        self.wind_slot.map(|i| self.values[i])
    }

    pub fn target_velocity(&self) -> Option<f64> {
        self.motion_slot.map(|i| self.values[i])
    }
}

/// Observation length under `cfg`.
pub fn size(cfg: &LanderConfig) -> usize {
    BASE_LEN + usize::from(cfg.wind.enabled) + usize::from(cfg.motion.enabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::ThrustIntent;

    #[test]
    fn base_layout_without_optional_slots() {
        let cfg = LanderConfig::default();
        let sim = Simulation::new(cfg.clone(), Some(3));
        let obs = Observation::capture(&sim);
        assert_eq!(obs.len(), 6);
        assert_eq!(obs.len(), size(&cfg));
        assert_eq!(obs.fuel_fraction(), 1.0);
        assert_eq!(obs.heading(), 0.0);
        assert_eq!(obs.wind(), None);
        assert_eq!(obs.target_velocity(), None);

        let target = sim.target_platform().landing_point();
        assert_eq!(obs.rel_x(), sim.vehicle().pos.x - target.x);
        assert_eq!(obs.rel_y(), sim.vehicle().pos.y - target.y);
    }

    #[test]
    fn optional_slots_follow_config() {
        let mut cfg = LanderConfig::default();
        cfg.wind.enabled = true;
        cfg.motion.enabled = true;
        let sim = Simulation::new(cfg.clone(), Some(3));
        let obs = Observation::capture(&sim);
        assert_eq!(obs.len(), 8);
        assert_eq!(obs.wind(), Some(0.0));
        assert_eq!(obs.target_velocity(), Some(sim.target_platform().velocity()));

        cfg.wind.enabled = false;
        assert_eq!(size(&cfg), 7);
        let obs = Observation::capture(&Simulation::new(cfg, Some(3)));
        assert_eq!(obs.wind(), None);
        assert_eq!(obs.as_slice()[6], obs.target_velocity().unwrap());
    }

    #[test]
    fn fuel_fraction_stays_in_unit_interval() {
        let mut sim = Simulation::new(LanderConfig::default(), Some(8));
        for _ in 0..400 {
            sim.step(ThrustIntent::Hover, 1.0 / 60.0);
            let f = Observation::capture(&sim).fuel_fraction();
            assert!((0.0..=1.0).contains(&f), "fuel fraction {f} out of range");
        }
    }
}
