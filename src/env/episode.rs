use std::collections::BTreeMap;

/// Per-episode bookkeeping the trainer needs on top of the simulation.
/// Everything here is cleared on reset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpisodeCounters {
    pub steps: u32,
    pub prev_distance: f64,
    pub total_reward: f64,
    landings: BTreeMap<usize, u32>,
}

impl EpisodeCounters {
    pub fn reset(&mut self, distance: f64) {
        *self = Self {
            prev_distance: distance,
            ..Self::default()
        };
    }

    /// Count a landing on `platform`; returns the new count.
    pub fn record_landing(&mut self, platform: usize) -> u32 {
        let count = self.landings.entry(platform).or_insert(0);
        *count += 1;
        *count
    }

    pub fn landing_count(&self, platform: usize) -> u32 {
        self.landings.get(&platform).copied().unwrap_or(0)
    }

    pub fn total_landings(&self) -> u32 {
        self.landings.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_per_platform() {
        let mut c = EpisodeCounters::default();
        assert_eq!(c.record_landing(0), 1);
        assert_eq!(c.record_landing(0), 2);
        assert_eq!(c.record_landing(3), 1);
        assert_eq!(c.landing_count(0), 2);
        assert_eq!(c.landing_count(7), 0);
        assert_eq!(c.total_landings(), 3);
    }

    #[test]
    fn reset_clears_everything() {
        let mut c = EpisodeCounters::default();
        c.record_landing(1);
        c.steps = 40;
        c.total_reward = 12.5;
        c.reset(321.0);
        assert_eq!(c.landing_count(1), 0);
        assert_eq!(c.steps, 0);
        assert_eq!(c.total_reward, 0.0);
        assert_eq!(c.prev_distance, 321.0);
    }
}
