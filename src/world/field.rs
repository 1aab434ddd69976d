use std::f64::consts::TAU;

use rand::Rng;

use crate::config::LanderConfig;
use super::platform::Platform;

// ---------------------------------------------------------------------------
// Procedural platform field
// ---------------------------------------------------------------------------

/// Active platforms in generation order, indices contiguous.
///
/// Always holds at least one platform: culling never removes the most
/// recently generated one, so lookups can fall back to it.
#[derive(Debug, Clone)]
pub struct PlatformField {
    platforms: Vec<Platform>,
    next_index: usize,
    cap: Option<usize>,
}

impl PlatformField {
    /// Platform 0 at the baseline, then enough platforms to satisfy the
    /// lookahead from index 0.
    pub fn generate<R: Rng + ?Sized>(cfg: &LanderConfig, rng: &mut R) -> Self {
        let pc = &cfg.platforms;
        let mut field = Self {
            platforms: vec![Platform::fixed(0, pc.baseline_x, pc.baseline_y, pc.width, pc.height)],
            next_index: 1,
            cap: pc.platform_cap(),
        };
        field.ensure_lookahead(0, cfg, rng);
        field
    }

    /// Generate until `lookahead` platforms exist beyond `highest_reached`,
    /// or the supply cap is hit.
    pub fn ensure_lookahead<R: Rng + ?Sized>(
        &mut self,
        highest_reached: usize,
        cfg: &LanderConfig,
        rng: &mut R,
    ) {
        while self.next_index <= highest_reached + cfg.platforms.lookahead {
            if !self.spawn_next(cfg, rng) {
                break;
            }
        }
    }

    fn spawn_next<R: Rng + ?Sized>(&mut self, cfg: &LanderConfig, rng: &mut R) -> bool {
        if self.cap.is_some_and(|cap| self.next_index >= cap) {
            return false;
        }
        let pc = &cfg.platforms;
        let prev = self.last();

        let dx = rng.gen_range(pc.min_dx..=pc.max_dx);
        let dy = rng.gen_range(pc.min_dy..=pc.max_dy);
        let initial_x = prev.initial_x + prev.width + dx;
        let y = (prev.y + dy).clamp(pc.min_y, pc.baseline_y);

        let mc = &cfg.motion;
        let index = self.next_index;
        let platform = if mc.enabled && rng.gen_bool(mc.probability) {
            let speed = if rng.gen_bool(0.5) { mc.speed } else { -mc.speed };
            let phase = rng.gen_range(0.0..TAU);
            Platform::oscillating(index, initial_x, y, pc.width, pc.height, mc.amplitude, speed, phase)
        } else {
            Platform::fixed(index, initial_x, y, pc.width, pc.height)
        };

        tracing::trace!(index, x = initial_x, y, moving = platform.is_moving(), "platform generated");
        self.platforms.push(platform);
        self.next_index += 1;
        true
    }

    /// Move oscillating platforms by one step.
    pub fn advance(&mut self, dt: f64) {
        for p in &mut self.platforms {
            p.advance(dt);
        }
    }

    /// Drop leading platforms whose right edge can never again reach past
    /// `cutoff_x`, over their whole oscillation. Platforms at or beyond
    /// `keep_from` and the last generated one always stay, and the
    /// survivors stay contiguous. Returns how many were removed.
    pub fn cull(&mut self, cutoff_x: f64, keep_from: usize) -> usize {
        let last_index = self.last().index;
        let stale = self
            .platforms
            .iter()
            .take_while(|p| {
                p.index < keep_from && p.index != last_index && p.sweep().1 + p.width <= cutoff_x
            })
            .count();
        self.platforms.drain(..stale);
        stale
    }

    pub fn active(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn get(&self, index: usize) -> Option<&Platform> {
        let first = self.platforms.first()?.index;
        self.platforms.get(index.checked_sub(first)?)
    }

    /// Platform `index`, or the last generated one when `index` is past the
    /// supply or already culled.
    pub fn get_or_last(&self, index: usize) -> &Platform {
        self.get(index).unwrap_or_else(|| self.last())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Platform> {
        let first = self.platforms.first()?.index;
        self.platforms.get_mut(index.checked_sub(first)?)
    }

    pub fn last(&self) -> &Platform {
        &self.platforms[self.platforms.len() - 1]
    }

    /// Number of platforms generated so far, culled ones included.
    pub fn generated(&self) -> usize {
        self.next_index
    }

    pub fn cap(&self) -> Option<usize> {
        self.cap
    }

    /// True once `target_index` lies past a finite supply.
    pub fn is_exhausted(&self, target_index: usize) -> bool {
        self.cap.is_some_and(|cap| target_index >= cap)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::platform::Motion;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn moving_config() -> LanderConfig {
        let mut cfg = LanderConfig::arcade();
        cfg.motion.enabled = true;
        cfg
    }

    #[test]
    fn first_platform_at_baseline() {
        let cfg = LanderConfig::default();
        let field = PlatformField::generate(&cfg, &mut ChaCha8Rng::seed_from_u64(1));
        let p0 = &field.active()[0];
        assert_eq!(p0.index, 0);
        assert_eq!(p0.x, cfg.platforms.baseline_x);
        assert_eq!(p0.y, cfg.platforms.baseline_y);
        assert_eq!(p0.motion, Motion::Static);
        assert_eq!(field.generated(), 1 + cfg.platforms.lookahead);
    }

    #[test]
    fn anchors_strictly_increase() {
        let cfg = moving_config();
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut field = PlatformField::generate(&cfg, &mut rng);
            field.ensure_lookahead(40, &cfg, &mut rng);
            for pair in field.active().windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                assert_eq!(b.index, a.index + 1);
                assert!(
                    b.initial_x >= a.initial_x + a.width + cfg.platforms.min_dx,
                    "seed {seed}: platform {} too close",
                    b.index
                );
                assert!(b.initial_x <= a.initial_x + a.width + cfg.platforms.max_dx);
                assert!(b.y >= cfg.platforms.min_y && b.y <= cfg.platforms.baseline_y);
            }
        }
    }

    #[test]
    fn oscillating_platforms_stay_in_band() {
        let cfg = moving_config();
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let mut field = PlatformField::generate(&cfg, &mut rng);
        field.ensure_lookahead(30, &cfg, &mut rng);
        assert!(field.active().iter().any(|p| p.is_moving()), "Some platforms should oscillate");
        assert!(!field.active()[0].is_moving(), "Platform 0 never moves");
        for _ in 0..5_000 {
            field.advance(1.0 / 60.0);
            for p in field.active() {
                if let Motion::Oscillating { amplitude, .. } = p.motion {
                    assert!((p.x - p.initial_x).abs() <= amplitude + 1e-9);
                }
            }
        }
    }

    #[test]
    fn supply_cap_limits_generation() {
        let cfg = LanderConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut field = PlatformField::generate(&cfg, &mut rng);
        field.ensure_lookahead(100, &cfg, &mut rng);
        assert_eq!(field.generated(), 11);
        assert!(!field.is_exhausted(10));
        assert!(field.is_exhausted(11));
    }

    #[test]
    fn lookup_falls_back_to_last() {
        let cfg = LanderConfig::default();
        let field = PlatformField::generate(&cfg, &mut ChaCha8Rng::seed_from_u64(5));
        let last = field.last().index;
        assert_eq!(field.get_or_last(1).index, 1);
        assert_eq!(field.get_or_last(999).index, last);
    }

    #[test]
    fn cull_keeps_protected_platforms() {
        let cfg = moving_config();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut field = PlatformField::generate(&cfg, &mut rng);
        field.ensure_lookahead(10, &cfg, &mut rng);
        let far_x = field.get(8).map(|p| p.x).unwrap();
        let removed = field.cull(far_x - 10.0, 6);
        assert!(removed > 0);
        assert!(field.get(6).is_some(), "keep_from and beyond survive");
        assert!(field.get(0).is_none());
        assert_eq!(field.get_or_last(0).index, field.last().index, "Culled index falls back");
        assert_eq!(field.active()[0].index, field.active().iter().map(|p| p.index).min().unwrap());
    }

    #[test]
    fn cull_keeps_platforms_that_can_swing_back() {
        let cfg = LanderConfig::default();
        let mut field = PlatformField::generate(&cfg, &mut ChaCha8Rng::seed_from_u64(4));
        let p1 = field.get(1).unwrap().clone();
        let moving = Platform::oscillating(1, p1.initial_x, p1.y, p1.width, p1.height, 60.0, 40.0, 0.0);
        *field.get_mut(1).unwrap() = moving;
        *field.get_mut(0).unwrap() = Platform::fixed(0, -10_000.0, 600.0, 120.0, 20.0);
        // the pad's current right edge is behind the cutoff, its swing is not
        let cutoff = p1.initial_x + p1.width + 30.0;
        assert_eq!(field.cull(cutoff, 3), 1);
        assert!(field.get(1).is_some(), "Oscillating pad can still come back");
        assert_eq!(field.cull(cutoff + 60.0, 3), 1, "Culled once the whole swing is behind");
    }

    #[test]
    fn cull_never_empties_field() {
        let cfg = LanderConfig::default();
        let mut field = PlatformField::generate(&cfg, &mut ChaCha8Rng::seed_from_u64(2));
        field.cull(1e9, usize::MAX);
        assert_eq!(field.active().len(), 1);
    }

    #[test]
    fn same_seed_same_layout() {
        let cfg = moving_config();
        let a = PlatformField::generate(&cfg, &mut ChaCha8Rng::seed_from_u64(42));
        let b = PlatformField::generate(&cfg, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a.active(), b.active());
    }
}
