use crate::env::Observation;
use crate::physics::ThrustIntent;
use super::pid::Pid;
use super::Pilot;

/// Rule-based autopilot: a PID tracks a horizontal speed set-point that
/// points at the target pad, and a descent-rate envelope that tightens
/// with height decides when to burn. Side thrusters also lift, so lateral
/// corrections are only made while falling or when lift is needed anyway.
#[derive(Debug, Clone)]
pub struct HeuristicPilot {
    lateral: Pid,
    pub approach_gain: f64,    // 1/s, desired vx per px of offset
    pub max_approach_vx: f64,  // px/s
    pub descent_floor: f64,    // px/s, allowed sink rate at the pad
    pub descent_gain: f64,     // 1/s, extra sink rate per px of height
    pub descent_cap: f64,      // px/s
    pub pad_half_width: f64,   // px
    pub clearance: f64,        // px, minimum height while not over the pad
    pub deadband: f64,         // PID output below which no side burn is made
}

impl Default for HeuristicPilot {
    fn default() -> Self {
        Self {
            lateral: Pid::new(1.0, 0.05, 0.02).with_integral_limit(200.0),
            approach_gain: 0.6,
            max_approach_vx: 160.0,
            descent_floor: 60.0,
            descent_gain: 0.8,
            descent_cap: 200.0,
            pad_half_width: 40.0,
            clearance: 80.0,
            deadband: 25.0,
        }
    }
}

impl HeuristicPilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink rate (px/s, +down) tolerated at `height` px above the pad.
    pub fn descent_limit(&self, height: f64) -> f64 {
        (self.descent_floor + height.max(0.0) * self.descent_gain).min(self.descent_cap)
    }
}

impl Pilot for HeuristicPilot {
    fn decide(&mut self, obs: &Observation, dt: f64) -> ThrustIntent {
        let (rel_x, rel_y) = (obs.rel_x(), obs.rel_y());
        let target_vx = obs.target_velocity().unwrap_or(0.0);

        let desired_vx = target_vx
            + (-rel_x * self.approach_gain).clamp(-self.max_approach_vx, self.max_approach_vx);
        let lateral = self.lateral.update(desired_vx - obs.vx(), dt);

        // rel_y < 0 means above the pad top
        let height = -rel_y;
        let over_pad = rel_x.abs() < self.pad_half_width;
        let need_lift = obs.vy() > self.descent_limit(height) || (!over_pad && height < self.clearance);

        let side = if lateral > self.deadband {
            Some(ThrustIntent::PushRight)
        } else if lateral < -self.deadband {
            Some(ThrustIntent::PushLeft)
        } else {
            None
        };

        match (need_lift, side) {
            (true, Some(push)) => push,
            (true, None) => ThrustIntent::Hover,
            (false, Some(push)) if obs.vy() > 0.0 => push,
            _ => ThrustIntent::None,
        }
    }

    fn reset(&mut self) {
        self.lateral.reset();
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LanderConfig;
    use crate::env::LanderEnv;
    use crate::sim::Simulation;
    use nalgebra::Vector2;

    const DT: f64 = 1.0 / 60.0;

    /// Observation with the vehicle at `offset` from the target landing
    /// point, moving at `vel`.
    fn observe(offset: Vector2<f64>, vel: Vector2<f64>) -> Observation {
        let mut sim = Simulation::new(LanderConfig::default(), Some(1));
        let point = sim.target_platform().landing_point();
        sim.place_vehicle(point + offset, vel);
        Observation::capture(&sim)
    }

    #[test]
    fn steers_toward_distant_pad() {
        let mut pilot = HeuristicPilot::new();
        let obs = observe(Vector2::new(-800.0, -300.0), Vector2::new(0.0, 300.0));
        assert_eq!(pilot.decide(&obs, DT), ThrustIntent::PushRight);
        pilot.reset();
        let obs = observe(Vector2::new(800.0, -300.0), Vector2::new(0.0, 300.0));
        assert_eq!(pilot.decide(&obs, DT), ThrustIntent::PushLeft);
    }

    #[test]
    fn brakes_when_sinking_fast_over_pad() {
        let mut pilot = HeuristicPilot::new();
        let obs = observe(Vector2::new(0.0, -50.0), Vector2::new(0.0, 300.0));
        assert_eq!(pilot.decide(&obs, DT), ThrustIntent::Hover);
    }

    #[test]
    fn coasts_when_slow_above_pad() {
        let mut pilot = HeuristicPilot::new();
        let obs = observe(Vector2::new(0.0, -200.0), Vector2::new(0.0, 20.0));
        assert_eq!(pilot.decide(&obs, DT), ThrustIntent::None);
    }

    #[test]
    fn descent_limit_tightens_near_pad() {
        let pilot = HeuristicPilot::new();
        assert_eq!(pilot.descent_limit(-10.0), 60.0);
        assert!(pilot.descent_limit(50.0) < pilot.descent_limit(100.0));
        assert_eq!(pilot.descent_limit(1e6), 200.0);
    }

    #[test]
    fn flies_a_full_episode_without_panicking() {
        let mut env = LanderEnv::new(LanderConfig::default(), Some(3));
        let mut pilot = HeuristicPilot::new();
        let mut obs = env.observation();
        for _ in 0..1_000 {
            let r = env.step(pilot.decide(&obs, DT));
            assert!((0.0..=1.0).contains(&r.observation.fuel_fraction()));
            obs = r.observation;
            if r.terminated || r.truncated {
                break;
            }
        }
        assert!(env.counters().steps > 0);
    }
}
