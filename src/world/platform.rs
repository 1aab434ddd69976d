use nalgebra::Vector2;
use serde::Serialize;

use crate::collision::Aabb;

// ---------------------------------------------------------------------------
// Platform motion
// ---------------------------------------------------------------------------

/// How a platform moves horizontally. Platforms never move vertically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Motion {
    Static,
    /// `x = initial_x + amplitude * sin(phase)`, `phase += angular_rate * dt`.
    Oscillating {
        amplitude: f64,    // px
        angular_rate: f64, // rad/s, signed
        phase: f64,        // rad
    },
}

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Platform {
    pub index: usize,   // generation order, also the score value
    pub initial_x: f64, // anchor, left edge
    pub x: f64,         // current left edge
    pub y: f64,         // top surface
    pub width: f64,
    pub height: f64,
    pub motion: Motion,
}

impl Platform {
    pub fn fixed(index: usize, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            index,
            initial_x: x,
            x,
            y,
            width,
            height,
            motion: Motion::Static,
        }
    }

    /// Oscillating platform whose peak linear speed is `speed` (signed).
    /// The angular rate is derived as `speed / amplitude` so that
    /// `velocity() == speed * cos(phase)`.
    #[allow(clippy::too_many_arguments)]
    pub fn oscillating(
        index: usize,
        initial_x: f64,
        y: f64,
        width: f64,
        height: f64,
        amplitude: f64,
        speed: f64,
        phase: f64,
    ) -> Self {
        Self {
            index,
            initial_x,
            x: initial_x + amplitude * phase.sin(),
            y,
            width,
            height,
            motion: Motion::Oscillating {
                amplitude,
                angular_rate: speed / amplitude,
                phase,
            },
        }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width * 0.5
    }

    /// Centre of the top surface, the point distances are measured to.
    pub fn landing_point(&self) -> Vector2<f64> {
        Vector2::new(self.center_x(), self.y)
    }

    /// Collidable pad only. The cosmetic base below is not included.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_top_left(self.x, self.y, self.width, self.height)
    }

    /// Strict horizontal containment, used by reward shaping.
    pub fn strictly_spans_x(&self, x: f64) -> bool {
        self.x < x && x < self.x + self.width
    }

    /// Instantaneous horizontal velocity (px/s).
    pub fn velocity(&self) -> f64 {
        match self.motion {
            Motion::Static => 0.0,
            Motion::Oscillating { amplitude, angular_rate, phase } => {
                amplitude * angular_rate * phase.cos()
            }
        }
    }

    /// Leftmost and rightmost left-edge positions the platform ever takes.
    pub fn sweep(&self) -> (f64, f64) {
        match self.motion {
            Motion::Static => (self.initial_x, self.initial_x),
            Motion::Oscillating { amplitude, .. } => {
                (self.initial_x - amplitude, self.initial_x + amplitude)
            }
        }
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.motion, Motion::Oscillating { .. })
    }

    pub fn advance(&mut self, dt: f64) {
        if let Motion::Oscillating { amplitude, angular_rate, phase } = &mut self.motion {
            *phase += dt * *angular_rate;
            self.x = self.initial_x + *amplitude * phase.sin();
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
    fn static_platform_never_moves() {
        let mut p = Platform::fixed(0, 580.0, 620.0, 120.0, 20.0);
        for _ in 0..100 {
            p.advance(1.0 / 60.0);
        }
        assert_eq!(p.x, 580.0);
        assert_eq!(p.velocity(), 0.0);
    }

    #[test]
    fn peak_speed_matches_configured_speed() {
        let p = Platform::oscillating(3, 1000.0, 400.0, 120.0, 20.0, 60.0, -40.0, 0.0);
        assert!((p.velocity() + 40.0).abs() < 1e-12, "cos(0) = 1 gives the signed peak speed");
        match p.motion {
            Motion::Oscillating { angular_rate, .. } => {
                assert!((angular_rate + 40.0 / 60.0).abs() < 1e-12)
            }
            Motion::Static => panic!("expected oscillating"),
        }
    }

    #[test]
    fn velocity_matches_finite_difference() {
        let mut p = Platform::oscillating(1, 0.0, 0.0, 120.0, 20.0, 60.0, 40.0, 0.7);
        let dt = 1e-5;
        let v = p.velocity();
        let x0 = p.x;
        p.advance(dt);
        let fd = (p.x - x0) / dt;
        assert!((fd - v).abs() < 1e-2, "fd={fd} analytic={v}");
    }

    #[test]
    fn oscillation_stays_within_amplitude() {
        let mut p = Platform::oscillating(1, 900.0, 0.0, 120.0, 20.0, 60.0, 40.0, 2.0);
        for _ in 0..10_000 {
            p.advance(1.0 / 60.0);
            assert!(p.x >= 900.0 - 60.0 - 1e-9 && p.x <= 900.0 + 60.0 + 1e-9);
        }
    }

    #[test]
    fn bounds_cover_pad_only() {
        let p = Platform::fixed(0, 10.0, 100.0, 120.0, 20.0);
        let b = p.bounds();
        assert_eq!(b.top(), 100.0);
        assert_eq!(b.bottom(), 120.0);
        assert_eq!(p.landing_point(), Vector2::new(70.0, 100.0));
    }
}
