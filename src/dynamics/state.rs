use nalgebra::Vector2;
use serde::Serialize;

use crate::collision::Aabb;
use crate::config::VehicleConfig;

// ---------------------------------------------------------------------------
// Vehicle state
// ---------------------------------------------------------------------------

/// Which side thrusters fired this step. Cosmetic: read by renderers only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Thrusters {
    pub left: bool,
    pub right: bool,
}

impl Thrusters {
    pub fn any(&self) -> bool {
        self.left || self.right
    }
}

/// Lander state at a single step.
/// Frame: screen-style, +x right, +y down. `pos` is the feet anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub pos: Vector2<f64>, // px
    pub vel: Vector2<f64>, // px/s
    pub fuel: f64,         // [0, max_fuel]
    pub grounded: bool,
    pub thrusters: Thrusters,
}

impl Vehicle {
    /// Fully fuelled, at rest and grounded at `pos`.
    pub fn spawn(pos: Vector2<f64>, max_fuel: f64) -> Self {
        Self {
            pos,
            vel: Vector2::zeros(),
            fuel: max_fuel,
            grounded: true,
            thrusters: Thrusters::default(),
        }
    }

    pub fn bounds(&self, cfg: &VehicleConfig) -> Aabb {
        Aabb::from_feet(self.pos, cfg.width, cfg.height)
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    /// Direction of travel (rad). Reads 0 below `epsilon` instead of
    /// taking atan2 of noise.
    pub fn heading(&self, epsilon: f64) -> f64 {
        if self.speed() > epsilon {
            self.vel.y.atan2(self.vel.x)
        } else {
            0.0
        }
    }

    pub fn is_landing_safe(&self, cfg: &VehicleConfig) -> bool {
        self.vel.y.abs() <= cfg.max_landing_vy && self.vel.x.abs() <= cfg.max_landing_vx
    }

    /// Snap onto a platform top, match its horizontal velocity and refuel.
    pub fn land(&mut self, top_y: f64, platform_vx: f64, max_fuel: f64) {
        self.pos.y = top_y;
        self.vel = Vector2::new(platform_vx, 0.0);
        self.grounded = true;
        self.fuel = max_fuel;
    }

    pub fn launch(&mut self) {
        self.grounded = false;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
