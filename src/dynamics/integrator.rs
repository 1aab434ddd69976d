use nalgebra::Vector2;

use crate::config::PhysicsConfig;
use crate::dynamics::state::Vehicle;

// ---------------------------------------------------------------------------
// Fixed-step semi-implicit Euler
// ---------------------------------------------------------------------------

/// Accelerations acting on the vehicle over one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forces {
    pub gravity: Vector2<f64>, // px/s^2
    pub thrust: Vector2<f64>,  // px/s^2
    pub wind: f64,             // px/s^2, applied as a direct velocity delta
}

/// Advance velocity then position by one step of `dt`.
///
/// The order is fixed and reproducibility depends on it:
///   1. start from gravity
///   2. add thrust
///   3. `v += a * dt`
///   4. `v.x *= drag` (per step, so drag depends on frame rate)
///   5. `v.x += wind * dt` while airborne
///   6. clamp `v.y` to terminal velocity
///   7. `p += v * dt`
pub fn integrate(vehicle: &mut Vehicle, forces: &Forces, cfg: &PhysicsConfig, dt: f64) {
    let mut accel = forces.gravity;
    accel += forces.thrust;

    vehicle.vel += accel * dt;
    vehicle.vel.x *= cfg.drag;

    if !vehicle.grounded {
        vehicle.vel.x += forces.wind * dt;
    }

    if vehicle.vel.y > cfg.terminal_velocity {
        vehicle.vel.y = cfg.terminal_velocity;
    }

    vehicle.pos += vehicle.vel * dt;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
