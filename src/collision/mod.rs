//! Vehicle-vs-platform contact classification.
//!
//! Platforms are tested in generation order and the first overlapping one
//! decides the outcome, even when a later platform would be a closer match.
//! If nothing overlaps, falling past `ground_level + ground_crash_margin`
//! counts as a ground impact.

pub mod aabb;

pub use aabb::Aabb;

use crate::config::LanderConfig;
use crate::dynamics::state::Vehicle;
use crate::world::Platform;

/// Why a step ended in a crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    /// Came down onto the pad inside the landing window, too fast.
    HardLanding { platform: usize },
    /// Hit the side or underside of a platform.
    Impact { platform: usize },
    /// Fell past the ground line without touching a platform.
    Ground,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Landed { platform: usize },
    Crashed(CrashCause),
}

/// True when the vehicle's feet sit inside the landing window of `pad`:
/// `0 < bottom - top < height / 2` with the vehicle centre over the pad.
pub fn in_landing_window(vehicle: &Aabb, pad: &Aabb) -> bool {
    let overlap = vehicle.bottom() - pad.top();
    overlap > 0.0 && overlap < vehicle.height() * 0.5 && pad.spans_x(vehicle.center_x())
}

/// Classify the vehicle's current pose against `platforms`.
pub fn classify(vehicle: &Vehicle, platforms: &[Platform], cfg: &LanderConfig) -> Option<Contact> {
    let body = vehicle.bounds(&cfg.vehicle);

    for platform in platforms {
        let pad = platform.bounds();
        if !body.overlaps(&pad) {
            continue;
        }
        let index = platform.index;
        if !in_landing_window(&body, &pad) {
            return Some(Contact::Crashed(CrashCause::Impact { platform: index }));
        }
        return if vehicle.is_landing_safe(&cfg.vehicle) {
            Some(Contact::Landed { platform: index })
        } else {
            Some(Contact::Crashed(CrashCause::HardLanding { platform: index }))
        };
    }

    let floor = cfg.physics.ground_level + cfg.physics.ground_crash_margin;
    if vehicle.pos.y > floor {
        return Some(Contact::Crashed(CrashCause::Ground));
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
