use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::config::VehicleConfig;
use crate::dynamics::state::{Thrusters, Vehicle};
use crate::error::ActionError;

// ---------------------------------------------------------------------------
// Control intents
// ---------------------------------------------------------------------------

/// Discrete control input. The discriminants are the trainer's action ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThrustIntent {
    #[default]
    None = 0,
    PushLeft = 1,
    PushRight = 2,
    Hover = 3,
}

impl ThrustIntent {
    pub const ALL: [ThrustIntent; 4] = [
        ThrustIntent::None,
        ThrustIntent::PushLeft,
        ThrustIntent::PushRight,
        ThrustIntent::Hover,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Force before integration, in acceleration units (px/s^2, +y down).
    pub fn force(self, cfg: &VehicleConfig) -> Vector2<f64> {
        match self {
            ThrustIntent::None => Vector2::zeros(),
            ThrustIntent::PushLeft => Vector2::new(-cfg.horizontal_thrust, -cfg.vertical_thrust),
            ThrustIntent::PushRight => Vector2::new(cfg.horizontal_thrust, -cfg.vertical_thrust),
            ThrustIntent::Hover => Vector2::new(0.0, -cfg.hover_multiplier * cfg.vertical_thrust),
        }
    }

    /// Pushing left fires the right-hand thruster and vice versa.
    pub fn thrusters(self) -> Thrusters {
        match self {
            ThrustIntent::None => Thrusters::default(),
            ThrustIntent::PushLeft => Thrusters { left: false, right: true },
            ThrustIntent::PushRight => Thrusters { left: true, right: false },
            ThrustIntent::Hover => Thrusters { left: true, right: true },
        }
    }
}

impl TryFrom<u8> for ThrustIntent {
    type Error = ActionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ThrustIntent::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(ActionError(value))
    }
}

// ---------------------------------------------------------------------------
// Actuator
// ---------------------------------------------------------------------------

/// Thrust produced for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actuation {
    pub accel: Vector2<f64>,
    pub fired: bool,
}

impl Actuation {
    pub fn idle() -> Self {
        Self { accel: Vector2::zeros(), fired: false }
    }
}

/// Resolve an intent against the vehicle: no thrust when dry or grounded,
/// otherwise drain `fuel_drain_rate * dt` (clamped to the tank) and set the
/// cosmetic thruster flags.
pub fn actuate(vehicle: &mut Vehicle, intent: ThrustIntent, cfg: &VehicleConfig, dt: f64) -> Actuation {
    vehicle.thrusters = Thrusters::default();

    if intent == ThrustIntent::None || vehicle.fuel <= 0.0 || vehicle.grounded {
        return Actuation::idle();
    }

    vehicle.fuel = (vehicle.fuel - cfg.fuel_drain_rate * dt).clamp(0.0, cfg.max_fuel);
    vehicle.thrusters = intent.thrusters();

    Actuation { accel: intent.force(cfg), fired: true }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn airborne(fuel: f64) -> Vehicle {
        let mut v = Vehicle::spawn(Vector2::new(0.0, 0.0), 100.0);
        v.launch();
        v.fuel = fuel;
        v
    }

    #[test]
    fn force_table() {
        let cfg = VehicleConfig::default();
        assert_eq!(ThrustIntent::None.force(&cfg), Vector2::zeros());
        assert_eq!(ThrustIntent::PushLeft.force(&cfg), Vector2::new(-700.0, -1400.0));
        assert_eq!(ThrustIntent::PushRight.force(&cfg), Vector2::new(700.0, -1400.0));
        assert_eq!(ThrustIntent::Hover.force(&cfg), Vector2::new(0.0, -2100.0));
    }

    #[test]
    fn action_ids_round_trip() {
        for intent in ThrustIntent::ALL {
            assert_eq!(ThrustIntent::try_from(intent.index()), Ok(intent));
        }
        assert_eq!(ThrustIntent::try_from(4), Err(ActionError(4)));
    }

    #[test]
    fn drains_fuel_when_firing() {
        let cfg = VehicleConfig::default();
        let mut v = airborne(50.0);
        let out = actuate(&mut v, ThrustIntent::PushRight, &cfg, 0.5);
        assert!(out.fired);
        assert!((v.fuel - 30.0).abs() < 1e-12, "40/s for 0.5 s");
        assert!(v.thrusters.left && !v.thrusters.right);
    }

    #[test]
    fn none_costs_nothing() {
        let cfg = VehicleConfig::default();
        let mut v = airborne(50.0);
        let out = actuate(&mut v, ThrustIntent::None, &cfg, 0.5);
        assert!(!out.fired);
        assert_eq!(v.fuel, 50.0);
        assert!(!v.thrusters.any());
    }

    #[test]
    fn suppressed_when_grounded() {
        let cfg = VehicleConfig::default();
        let mut v = Vehicle::spawn(Vector2::zeros(), 100.0);
        let out = actuate(&mut v, ThrustIntent::Hover, &cfg, 0.1);
        assert!(!out.fired);
        assert_eq!(out.accel, Vector2::zeros());
        assert_eq!(v.fuel, 100.0);
    }

    #[test]
    fn last_drop_still_fires_then_tank_is_dry() {
        let cfg = VehicleConfig { fuel_drain_rate: 600.0, ..VehicleConfig::default() };
        let mut v = airborne(5.0);
        let dt = 1.0 / 60.0; // drains 10 per step
        let first = actuate(&mut v, ThrustIntent::Hover, &cfg, dt);
        assert!(first.fired, "Thrust applies on the step that empties the tank");
        assert_eq!(v.fuel, 0.0);
        let second = actuate(&mut v, ThrustIntent::Hover, &cfg, dt);
        assert!(!second.fired);
        assert_eq!(v.fuel, 0.0);
    }
}
