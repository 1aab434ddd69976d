use nalgebra::Vector2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::collision::{classify, Contact, CrashCause};
use crate::config::LanderConfig;
use crate::dynamics::integrator::{integrate, Forces};
use crate::dynamics::state::Vehicle;
use crate::error::ConfigError;
use crate::physics::actuator::{actuate, ThrustIntent};
use crate::physics::environment::{gravity_accel, Wind};
use crate::world::{Platform, PlatformField};
use super::event::{EventKind, SimEvent};
use super::flight::{FlightEvent, FlightState};
use super::snapshot::{Snapshot, VehicleView};

/// Generator behind every stochastic draw: platform layout, oscillation
/// phases and wind. Seeding it reproduces an episode exactly.
pub type SimRng = ChaCha8Rng;

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// Highest platform index landed on; 0 is the start pad. Doubles as score.
    pub highest_reached: usize,
    pub last_landed: Option<usize>,
}

impl Progress {
    pub fn target_index(&self) -> usize {
        self.highest_reached + 1
    }

    /// First index a cull must keep.
    pub fn keep_from(&self) -> usize {
        self.last_landed.unwrap_or(0).min(self.highest_reached)
    }
}

/// What happened during one [`Simulation::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub contact: Option<Contact>,
    pub out_of_bounds: bool,
    /// Thrust was actually produced (input given, fuel left, airborne).
    pub thrust_applied: bool,
    pub flight: FlightState,
    pub events: Vec<SimEvent>,
}

impl StepOutcome {
    fn quiet(flight: FlightState) -> Self {
        Self {
            contact: None,
            out_of_bounds: false,
            thrust_applied: false,
            flight,
            events: Vec::new(),
        }
    }

    pub fn landed_on(&self) -> Option<usize> {
        match self.contact {
            Some(Contact::Landed { platform }) => Some(platform),
            _ => None,
        }
    }

    pub fn crashed(&self) -> Option<CrashCause> {
        match self.contact {
            Some(Contact::Crashed(cause)) => Some(cause),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// One vehicle over one platform field. Host-agnostic: the trainer and the
/// realtime host both drive it through [`Simulation::step`].
#[derive(Debug, Clone)]
pub struct Simulation {
    config: LanderConfig,
    rng: SimRng,
    vehicle: Vehicle,
    field: PlatformField,
    wind: Wind,
    flight: FlightState,
    progress: Progress,
    steps: u64,
    time: f64,
}

impl Simulation {
    /// Build and reset. Without a seed the generator is seeded from OS
    /// entropy.
    ///
    /// `config` must pass [`LanderConfig::validate`]; generation panics on
    /// inverted ranges. Use [`Simulation::try_new`] for untrusted input.
    pub fn new(config: LanderConfig, seed: Option<u64>) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid lander config");
        let mut rng = seed.map_or_else(SimRng::from_entropy, SimRng::seed_from_u64);
        let field = PlatformField::generate(&config, &mut rng);
        let start = field.get_or_last(0).landing_point();
        Self {
            vehicle: Vehicle::spawn(start, config.vehicle.max_fuel),
            wind: Wind::calm(&config.wind),
            field,
            rng,
            flight: FlightState::Idle,
            progress: Progress::default(),
            steps: 0,
            time: 0.0,
            config,
        }
    }

    /// Validate `config`, then build.
    pub fn try_new(config: LanderConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, seed))
    }

    /// Rebuild the field and put the vehicle back on platform 0. A seed
    /// reseeds the generator; `None` continues the current stream.
    pub fn reset(&mut self, seed: Option<u64>) {
        if let Some(seed) = seed {
            self.rng = SimRng::seed_from_u64(seed);
        }
        self.field = PlatformField::generate(&self.config, &mut self.rng);
        self.vehicle = Vehicle::spawn(
            self.field.get_or_last(0).landing_point(),
            self.config.vehicle.max_fuel,
        );
        self.wind = Wind::calm(&self.config.wind);
        self.flight = FlightState::Idle;
        self.progress = Progress::default();
        self.steps = 0;
        self.time = 0.0;
        tracing::info!(?seed, platforms = self.field.generated(), "simulation reset");
    }

    /// Advance one step of `dt` seconds.
    ///
    /// Order: wind, launch on input, platforms, then (airborne only)
    /// actuator, integrator, contact and bounds checks. A terminated
    /// simulation is left untouched.
    pub fn step(&mut self, intent: ThrustIntent, dt: f64) -> StepOutcome {
        if self.flight.is_terminal() {
            return StepOutcome::quiet(self.flight);
        }
        self.steps += 1;
        self.time += dt;
        let mut events = Vec::new();

        if let Some(force) = self.wind.advance(&self.config.wind, &mut self.rng) {
            events.push(self.event(EventKind::WindShift { force }));
        }

        if intent != ThrustIntent::None && self.flight.can_launch() {
            self.launch(&mut events);
        }

        let pad_x = match self.flight {
            FlightState::Grounded(index) => self.field.get(index).map(|p| p.x),
            _ => None,
        };
        self.field.advance(dt);

        let mut outcome = match self.flight {
            FlightState::Grounded(index) => {
                self.ride(index, pad_x);
                StepOutcome::quiet(self.flight)
            }
            FlightState::Airborne => self.fly(intent, dt, &mut events),
            FlightState::Idle | FlightState::Terminated => StepOutcome::quiet(self.flight),
        };
        outcome.flight = self.flight;
        outcome.events = events;
        outcome
    }

    fn fly(&mut self, intent: ThrustIntent, dt: f64, events: &mut Vec<SimEvent>) -> StepOutcome {
        let actuation = actuate(&mut self.vehicle, intent, &self.config.vehicle, dt);
        let forces = Forces {
            gravity: gravity_accel(&self.config.physics),
            thrust: actuation.accel,
            wind: self.wind.force(),
        };
        integrate(&mut self.vehicle, &forces, &self.config.physics, dt);

        let contact = classify(&self.vehicle, self.field.active(), &self.config);
        let mut out_of_bounds = false;
        match contact {
            Some(Contact::Landed { platform }) => self.land(platform, events),
            Some(Contact::Crashed(cause)) => {
                self.flight = self.flight.on(FlightEvent::Crashed);
                tracing::debug!(step = self.steps, ?cause, speed = self.vehicle.speed(), "crashed");
                events.push(self.event(EventKind::Crashed(cause)));
            }
            None if self.is_out_of_bounds() => {
                out_of_bounds = true;
                self.flight = self.flight.on(FlightEvent::OutOfBounds);
                tracing::debug!(step = self.steps, x = self.vehicle.pos.x, y = self.vehicle.pos.y, "out of bounds");
                events.push(self.event(EventKind::OutOfBounds));
            }
            None => {}
        }

        StepOutcome {
            contact,
            out_of_bounds,
            thrust_applied: actuation.fired,
            flight: self.flight,
            events: Vec::new(),
        }
    }

    fn land(&mut self, index: usize, events: &mut Vec<SimEvent>) {
        let Some(platform) = self.field.get(index) else {
            return;
        };
        let (top, platform_vx) = (platform.top(), platform.velocity());
        self.vehicle.land(top, platform_vx, self.config.vehicle.max_fuel);
        self.flight = self.flight.on(FlightEvent::Landed(index));

        self.progress.last_landed = Some(index);
        let new_high = index > self.progress.highest_reached;
        if new_high {
            self.progress.highest_reached = index;
            self.field.ensure_lookahead(index, &self.config, &mut self.rng);
        }
        tracing::debug!(step = self.steps, platform = index, new_high, "landed");
        events.push(self.event(EventKind::Landed { platform: index, new_high }));
    }

    /// Carry a grounded vehicle along with its platform, which moved from
    /// `pad_x` this step.
    fn ride(&mut self, index: usize, pad_x: Option<f64>) {
        let (Some(platform), Some(pad_x)) = (self.field.get(index), pad_x) else {
            return;
        };
        self.vehicle.pos = Vector2::new(self.vehicle.pos.x + platform.x - pad_x, platform.top());
        self.vehicle.vel = Vector2::new(platform.velocity(), 0.0);
    }

    fn launch(&mut self, events: &mut Vec<SimEvent>) {
        self.vehicle.launch();
        self.flight = self.flight.on(FlightEvent::Launch);
        events.push(self.event(EventKind::Launch));
    }

    fn event(&self, kind: EventKind) -> SimEvent {
        SimEvent { step: self.steps, time: self.time, kind }
    }

    fn is_out_of_bounds(&self) -> bool {
        let pos = self.vehicle.pos;
        let target_x = self.target_platform().center_x();
        pos.y < self.config.physics.ceiling_y
            || (pos.x - target_x).abs() > self.config.physics.max_target_distance_x
    }

    // -----------------------------------------------------------------------
    // Host-driven transitions
    // -----------------------------------------------------------------------

    /// Take off from the current pad with `upward_speed` px/s.
    /// Returns the launch event, or `None` if not grounded or idle.
    pub fn relaunch(&mut self, upward_speed: f64) -> Option<SimEvent> {
        if !self.flight.can_launch() {
            return None;
        }
        let mut events = Vec::with_capacity(1);
        self.launch(&mut events);
        self.vehicle.vel.y = -upward_speed;
        events.pop()
    }

    /// End the episode after the platform supply ran out.
    /// Only valid while grounded.
    pub fn complete(&mut self) -> Option<SimEvent> {
        if !matches!(self.flight, FlightState::Grounded(_)) {
            return None;
        }
        self.flight = self.flight.on(FlightEvent::Completed);
        tracing::info!(step = self.steps, score = self.score(), "course completed");
        Some(self.event(EventKind::Completed))
    }

    /// Put the vehicle airborne at `pos` with velocity `vel`, fuel untouched.
    pub fn place_vehicle(&mut self, pos: Vector2<f64>, vel: Vector2<f64>) {
        self.vehicle.pos = pos;
        self.vehicle.vel = vel;
        self.vehicle.launch();
        if !self.flight.is_terminal() {
            self.flight = FlightState::Airborne;
        }
    }

    pub fn set_fuel(&mut self, fuel: f64) {
        self.vehicle.fuel = fuel.clamp(0.0, self.config.vehicle.max_fuel);
    }

    /// Drop platforms far behind `view_x` that the vehicle can no longer
    /// reach. A platform survives while any part of its sweep lies right of
    /// the out-of-bounds leash around the target, so culling never removes
    /// something a vehicle still in bounds could touch. Returns how many went.
    pub fn cull(&mut self, view_x: f64) -> usize {
        let cutoff = (view_x - self.config.platforms.cull_distance).min(self.reach_limit());
        let removed = self.field.cull(cutoff, self.progress.keep_from());
        if removed > 0 {
            tracing::trace!(removed, remaining = self.field.active().len(), "platforms culled");
        }
        removed
    }

    /// Leftmost x the vehicle body can occupy without going out of bounds,
    /// taking the target's own oscillation into account.
    fn reach_limit(&self) -> f64 {
        let target = self.target_platform();
        let leftmost_center = target.sweep().0 + target.width * 0.5;
        leftmost_center - self.config.physics.max_target_distance_x - self.config.vehicle.width * 0.5
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &LanderConfig {
        &self.config
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn field(&self) -> &PlatformField {
        &self.field
    }

    pub fn wind(&self) -> &Wind {
        &self.wind
    }

    pub fn flight(&self) -> FlightState {
        self.flight
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn score(&self) -> usize {
        self.progress.highest_reached
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn target_index(&self) -> usize {
        self.progress.target_index()
    }

    /// Next platform to reach, or the last generated one past the supply.
    pub fn target_platform(&self) -> &Platform {
        self.field.get_or_last(self.target_index())
    }

    pub fn is_exhausted(&self) -> bool {
        self.field.is_exhausted(self.target_index())
    }

    pub fn snapshot(&self) -> Snapshot {
        let v = &self.vehicle;
        let vc = &self.config.vehicle;
        Snapshot {
            step: self.steps,
            time: self.time,
            vehicle: VehicleView {
                x: v.pos.x,
                y: v.pos.y,
                vx: v.vel.x,
                vy: v.vel.y,
                width: vc.width,
                height: vc.height,
                fuel: v.fuel,
                max_fuel: vc.max_fuel,
                grounded: v.grounded,
                thrusters: v.thrusters,
            },
            platforms: self.field.active().to_vec(),
            wind: self.wind.force(),
            flight: self.flight,
            score: self.score(),
            target: self.target_index(),
            ground_level: self.config.physics.ground_level,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
