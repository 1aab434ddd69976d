use serde::Serialize;

// ---------------------------------------------------------------------------
// Flight state machine
// ---------------------------------------------------------------------------

/// Vehicle lifecycle. Exactly one state holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "platform", rename_all = "snake_case")]
pub enum FlightState {
    /// Before the first input. Physics paused.
    Idle,
    Airborne,
    /// Resting on the platform with this generation index.
    Grounded(usize),
    /// Absorbing; left only through a full reset.
    Terminated,
}

/// Inputs to [`FlightState::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightEvent {
    /// Control input, or the trainer's automatic relaunch.
    Launch,
    Landed(usize),
    Crashed,
    OutOfBounds,
    /// Platform supply exhausted after a landing.
    Completed,
}

impl FlightState {
    /// Transition table. Events that do not apply leave the state unchanged.
    pub fn on(self, event: FlightEvent) -> FlightState {
        use FlightEvent as E;
        use FlightState as S;
        match (self, event) {
            (S::Terminated, _) => S::Terminated,
            (S::Idle | S::Grounded(_), E::Launch) => S::Airborne,
            (S::Airborne, E::Landed(index)) => S::Grounded(index),
            (S::Airborne, E::Crashed | E::OutOfBounds) => S::Terminated,
            (S::Grounded(_), E::Completed) => S::Terminated,
            (state, _) => state,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == FlightState::Terminated
    }

    pub fn is_airborne(self) -> bool {
        self == FlightState::Airborne
    }

    pub fn can_launch(self) -> bool {
        matches!(self, FlightState::Idle | FlightState::Grounded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nominal_lifecycle() {
        let s = FlightState::Idle.on(FlightEvent::Launch);
        assert_eq!(s, FlightState::Airborne);
        let s = s.on(FlightEvent::Landed(3));
        assert_eq!(s, FlightState::Grounded(3));
        let s = s.on(FlightEvent::Launch);
        assert_eq!(s, FlightState::Airborne);
        assert_eq!(s.on(FlightEvent::Crashed), FlightState::Terminated);
    }

    #[test]
    fn terminated_is_absorbing() {
        for event in [
            FlightEvent::Launch,
            FlightEvent::Landed(1),
            FlightEvent::Crashed,
            FlightEvent::OutOfBounds,
            FlightEvent::Completed,
        ] {
            assert_eq!(FlightState::Terminated.on(event), FlightState::Terminated);
        }
    }

    #[test]
    fn inapplicable_events_are_ignored() {
        assert_eq!(FlightState::Idle.on(FlightEvent::Crashed), FlightState::Idle);
        assert_eq!(FlightState::Grounded(2).on(FlightEvent::Landed(4)), FlightState::Grounded(2));
        assert_eq!(FlightState::Airborne.on(FlightEvent::Launch), FlightState::Airborne);
        assert_eq!(FlightState::Airborne.on(FlightEvent::Completed), FlightState::Airborne);
    }

    #[test]
    fn out_of_bounds_and_completion_terminate() {
        assert!(FlightState::Airborne.on(FlightEvent::OutOfBounds).is_terminal());
        assert!(FlightState::Grounded(10).on(FlightEvent::Completed).is_terminal());
    }
}
