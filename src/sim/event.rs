use crate::collision::CrashCause;

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// Kinds of simulation events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    Launch,
    Landed { platform: usize, new_high: bool },
    Crashed(CrashCause),
    OutOfBounds,
    Completed,
    WindShift { force: f64 },
}

/// A discrete event that occurred during a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimEvent {
    pub step: u64,
    pub time: f64,
    pub kind: EventKind,
}

impl SimEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            EventKind::Crashed(_) | EventKind::OutOfBounds | EventKind::Completed
        )
    }
}
