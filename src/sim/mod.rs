pub mod event;
pub mod flight;
pub mod runner;
pub mod snapshot;

pub use event::{EventKind, SimEvent};
pub use flight::{FlightEvent, FlightState};
pub use runner::{Progress, SimRng, Simulation, StepOutcome};
pub use snapshot::{Snapshot, VehicleView};
