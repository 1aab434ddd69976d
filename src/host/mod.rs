//! Wall-clock host for interactive play.

pub mod realtime;

pub use realtime::{FrameClock, Session};
