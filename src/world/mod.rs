//! Procedurally generated landing platforms.

pub mod field;
pub mod platform;

pub use field::PlatformField;
pub use platform::{Motion, Platform};
