pub mod csv;
pub mod json;
pub mod record;

pub use record::StepRecord;
