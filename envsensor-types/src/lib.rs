//! Type definitions for envsensor

pub mod error;
pub mod led;
pub mod reading;
pub mod status;

pub use error::{Error, Result};
pub use led::LedSetting;
pub use reading::SensorReading;
pub use status::StatusResponse;
