//! # envsensor
//!
//! Rust driver for OMRON 2JCIE-BU USB environmental sensors.
//!
//! ## Features
//!
//! - Frame codec with CRC-16 validation
//! - Stream reassembly that tolerates split and concatenated reads
//! - Async/await API using Tokio
//! - Serial port discovery by USB vendor and product id
//!
//! ## Quick Start
//!
//! ```no_run
//! use envsensor::Session;
//!
//! #[tokio::main]
//! async fn main() -> envsensor::Result<()> {
//!     let mut session = Session::discover()?;
//!     session.open().await?;
//!
//!     let reading = session.read_latest_data().await?;
//!     println!("{}", reading);
//!
//!     session.set_led(0, 255, 0).await?;
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod session;

// Re-exports
pub use error::{Error, Result};
pub use session::Session;

// Re-export protocol and transport types
pub use envsensor_core::{
    parse, request, Address, Command, DecodedResponse, Frame, FrameError, Reassembler,
};
pub use envsensor_transport::{SerialConfig, SerialTransport, Transport};
pub use envsensor_types::{LedSetting, SensorReading, StatusResponse};
