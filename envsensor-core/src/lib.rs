//! # envsensor-core
//!
//! Core protocol implementation for OMRON 2JCIE-BU USB environmental sensors.
//!
//! This crate provides the low-level protocol primitives:
//! - Frame structure and encoding/decoding
//! - Checksum calculation
//! - Request builders and typed response parsing
//! - Stream reassembly of fragmented serial input
//!
//! Everything here is synchronous and free of I/O.

pub mod checksum;
pub mod command;
pub mod constants;
pub mod error;
pub mod frame;
pub mod reassembler;
pub mod request;
pub mod response;

pub use command::{Address, Command};
pub use error::{FrameError, Result};
pub use frame::Frame;
pub use reassembler::{Frames, Reassembler};
pub use response::{parse, DecodedResponse};

pub use envsensor_types::{LedSetting, SensorReading, StatusResponse};
