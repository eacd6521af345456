//! Transport layer for the envsensor protocol
//!
//! Provides serial communication with the sensor and USB lookup of its port.

pub mod config;
pub mod discovery;
pub mod error;
pub mod serial;

pub use config::SerialConfig;
pub use discovery::{find_sensor_port, list_ports, sensor_ports};
pub use error::{Error, Result};
pub use serial::SerialTransport;

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;

/// Transport trait for different communication methods
///
/// Chunks returned by [`Transport::receive`] carry no framing guarantees:
/// a frame may be split across calls or several may arrive at once.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open the port
    async fn open(&mut self) -> Result<()>;
    
    /// Close the port
    async fn close(&mut self) -> Result<()>;
    
    /// Check if open
    fn is_open(&self) -> bool;
    
    /// Send raw bytes
    async fn send(&mut self, data: &[u8]) -> Result<()>;
    
    /// Receive whatever bytes are available (with timeout)
    async fn receive(&mut self, timeout: Duration) -> Result<BytesMut>;
    
    /// Get port name
    fn port_name(&self) -> String;
}
