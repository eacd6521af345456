//! High-level sensor session

use std::collections::VecDeque;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

use envsensor_core::{parse, request, Address, DecodedResponse, Reassembler};
use envsensor_transport::{
    find_sensor_port, Error as TransportError, SerialConfig, SerialTransport, Transport,
};
use envsensor_types::{LedSetting, SensorReading, StatusResponse};

use crate::error::{Error, Result};

/// One open sensor
///
/// Owns its transport and the reassembler for that transport's byte
/// stream. Open one session per device; sessions share nothing.
///
/// # Examples
///
/// ```no_run
/// use envsensor::Session;
///
/// #[tokio::main]
/// async fn main() -> envsensor::Result<()> {
///     let mut session = Session::discover()?;
///
///     session.open().await?;
///
///     let reading = session.read_latest_data().await?;
///     println!("{}", reading);
///
///     session.close().await?;
///     Ok(())
/// }
/// ```
pub struct Session {
    transport: Box<dyn Transport>,
    reassembler: Reassembler,
    pending: VecDeque<Bytes>,
    timeout: Duration,
}

impl Session {
    /// Create a session over any transport
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            reassembler: Reassembler::new(),
            pending: VecDeque::new(),
            timeout: Duration::from_secs(2),
        }
    }

    /// Create a session over a serial port
    pub fn serial(config: SerialConfig) -> Self {
        Self::new(Box::new(SerialTransport::new(config)))
    }

    /// Create a session for the first attached sensor
    ///
    /// # Errors
    ///
    /// Returns a transport error if no port with the sensor's USB ids exists.
    pub fn discover() -> Result<Self> {
        let path = find_sensor_port()?;
        info!("Using sensor at {}", path);

        Ok(Self::serial(SerialConfig::new(path)))
    }

    /// Set response timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the largest frame the reassembler waits for
    pub fn with_max_frame_size(mut self, max_frame_size: usize) -> Self {
        self.reassembler = Reassembler::with_max_frame_size(max_frame_size);
        self
    }

    /// Check if open
    pub fn is_open(&self) -> bool {
        self.transport.is_open()
    }

    /// Get port name
    pub fn port_name(&self) -> String {
        self.transport.port_name()
    }

    /// Open the transport
    pub async fn open(&mut self) -> Result<()> {
        info!("Opening {}...", self.transport.port_name());

        self.transport.open().await?;
        self.reassembler.reset();
        self.pending.clear();

        info!("Opened {}", self.transport.port_name());
        Ok(())
    }

    /// Close the transport and drop any buffered input
    pub async fn close(&mut self) -> Result<()> {
        if !self.is_open() {
            return Ok(());
        }

        info!("Closing {}...", self.transport.port_name());

        if !self.pending.is_empty() {
            warn!("Dropping {} unread frames", self.pending.len());
        }
        self.pending.clear();
        self.reassembler.reset();

        self.transport.close().await?;

        info!("Closed");
        Ok(())
    }

    /// Ask for the latest sensor data without waiting for the answer
    pub async fn request_latest_data(&mut self) -> Result<()> {
        self.send(&request::read_latest_data()).await
    }

    /// Set the LED without waiting for the answer
    pub async fn request_led(&mut self, red: u8, green: u8, blue: u8) -> Result<()> {
        self.send(&request::set_led(red, green, blue)).await
    }

    /// Ask for the flash memory status without waiting for the answer
    pub async fn request_flash_status(&mut self) -> Result<()> {
        self.send(&request::read_flash_status()).await
    }

    /// Read the latest sensor data
    pub async fn read_latest_data(&mut self) -> Result<SensorReading> {
        debug!("Reading latest data...");

        self.request_latest_data().await?;
        let response = self.await_response(Address::LatestDataShort).await?;

        response
            .into_reading()
            .ok_or_else(|| Error::UnexpectedResponse("expected sensor reading".into()))
    }

    /// Set the LED colour
    pub async fn set_led(&mut self, red: u8, green: u8, blue: u8) -> Result<StatusResponse> {
        self.set_led_setting(&LedSetting::new(red, green, blue)).await
    }

    /// Set the LED from a [`LedSetting`]
    pub async fn set_led_setting(&mut self, setting: &LedSetting) -> Result<StatusResponse> {
        debug!("Setting LED to {}...", setting);

        self.send(&request::set_led_setting(setting)).await?;
        self.await_status(Address::Led).await
    }

    /// Set the LED from a `RRGGBB` hex string
    pub async fn set_led_color(&mut self, color: &str) -> Result<StatusResponse> {
        let setting: LedSetting = color.parse()?;
        self.set_led_setting(&setting).await
    }

    /// Read the flash memory status
    pub async fn flash_memory_status(&mut self) -> Result<StatusResponse> {
        debug!("Reading flash memory status...");

        self.request_flash_status().await?;
        self.await_status(Address::FlashMemoryStatus).await
    }

    /// Receive the next decoded response
    ///
    /// An invalid frame comes back as [`Error::Frame`]; the session stays
    /// usable and the next call continues with the following frame.
    pub async fn recv(&mut self) -> Result<DecodedResponse> {
        loop {
            if let Some(response) = self.poll_response(self.timeout).await? {
                return Ok(response);
            }
        }
    }

    // Helper methods

    fn ensure_open(&self) -> Result<()> {
        if !self.is_open() {
            return Err(Error::NotOpen);
        }
        Ok(())
    }

    /// Decode a queued frame, or do a single read of at most `limit`
    ///
    /// A started read is always awaited to the end, so bytes taken off the
    /// device reach the reassembler even when the caller's deadline is near.
    async fn poll_response(&mut self, limit: Duration) -> Result<Option<DecodedResponse>> {
        self.ensure_open()?;

        if self.pending.is_empty() {
            let chunk = match self.transport.receive(limit).await {
                Ok(chunk) => chunk,
                Err(TransportError::ConnectionClosed) => {
                    warn!("{} closed by device", self.transport.port_name());
                    self.pending.clear();
                    self.reassembler.reset();
                    self.transport.close().await?;
                    return Err(TransportError::ConnectionClosed.into());
                }
                Err(e) => return Err(e.into()),
            };
            self.pending.extend(self.reassembler.feed(&chunk));
        }

        match self.pending.pop_front() {
            Some(frame) => {
                let response = parse(&frame)?;
                trace!("Received: {:?}", response);
                Ok(Some(response))
            }
            None => Ok(None),
        }
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        self.ensure_open()?;

        trace!("Sending: {}", hex::encode(data));
        self.transport.send(data).await?;

        Ok(())
    }

    async fn await_status(&mut self, address: Address) -> Result<StatusResponse> {
        self.await_response(address)
            .await?
            .into_status()
            .ok_or_else(|| Error::UnexpectedResponse(format!("expected status from {}", address)))
    }

    /// Wait for a response from `address`, skipping everything else
    async fn await_response(&mut self, address: Address) -> Result<DecodedResponse> {
        let deadline = Instant::now() + self.timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(self.timeout_error());
            }

            match self.poll_response(remaining).await {
                Ok(Some(response)) if response.is_from(address) => return Ok(response),
                Ok(Some(other)) => {
                    debug!(
                        "Ignoring response from 0x{:04X} while waiting for {}",
                        other.address(),
                        address
                    );
                }
                Ok(None) => {}
                Err(Error::Frame(e)) => warn!("Dropping invalid frame: {}", e),
                Err(e) if e.is_timeout() => {}
                Err(e) => return Err(e),
            }
        }
    }

    fn timeout_error(&self) -> Error {
        Error::Timeout {
            millis: self.timeout.as_millis() as u64,
        }
    }
}
