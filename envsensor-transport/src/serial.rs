//! Serial transport
//!
//! The sensor enumerates as a USB CDC serial device. `serialport` handles
//! are blocking, so every read and write runs on tokio's blocking pool with
//! the handle behind a mutex.

use std::io::{self, Read, Write};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use parking_lot::Mutex;
use serialport::SerialPort;
use tokio::task::spawn_blocking;
use tracing::{debug, trace, warn};

use crate::{config::SerialConfig, error::*, Transport};

type PortHandle = Arc<Mutex<Box<dyn SerialPort>>>;

/// Serial transport for the sensor
pub struct SerialTransport {
    config: SerialConfig,
    port: Option<PortHandle>,
}

impl SerialTransport {
    /// Create new serial transport
    pub fn new(config: SerialConfig) -> Self {
        Self { config, port: None }
    }

    /// Get the line settings
    pub fn config(&self) -> &SerialConfig {
        &self.config
    }

    fn handle(&self) -> Result<PortHandle> {
        self.port.clone().ok_or(Error::NotOpen)
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn open(&mut self) -> Result<()> {
        if self.is_open() {
            return Err(Error::AlreadyOpen);
        }

        debug!(
            "Opening {} at {} baud...",
            self.config.path, self.config.baud_rate
        );

        let builder = self.config.builder();
        let port = spawn_blocking(move || builder.open()).await??;

        debug!("Opened {}", self.config.path);

        self.port = Some(Arc::new(Mutex::new(port)));
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if self.port.take().is_some() {
            debug!("Closing {}...", self.config.path);
        }

        Ok(())
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let port = self.handle()?;

        trace!("Sending {} bytes: {}", data.len(), hex::encode(data));

        let data = data.to_vec();
        spawn_blocking(move || -> io::Result<()> {
            let mut port = port.lock();
            port.write_all(&data)?;
            port.flush()
        })
        .await??;

        Ok(())
    }

    async fn receive(&mut self, timeout: Duration) -> Result<BytesMut> {
        let port = self.handle()?;
        let size = self.config.read_buffer_size;

        let result = spawn_blocking(move || -> Result<BytesMut> {
            let mut port = port.lock();
            port.set_timeout(timeout)?;

            let mut buf = vec![0u8; size];
            match port.read(&mut buf) {
                Ok(0) => Err(Error::ConnectionClosed),
                Ok(n) => Ok(BytesMut::from(&buf[..n])),
                Err(e) if e.kind() == io::ErrorKind::TimedOut => Err(Error::ReadTimeout),
                Err(e) => {
                    warn!("Read error: {}", e);
                    Err(Error::Io(e))
                }
            }
        })
        .await?;

        if matches!(result, Err(Error::ConnectionClosed)) {
            debug!("{} closed by device", self.config.path);
            self.port = None;
        }
        let buf = result?;

        trace!("Received {} bytes: {}", buf.len(), hex::encode(&buf));

        Ok(buf)
    }

    fn port_name(&self) -> String {
        self.config.path.clone()
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        if self.is_open() {
            warn!("Serial transport dropped while still open");
        }
    }
}
