//! Serial port configuration

use std::time::Duration;

pub use serialport::{DataBits, FlowControl, Parity, StopBits};

/// Serial line settings
///
/// Defaults match the sensor: 115200 baud, 8 data bits, 1 stop bit, no
/// parity, no flow control.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use envsensor_transport::SerialConfig;
///
/// let config = SerialConfig::new("/dev/ttyUSB0")
///     .with_read_timeout(Duration::from_millis(500));
///
/// assert_eq!(config.baud_rate, 115_200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    /// Port path, e.g. `/dev/ttyUSB0` or `COM3`
    pub path: String,
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub stop_bits: StopBits,
    pub parity: Parity,
    pub flow_control: FlowControl,
    
    /// Timeout applied while opening and as the port's default read timeout
    pub timeout: Duration,
    
    /// Largest chunk read from the port at once
    pub read_buffer_size: usize,
}

impl SerialConfig {
    pub const DEFAULT_BAUD_RATE: u32 = 115_200;
    
    /// Create a configuration with the sensor's line settings
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud_rate: Self::DEFAULT_BAUD_RATE,
            data_bits: DataBits::Eight,
            stop_bits: StopBits::One,
            parity: Parity::None,
            flow_control: FlowControl::None,
            timeout: Duration::from_secs(1),
            read_buffer_size: 256,
        }
    }
    
    /// Set baud rate
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }
    
    /// Set default read timeout
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
    
    /// Set read buffer size
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size.max(1);
        self
    }
    
    /// Builder for opening the port
    pub(crate) fn builder(&self) -> serialport::SerialPortBuilder {
        serialport::new(&self.path, self.baud_rate)
            .data_bits(self.data_bits)
            .stop_bits(self.stop_bits)
            .parity(self.parity)
            .flow_control(self.flow_control)
            .timeout(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_config_defaults() {
        let config = SerialConfig::new("COM3");
        
        assert_eq!(config.path, "COM3");
        assert_eq!(config.baud_rate, 115_200);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.stop_bits, StopBits::One);
        assert_eq!(config.parity, Parity::None);
    }
    
    #[test]
    fn test_config_builders() {
        let config = SerialConfig::new("/dev/ttyUSB0")
            .with_baud_rate(9600)
            .with_read_timeout(Duration::from_millis(250))
            .with_read_buffer_size(0);
        
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.read_buffer_size, 1);
    }
}
