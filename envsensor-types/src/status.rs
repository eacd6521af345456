//! Single-byte status responses

use std::fmt;

/// Status byte returned for a write or a status read
///
/// Both the LED register and the flash memory status register answer with
/// one byte of data; `address` tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusResponse {
    /// Register the response belongs to
    pub address: u16,
    
    /// Raw status byte
    pub value: u8,
}

impl StatusResponse {
    pub fn new(address: u16, value: u8) -> Self {
        Self { address, value }
    }
}

impl fmt::Display for StatusResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Status[0x{:04X}] = 0x{:02X}", self.address, self.value)
    }
}
