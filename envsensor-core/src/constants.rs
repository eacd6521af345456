//! Protocol constants

/// Frame header signature
pub const HEADER: [u8; 2] = [0x52, 0x42];

/// Header plus the length field; the length field does not count these
pub const PREFIX_SIZE: usize = 4;

/// Trailing checksum size
pub const CHECKSUM_SIZE: usize = 2;

/// Command byte plus address
pub const COMMAND_SIZE: usize = 3;

/// Smallest frame able to carry a command, an address and a checksum
pub const MIN_FRAME_SIZE: usize = PREFIX_SIZE + COMMAND_SIZE + CHECKSUM_SIZE;

/// Largest frame the reassembler waits for by default
///
/// The biggest response of the device is well below this; a declared
/// length above it is treated as a corrupted header.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 1024;

/// Byte offsets inside a frame
pub mod offsets {
    pub const LENGTH: usize = 2;
    pub const COMMAND: usize = 4;
    pub const ADDRESS: usize = 5;
    pub const DATA: usize = 7;
}

/// Byte offsets of the "latest data short" response fields
pub mod latest_data {
    pub const SEQUENCE_NUMBER: usize = 7;
    pub const TEMPERATURE: usize = 8;
    pub const HUMIDITY: usize = 10;
    pub const AMBIENT_LIGHT: usize = 12;
    pub const PRESSURE: usize = 14;
    pub const NOISE: usize = 18;
    pub const ETVOC: usize = 20;
    pub const ECO2: usize = 22;
    pub const DISCOMFORT_INDEX: usize = 24;
    pub const HEAT_STROKE: usize = 26;
    
    /// Data bytes needed to hold every field
    pub const DATA_SIZE: usize = HEAT_STROKE + 2 - super::offsets::DATA;
}

/// Data bytes of a status response
pub const STATUS_DATA_SIZE: usize = 1;
