//! Error types for envsensor-core

/// Result type alias for frame decoding
pub type Result<T> = std::result::Result<T, FrameError>;

/// Reasons a candidate frame is rejected
///
/// None of these are fatal to the byte stream: only the current frame is
/// dropped, the reassembler stays synchronized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// Too few bytes to hold a header, length, command, address and checksum
    #[error("Frame truncated: {actual} bytes")]
    Truncated {
        actual: usize,
    },
    
    /// Header signature mismatch
    #[error("Bad header: expected [52, 42], found {found:02X?}")]
    BadHeader {
        found: [u8; 2],
    },
    
    /// Declared length disagrees with the buffer size
    #[error("Length mismatch: header declares {expected} bytes, got {actual} bytes")]
    LengthMismatch {
        expected: usize,
        actual: usize,
    },
    
    /// Checksum verification failed
    #[error("Checksum mismatch: expected 0x{expected:04X}, received 0x{received:04X}")]
    ChecksumMismatch {
        expected: u16,
        received: u16,
    },
    
    /// Known address, but the data is too short for its layout
    #[error("Payload too short for address 0x{address:04X}: need {expected} bytes, got {actual} bytes")]
    PayloadTooShort {
        address: u16,
        expected: usize,
        actual: usize,
    },
}

impl FrameError {
    /// Check if the frame failed its integrity check
    pub fn is_integrity_failure(&self) -> bool {
        matches!(self, Self::ChecksumMismatch { .. })
    }
}
