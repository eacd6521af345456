//! Frame checksum
//!
//! A 16-bit CRC with the reflected polynomial 0xA001, an initial register
//! of 0xFFFF and no final XOR (the MODBUS parameter set):
//!
//! ```text
//! reg = 0xFFFF
//! for byte in frame[..len - 2]:
//!     reg ^= byte
//!     repeat 8 times:
//!         reg = if reg & 1 { (reg >> 1) ^ 0xA001 } else { reg >> 1 }
//! ```
//!
//! The register is appended to the frame little-endian.

use bytes::{BufMut, BytesMut};
use crc::{Crc, CRC_16_MODBUS};
use tracing::trace;

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_MODBUS);

/// Calculate the checksum of `bytes`
///
/// # Examples
///
/// ```
/// use envsensor_core::checksum;
///
/// assert_eq!(checksum::calculate(b"123456789"), 0x4B37);
/// ```
pub fn calculate(bytes: &[u8]) -> u16 {
    let checksum = CRC16.checksum(bytes);
    
    trace!(
        len = bytes.len(),
        checksum = format!("0x{:04X}", checksum),
        "Calculated checksum"
    );
    
    checksum
}

/// Verify checksum
pub fn verify(bytes: &[u8], expected: u16) -> bool {
    calculate(bytes) == expected
}

/// Append the checksum of everything currently in `buf`
pub fn append(buf: &mut BytesMut) {
    let checksum = calculate(buf);
    buf.put_u16_le(checksum);
}
