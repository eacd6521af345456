//! Frame structure and encoding/decoding

use byteorder::{ByteOrder, LittleEndian};
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

use crate::{
    checksum,
    command::{Address, Command},
    constants::{offsets, CHECKSUM_SIZE, COMMAND_SIZE, HEADER, MIN_FRAME_SIZE, PREFIX_SIZE},
    error::{FrameError, Result},
};

/// One protocol frame
///
/// # Frame Structure
///
/// ```text
/// ┌──────────┬──────────┬─────────┬──────────┬──────────┬──────────┐
/// │  Header  │  Length  │ Command │ Address  │   Data   │  CRC-16  │
/// │  52 42   │ (LE u16) │  1 byte │ (LE u16) │ N bytes  │ (LE u16) │
/// └──────────┴──────────┴─────────┴──────────┴──────────┴──────────┘
/// ```
///
/// `Length` counts command, address, data and checksum, so a complete
/// frame is always `Length + 4` bytes. The checksum covers everything
/// before it, header included.
///
/// Command and address are kept raw so that frames for registers this
/// crate does not know about still decode.
///
/// # Examples
///
/// ```
/// use envsensor_core::{Address, Command, Frame};
///
/// let frame = Frame::new(Command::Read, Address::LatestDataShort);
/// let encoded = frame.encode();
///
/// let decoded = Frame::decode(&encoded).unwrap();
/// assert_eq!(frame, decoded);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    /// Command byte
    pub command: u8,

    /// Register address
    pub address: u16,

    /// Command-specific data
    pub data: Bytes,
}

impl Frame {
    /// Create a frame with no data
    pub fn new(command: Command, address: Address) -> Self {
        Self::from_raw(command.into(), address.into(), Bytes::new())
    }

    /// Create a frame with data
    pub fn with_data(command: Command, address: Address, data: impl Into<Bytes>) -> Self {
        Self::from_raw(command.into(), address.into(), data)
    }

    /// Create a frame from raw command and address values
    pub fn from_raw(command: u8, address: u16, data: impl Into<Bytes>) -> Self {
        Self {
            command,
            address,
            data: data.into(),
        }
    }

    /// Maximum data size representable by the length field
    pub const MAX_DATA_SIZE: usize = u16::MAX as usize - COMMAND_SIZE - CHECKSUM_SIZE;

    /// Value of the length field
    ///
    /// Data longer than [`Frame::MAX_DATA_SIZE`] does not fit the wire format.
    pub fn length_field(&self) -> u16 {
        debug_assert!(self.data.len() <= Self::MAX_DATA_SIZE);
        (COMMAND_SIZE + self.data.len() + CHECKSUM_SIZE) as u16
    }

    /// Get total frame size
    pub fn size(&self) -> usize {
        MIN_FRAME_SIZE + self.data.len()
    }

    /// Known command, if any
    pub fn command_kind(&self) -> Option<Command> {
        Command::try_from(self.command).ok()
    }

    /// Known address, if any
    pub fn address_kind(&self) -> Option<Address> {
        Address::try_from(self.address).ok()
    }

    /// Encode frame to bytes, checksum included
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(self.size());

        buf.put_slice(&HEADER);
        buf.put_u16_le(self.length_field());
        buf.put_u8(self.command);
        buf.put_u16_le(self.address);
        buf.put_slice(&self.data);

        checksum::append(&mut buf);

        buf
    }

    /// Decode and validate one complete frame
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - [`FrameError::Truncated`] if the buffer cannot hold header and length
    /// - [`FrameError::BadHeader`] if the signature is not `52 42`
    /// - [`FrameError::LengthMismatch`] if the buffer is not `length + 4` bytes
    /// - [`FrameError::Truncated`] if the frame cannot hold command, address and checksum
    /// - [`FrameError::ChecksumMismatch`] if the trailing CRC does not match
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < PREFIX_SIZE {
            return Err(FrameError::Truncated { actual: buf.len() });
        }

        if buf[..2] != HEADER[..] {
            return Err(FrameError::BadHeader {
                found: [buf[0], buf[1]],
            });
        }

        let declared = LittleEndian::read_u16(&buf[offsets::LENGTH..]) as usize;
        let expected = declared + PREFIX_SIZE;
        if buf.len() != expected {
            return Err(FrameError::LengthMismatch {
                expected,
                actual: buf.len(),
            });
        }

        if buf.len() < MIN_FRAME_SIZE {
            return Err(FrameError::Truncated { actual: buf.len() });
        }

        let body_end = buf.len() - CHECKSUM_SIZE;
        let received = LittleEndian::read_u16(&buf[body_end..]);
        let calculated = checksum::calculate(&buf[..body_end]);
        if calculated != received {
            return Err(FrameError::ChecksumMismatch {
                expected: calculated,
                received,
            });
        }

        Ok(Self {
            command: buf[offsets::COMMAND],
            address: LittleEndian::read_u16(&buf[offsets::ADDRESS..]),
            data: Bytes::copy_from_slice(&buf[offsets::DATA..body_end]),
        })
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("command", &format!("0x{:02X}", self.command))
            .field("address", &format!("0x{:04X}", self.address))
            .field("data", &hex::encode(&self.data))
            .finish()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.address_kind() {
            Some(address) => write!(f, "Frame[{}]", address)?,
            None => write!(f, "Frame[0x{:04X}]", self.address)?,
        }
        write!(f, "(cmd=0x{:02X}, len={})", self.command, self.data.len())
    }
}
