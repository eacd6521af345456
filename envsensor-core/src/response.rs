//! Typed responses

use byteorder::{ByteOrder, LittleEndian};
use tracing::{debug, trace};

use envsensor_types::{SensorReading, StatusResponse};

use crate::{
    command::Address,
    constants::{latest_data, offsets, STATUS_DATA_SIZE},
    error::{FrameError, Result},
    frame::Frame,
};

/// Decoded response, one variant per address space
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedResponse {
    /// "Latest data short" snapshot
    Reading(SensorReading),

    /// Status byte of the LED or flash memory status register
    Status(StatusResponse),

    /// Structurally valid frame for an address this crate does not interpret
    Unknown { address: u16 },
}

impl DecodedResponse {
    /// Interpret the data of a validated frame
    ///
    /// # Errors
    ///
    /// [`FrameError::PayloadTooShort`] if a known address carries less data
    /// than its fixed layout needs.
    pub fn from_frame(frame: &Frame) -> Result<Self> {
        let Some(address) = frame.address_kind() else {
            debug!("Unrecognized address 0x{:04X}", frame.address);
            return Ok(Self::Unknown {
                address: frame.address,
            });
        };

        match address {
            Address::LatestDataShort => {
                ensure_data(frame, latest_data::DATA_SIZE)?;
                Ok(Self::Reading(read_latest_data(&frame.data)))
            }
            Address::Led | Address::FlashMemoryStatus => {
                ensure_data(frame, STATUS_DATA_SIZE)?;
                trace!("{} status 0x{:02X}", address, frame.data[0]);
                Ok(Self::Status(StatusResponse::new(frame.address, frame.data[0])))
            }
        }
    }

    /// Address the response came from
    pub fn address(&self) -> u16 {
        match self {
            Self::Reading(_) => Address::LatestDataShort.into(),
            Self::Status(status) => status.address,
            Self::Unknown { address } => *address,
        }
    }

    /// Check if the response came from `address`
    pub fn is_from(&self, address: Address) -> bool {
        self.address() == u16::from(address)
    }

    /// Get the sensor reading, if this is one
    pub fn into_reading(self) -> Option<SensorReading> {
        match self {
            Self::Reading(reading) => Some(reading),
            _ => None,
        }
    }

    /// Get the status byte, if this is one
    pub fn into_status(self) -> Option<StatusResponse> {
        match self {
            Self::Status(status) => Some(status),
            _ => None,
        }
    }
}

/// Validate one complete frame and decode it
///
/// Pure function of its input. The buffer must hold exactly one frame, as
/// produced by [`Reassembler`](crate::Reassembler).
///
/// # Examples
///
/// ```
/// use envsensor_core::{parse, Address, Command, DecodedResponse, Frame};
///
/// let reply = Frame::with_data(Command::Write, Address::Led, vec![0x00]).encode();
///
/// match parse(&reply) {
///     Ok(DecodedResponse::Status(status)) => assert_eq!(status.value, 0x00),
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
pub fn parse(buf: &[u8]) -> Result<DecodedResponse> {
    let frame = Frame::decode(buf)?;
    DecodedResponse::from_frame(&frame)
}

fn ensure_data(frame: &Frame, expected: usize) -> Result<()> {
    if frame.data.len() < expected {
        return Err(FrameError::PayloadTooShort {
            address: frame.address,
            expected,
            actual: frame.data.len(),
        });
    }
    Ok(())
}

// Field offsets are frame-relative; `data` starts at offsets::DATA
fn i16_at(data: &[u8], offset: usize) -> i16 {
    LittleEndian::read_i16(&data[offset - offsets::DATA..])
}

fn read_latest_data(data: &[u8]) -> SensorReading {
    SensorReading {
        sequence_number: data[latest_data::SEQUENCE_NUMBER - offsets::DATA],
        temperature: f64::from(i16_at(data, latest_data::TEMPERATURE)) / 100.0,
        humidity: f64::from(i16_at(data, latest_data::HUMIDITY)) / 100.0,
        ambient_light: i16_at(data, latest_data::AMBIENT_LIGHT),
        pressure: f64::from(LittleEndian::read_i32(
            &data[latest_data::PRESSURE - offsets::DATA..],
        )) / 1000.0,
        noise: f64::from(i16_at(data, latest_data::NOISE)) / 100.0,
        etvoc: i16_at(data, latest_data::ETVOC),
        eco2: i16_at(data, latest_data::ECO2),
        discomfort_index: f64::from(i16_at(data, latest_data::DISCOMFORT_INDEX)) / 100.0,
        heat_stroke: f64::from(i16_at(data, latest_data::HEAT_STROKE)) / 100.0,
    }
}
