//! Command and address definitions

use std::fmt;

/// Command byte of a frame
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    Read = 0x01,
    Write = 0x02,
}

impl Command {
    /// Get command name
    pub fn name(self) -> &'static str {
        match self {
            Self::Read => "READ",
            Self::Write => "WRITE",
        }
    }
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> u8 {
        cmd as u8
    }
}

impl TryFrom<u8> for Command {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            0x01 => Ok(Self::Read),
            0x02 => Ok(Self::Write),
            _ => Err(value),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), *self as u8)
    }
}

/// Registers understood by this crate
///
/// The device exposes many more; frames for any other address decode as
/// [`DecodedResponse::Unknown`](crate::DecodedResponse::Unknown).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Address {
    /// Latest sensor data, short form
    LatestDataShort = 0x5022,

    /// LED setting (normal state)
    Led = 0x5111,

    /// Flash memory status
    FlashMemoryStatus = 0x5403,
}

impl Address {
    /// Get address name
    pub fn name(self) -> &'static str {
        match self {
            Self::LatestDataShort => "LATEST_DATA_SHORT",
            Self::Led => "LED",
            Self::FlashMemoryStatus => "FLASH_MEMORY_STATUS",
        }
    }

    /// Check if the register accepts writes
    pub fn is_writable(self) -> bool {
        matches!(self, Self::Led)
    }
}

impl From<Address> for u16 {
    fn from(addr: Address) -> u16 {
        addr as u16
    }
}

impl TryFrom<u16> for Address {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, u16> {
        match value {
            0x5022 => Ok(Self::LatestDataShort),
            0x5111 => Ok(Self::Led),
            0x5403 => Ok(Self::FlashMemoryStatus),
            _ => Err(value),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:04X})", self.name(), *self as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_conversion() {
        assert_eq!(u8::from(Command::Read), 0x01);
        assert_eq!(Command::try_from(0x02).unwrap(), Command::Write);
        assert_eq!(Command::try_from(0x00), Err(0x00));
    }

    #[test]
    fn test_address_conversion() {
        assert_eq!(u16::from(Address::LatestDataShort), 0x5022);
        assert_eq!(Address::try_from(0x5111).unwrap(), Address::Led);
        assert_eq!(Address::try_from(0x5403).unwrap(), Address::FlashMemoryStatus);
    }

    #[test]
    fn test_unknown_address() {
        assert_eq!(Address::try_from(0x5021), Err(0x5021));
    }

    #[test]
    fn test_address_display() {
        assert_eq!(Address::Led.to_string(), "LED(0x5111)");
        assert!(Address::Led.is_writable());
        assert!(!Address::FlashMemoryStatus.is_writable());
    }
}
