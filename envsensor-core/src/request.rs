//! Request builders
//!
//! Each builder returns a complete frame, checksum included, ready to be
//! written to the transport.

use bytes::{BufMut, BytesMut};

use envsensor_types::LedSetting;

use crate::{
    command::{Address, Command},
    frame::Frame,
};

/// Read the "latest data short" snapshot
///
/// # Examples
///
/// ```
/// use envsensor_core::request;
///
/// let req = request::read_latest_data();
/// assert_eq!(req.len(), 9);
/// assert_eq!(&req[..7], &[0x52, 0x42, 0x05, 0x00, 0x01, 0x22, 0x50]);
/// ```
pub fn read_latest_data() -> BytesMut {
    Frame::new(Command::Read, Address::LatestDataShort).encode()
}

/// Set the LED colour
///
/// Every channel is a full `u8`, so the 0..=255 range is guaranteed by the
/// type. The display rule is always "normally on".
pub fn set_led(red: u8, green: u8, blue: u8) -> BytesMut {
    set_led_setting(&LedSetting::new(red, green, blue))
}

/// Set the LED from a [`LedSetting`]
pub fn set_led_setting(setting: &LedSetting) -> BytesMut {
    let mut data = BytesMut::with_capacity(5);
    data.put_u16_le(setting.display_rule);
    data.put_u8(setting.red);
    data.put_u8(setting.green);
    data.put_u8(setting.blue);

    Frame::with_data(Command::Write, Address::Led, data.freeze()).encode()
}

/// Read the flash memory status
pub fn read_flash_status() -> BytesMut {
    Frame::new(Command::Read, Address::FlashMemoryStatus).encode()
}
