//! USB lookup of the sensor's serial port

use serialport::SerialPortType;
use tracing::debug;

use crate::error::{Error, Result};

pub use serialport::{SerialPortInfo, UsbPortInfo};

/// OMRON USB vendor id
pub const VENDOR_ID: u16 = 0x0590;

/// 2JCIE-BU USB product id
pub const PRODUCT_ID: u16 = 0x00D4;

/// List every serial port on the system
pub fn list_ports() -> Result<Vec<SerialPortInfo>> {
    let ports = serialport::available_ports()?;
    debug!("Found {} serial ports", ports.len());

    Ok(ports)
}

/// Names of all ports that belong to an attached sensor
///
/// Use this when several sensors are plugged in and the caller has to pick.
pub fn sensor_ports() -> Result<Vec<String>> {
    Ok(matching_ports(list_ports()?, VENDOR_ID, PRODUCT_ID))
}

/// Find the port of the first attached sensor
///
/// Returns the first match; choosing between several sensors is up to the
/// caller (see [`sensor_ports`]).
pub fn find_sensor_port() -> Result<String> {
    find_port(VENDOR_ID, PRODUCT_ID)
}

/// Find the first serial port with the given USB ids
pub fn find_port(vid: u16, pid: u16) -> Result<String> {
    select_port(list_ports()?, vid, pid)
}

fn select_port(ports: Vec<SerialPortInfo>, vid: u16, pid: u16) -> Result<String> {
    let port = matching_ports(ports, vid, pid)
        .into_iter()
        .next()
        .ok_or(Error::DeviceNotFound { vid, pid })?;

    debug!("Sensor found at {}", port);
    Ok(port)
}

fn matching_ports(ports: Vec<SerialPortInfo>, vid: u16, pid: u16) -> Vec<String> {
    ports
        .into_iter()
        .filter_map(|info| match info.port_type {
            SerialPortType::UsbPort(usb) if usb.vid == vid && usb.pid == pid => {
                Some(info.port_name)
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usb(name: &str, vid: u16, pid: u16) -> SerialPortInfo {
        SerialPortInfo {
            port_name: name.into(),
            port_type: SerialPortType::UsbPort(UsbPortInfo {
                vid,
                pid,
                serial_number: None,
                manufacturer: None,
                product: None,
            }),
        }
    }

    #[test]
    fn test_select_port_no_usb() {
        let ports = vec![
            SerialPortInfo {
                port_name: "/dev/ttyS0".into(),
                port_type: SerialPortType::Unknown,
            },
            SerialPortInfo {
                port_name: "/dev/ttyS1".into(),
                port_type: SerialPortType::PciPort,
            },
        ];

        let result = select_port(ports, VENDOR_ID, PRODUCT_ID);
        assert!(matches!(
            result,
            Err(Error::DeviceNotFound { vid: 0x0590, pid: 0x00D4 })
        ));
    }

    #[test]
    fn test_select_port_empty() {
        assert!(select_port(Vec::new(), VENDOR_ID, PRODUCT_ID).is_err());
    }

    #[test]
    fn test_select_port_first_sensor() {
        let ports = vec![
            usb("/dev/ttyACM0", 0x2341, 0x0043),
            usb("/dev/ttyUSB0", 0x0590, 0x0001),
            usb("/dev/ttyUSB1", VENDOR_ID, PRODUCT_ID),
            usb("/dev/ttyUSB2", VENDOR_ID, PRODUCT_ID),
        ];

        let port = select_port(ports, VENDOR_ID, PRODUCT_ID).unwrap();
        assert_eq!(port, "/dev/ttyUSB1");
    }

    #[test]
    fn test_matching_ports_lists_every_sensor() {
        let ports = vec![
            usb("COM3", VENDOR_ID, PRODUCT_ID),
            SerialPortInfo {
                port_name: "COM1".into(),
                port_type: SerialPortType::Unknown,
            },
            usb("COM7", VENDOR_ID, PRODUCT_ID),
        ];

        assert_eq!(
            matching_ports(ports, VENDOR_ID, PRODUCT_ID),
            vec!["COM3".to_string(), "COM7".to_string()]
        );
    }
}
