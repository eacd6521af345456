//! Sensor snapshot returned by the "latest data short" register

use std::fmt;

/// One snapshot of every sensor on the device
///
/// Values are already scaled to their physical units. The raw wire
/// representation is fixed-point; see `envsensor_core::response` for the
/// byte layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    /// Rolling counter incremented by the device on every measurement
    pub sequence_number: u8,
    
    /// Temperature (degC)
    pub temperature: f64,
    
    /// Relative humidity (%RH)
    pub humidity: f64,
    
    /// Ambient light (lx)
    pub ambient_light: i16,
    
    /// Barometric pressure (hPa)
    pub pressure: f64,
    
    /// Sound noise (dB)
    pub noise: f64,
    
    /// Equivalent total volatile organic compounds (ppb)
    pub etvoc: i16,
    
    /// Equivalent CO2 (ppm)
    pub eco2: i16,
    
    /// Discomfort index
    pub discomfort_index: f64,
    
    /// Heat stroke risk (degC)
    pub heat_stroke: f64,
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reading#{}[{:.2}C, {:.2}%RH, {}lx, {:.3}hPa, {:.2}dB, {}ppb, {}ppm, DI {:.2}, HS {:.2}C]",
            self.sequence_number,
            self.temperature,
            self.humidity,
            self.ambient_light,
            self.pressure,
            self.noise,
            self.etvoc,
            self.eco2,
            self.discomfort_index,
            self.heat_stroke,
        )
    }
}
