//! LED colour setting

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// LED setting carried by a write to the LED register
///
/// The device supports several display rules; only "normally on" is
/// exposed, so `display_rule` is always [`LedSetting::DISPLAY_RULE_NORMAL`].
///
/// # Examples
///
/// ```
/// use envsensor_types::LedSetting;
///
/// let led: LedSetting = "#ff8000".parse().unwrap();
/// assert_eq!(led, LedSetting::new(0xFF, 0x80, 0x00));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LedSetting {
    pub display_rule: u16,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl LedSetting {
    /// Display rule: LED always on with the given colour
    pub const DISPLAY_RULE_NORMAL: u16 = 0x0001;
    
    /// Create a setting with the normal display rule
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self {
            display_rule: Self::DISPLAY_RULE_NORMAL,
            red,
            green,
            blue,
        }
    }
    
    /// All channels off
    pub fn off() -> Self {
        Self::new(0, 0, 0)
    }
    
    /// Check if all channels are zero
    pub fn is_off(&self) -> bool {
        self.red == 0 && self.green == 0 && self.blue == 0
    }
}

impl Default for LedSetting {
    fn default() -> Self {
        Self::off()
    }
}

impl FromStr for LedSetting {
    type Err = Error;
    
    /// Parse `RRGGBB` or `#RRGGBB`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        
        if digits.len() != 6 {
            return Err(Error::Validation(format!(
                "LED colour must be 6 hex digits, got {:?}",
                s
            )));
        }
        
        let mut rgb = [0u8; 3];
        hex::decode_to_slice(digits, &mut rgb)
            .map_err(|e| Error::Parse(format!("{:?}: {}", s, e)))?;
        
        Ok(Self::new(rgb[0], rgb[1], rgb[2]))
    }
}

impl fmt::Display for LedSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}
