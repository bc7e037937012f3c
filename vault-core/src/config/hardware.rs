//! Hardware configuration types
//!
//! Pin assignments for the display module link and the tilt switch.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Highest GPIO number on the RP2040
pub const MAX_GPIO: u8 = 29;

/// Pin configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self { pin, pull_up: false }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self { pin, pull_up: true }
    }
}

/// Display module and sensor wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinMap {
    /// Strobe line (STB)
    pub strobe: PinConfig,
    /// Clock line (CLK)
    pub clock: PinConfig,
    /// Bidirectional data line (DIO)
    pub data: PinConfig,
    /// Tilt switch, if fitted
    pub tilt: Option<PinConfig>,
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            strobe: PinConfig::new(12),
            clock: PinConfig::new(14),
            data: PinConfig::with_pullup(15),
            tilt: Some(PinConfig::with_pullup(16)),
        }
    }
}

impl PinMap {
    /// Iterate over every assigned pin
    pub fn iter(&self) -> impl Iterator<Item = PinConfig> {
        [Some(self.strobe), Some(self.clock), Some(self.data), self.tilt]
            .into_iter()
            .flatten()
    }

    /// Check that all pins exist and none is used twice
    pub fn is_valid(&self) -> bool {
        let mut seen: u32 = 0;
        for pin in self.iter() {
            if pin.pin > MAX_GPIO || seen & (1 << pin.pin) != 0 {
                return false;
            }
            seen |= 1 << pin.pin;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_wiring() {
        let pins = PinMap::default();
        assert_eq!(pins.strobe.pin, 12);
        assert_eq!(pins.clock.pin, 14);
        assert_eq!(pins.data.pin, 15);
        assert!(pins.data.pull_up);
        assert_eq!(pins.tilt, Some(PinConfig::with_pullup(16)));
        assert!(pins.is_valid());
    }

    #[test]
    fn test_duplicate_pin_rejected() {
        let pins = PinMap {
            clock: PinConfig::new(12),
            ..PinMap::default()
        };
        assert!(!pins.is_valid());
    }

    #[test]
    fn test_out_of_range_pin_rejected() {
        let pins = PinMap {
            tilt: Some(PinConfig::new(30)),
            ..PinMap::default()
        };
        assert!(!pins.is_valid());
    }

    #[test]
    fn test_tilt_optional() {
        let pins = PinMap {
            tilt: None,
            ..PinMap::default()
        };
        assert_eq!(pins.iter().count(), 3);
        assert!(pins.is_valid());
    }
}
