//! Configuration type definitions
//!
//! These types represent the game configuration. The firmware embeds a
//! `game.toml` and parses it at boot; see [`super::toml`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::hardware::PinMap;
use crate::timing::SECOND_MS;
use crate::traits::display::MAX_TIMER_SECONDS;

/// Number of keypad buttons
pub const BUTTON_COUNT: u8 = 8;

/// Highest brightness level the display accepts
pub const MAX_BRIGHTNESS: u8 = 7;

/// Which code positions blink after a confirmed guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FlashPolicy {
    /// Flash the positions the player got right
    #[default]
    Matched,
    /// Flash the positions still wrong
    Unmatched,
}

/// Configuration validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Round longer than the `MM.SS` timer can show
    RoundTooLong,
    /// Brightness above 7
    BrightnessOutOfRange,
    /// A period of zero
    ZeroPeriod,
    /// Button bit outside 0-7
    InvalidButton,
    /// Same button used for two roles
    DuplicateButton,
    /// Pin missing, out of range, or shared
    InvalidPins,
}

/// Game configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameConfig {
    /// Round length in seconds
    pub round_seconds: u16,
    /// How long the win pattern stays up (ms)
    pub win_hold_ms: u32,
    /// How long the time-up pattern stays up (ms)
    pub timeup_hold_ms: u32,
    /// Button poll and display refresh period (ms)
    pub refresh_ms: u16,
    /// Sleep at the end of each loop iteration (ms)
    pub loop_yield_ms: u16,
    /// Display brightness (0-7)
    pub brightness: u8,
    /// Feedback convention for confirmed guesses
    pub flash_policy: FlashPolicy,
    /// Button bit for each code position, leftmost first
    pub digit_buttons: [u8; 4],
    /// Button bit that submits the guess
    pub confirm_button: u8,
    /// Start a new round on any button release after game over
    pub restart_on_release: bool,
    /// Abort the round when the tilt switch fires
    pub tilt_aborts: bool,
    /// Wiring
    pub pins: PinMap,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_seconds: 180,
            win_hold_ms: 9 * SECOND_MS as u32,
            timeup_hold_ms: 3 * SECOND_MS as u32,
            refresh_ms: 50,
            loop_yield_ms: 10,
            brightness: 1,
            flash_policy: FlashPolicy::Matched,
            digit_buttons: [7, 6, 5, 4],
            confirm_button: 0,
            restart_on_release: true,
            tilt_aborts: false,
            pins: PinMap::default(),
        }
    }
}

impl GameConfig {
    /// Check the configuration for values the game cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if i32::from(self.round_seconds) > MAX_TIMER_SECONDS {
            return Err(ConfigError::RoundTooLong);
        }
        if self.brightness > MAX_BRIGHTNESS {
            return Err(ConfigError::BrightnessOutOfRange);
        }
        if self.refresh_ms == 0 || self.loop_yield_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }

        let mut used: u8 = 0;
        for &bit in self.digit_buttons.iter().chain(core::iter::once(&self.confirm_button)) {
            if bit >= BUTTON_COUNT {
                return Err(ConfigError::InvalidButton);
            }
            if used & (1 << bit) != 0 {
                return Err(ConfigError::DuplicateButton);
            }
            used |= 1 << bit;
        }

        if !self.pins.is_valid() {
            return Err(ConfigError::InvalidPins);
        }

        Ok(())
    }

    /// Mask of the confirm button
    pub fn confirm_mask(&self) -> u8 {
        1 << self.confirm_button
    }

    /// Mask of the digit button for code `position`
    pub fn digit_mask(&self, position: usize) -> u8 {
        1 << self.digit_buttons[position]
    }
}
