//! Display trait for the 8-digit LED & key module
//!
//! The controller RAM is 16 cells, with glyphs and indicator LEDs
//! interleaved:
//!
//! ```text
//! cell:   0    1    2    3    4    5   ...  14   15
//!        dig0 led7 dig1 led6 dig2 led5 ... dig7 led0
//! ```
//!
//! Digits 0-3 show the code, digits 4-7 show the `MM.SS` timer. LED bit `i`
//! of an LED byte lives in cell `((7 - i) * 2) + 1`, so bit 7 is the
//! leftmost LED.

use crate::game::Code;
use crate::segment::{encode_digit, CODE_WORD, DECIMAL_POINT};

/// Number of display RAM cells
pub const DISPLAY_CELLS: usize = 16;

/// Number of code digits
pub const CODE_DIGITS: usize = 4;

/// Timer glyph cells: tens of minutes, minutes, tens of seconds, seconds
pub const TIMER_CELLS: [usize; 4] = [8, 10, 12, 14];

/// Largest value the `MM.SS` timer can show
pub const MAX_TIMER_SECONDS: i32 = 99 * 60 + 59;

/// Glyph and LED value of a fully lit cell pair
pub const FILL_PATTERN: [u8; 2] = [0xFF, 0x01];

/// Cell holding the glyph for digit `position`
pub const fn digit_cell(position: usize) -> usize {
    2 * position
}

/// Cell holding LED bit `bit` (0-7)
pub const fn led_cell(bit: u8) -> usize {
    ((7 - bit as usize) * 2) + 1
}

/// LED bit sitting above digit `position`
pub const fn position_led_bit(position: usize) -> u8 {
    7 - position as u8
}

/// LEDs that blink instead of showing their steady value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashMask(pub u8);

impl FlashMask {
    /// Nothing flashes
    pub const NONE: Self = Self(0);

    /// Every LED flashes
    pub const ALL: Self = Self(0xFF);

    /// Mask for the LED above code digit `position`
    pub const fn for_position(position: usize) -> Self {
        Self(1 << position_led_bit(position))
    }

    /// Check if LED bit `bit` is flagged
    pub const fn contains_bit(&self, bit: u8) -> bool {
        self.0 & (1 << bit) != 0
    }

    /// Check if nothing is flagged
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Raw bits, same layout as an LED byte
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Flag the LEDs of `other` as well
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// Trait for the display/keypad module
///
/// Implementations own the display buffer and the hardware link. Cell
/// writes only touch the buffer; nothing reaches the display until
/// [`SegmentDisplay::flush`].
pub trait SegmentDisplay {
    /// Read a buffer cell (out-of-range reads return 0)
    fn cell(&self, index: usize) -> u8;

    /// Write a buffer cell (out-of-range writes are ignored)
    fn set_cell(&mut self, index: usize, value: u8);

    /// Current flash mask
    fn flash(&self) -> FlashMask;

    /// Replace the flash mask
    fn set_flash(&mut self, mask: FlashMask);

    /// Send the buffer to the display
    ///
    /// Flash-marked LEDs are sent dark during the off half of the blink
    /// period derived from `now_ms`.
    fn flush(&mut self, now_ms: u64);

    /// Scan the keypad, one bit per button (1 = held)
    fn read_buttons(&mut self) -> u8;
}

/// Helper trait for the semantic display operations
pub trait SegmentDisplayExt: SegmentDisplay {
    /// Turn every segment and LED off
    fn blank(&mut self) {
        for index in 0..DISPLAY_CELLS {
            self.set_cell(index, 0x00);
        }
    }

    /// Turn every segment and LED on
    fn fill(&mut self) {
        for index in 0..DISPLAY_CELLS {
            self.set_cell(index, FILL_PATTERN[index % 2]);
        }
    }

    /// Set the LED row from a byte, bit 7 leftmost
    fn set_leds(&mut self, value: u8) {
        for bit in 0..8u8 {
            self.set_cell(led_cell(bit), (value >> bit) & 0x01);
        }
    }

    /// Show `value` on digit `position` (0-7)
    fn set_digit(&mut self, position: usize, value: i16) {
        self.set_cell(digit_cell(position), encode_digit(value));
    }

    /// Show a code on the first four digits, or "C0dE" when there is none
    fn set_code(&mut self, code: Option<&Code>) {
        match code {
            Some(code) => {
                for (position, &digit) in code.digits().iter().enumerate() {
                    self.set_digit(position, digit as i16);
                }
            }
            None => {
                for (position, &value) in CODE_WORD.iter().enumerate() {
                    self.set_digit(position, value);
                }
            }
        }
    }

    /// Show `seconds` as `MM.SS`, or blank the timer when negative
    ///
    /// The point after the minutes is lit on even seconds.
    fn set_timer(&mut self, seconds: i32) {
        if seconds < 0 {
            for index in TIMER_CELLS {
                self.set_cell(index, 0x00);
            }
            return;
        }

        let seconds = seconds.min(MAX_TIMER_SECONDS);
        let minutes = seconds / 60;
        let seconds = seconds % 60;
        let units = seconds % 10;

        let values = [minutes / 10, minutes % 10, seconds / 10, units];
        for (index, value) in TIMER_CELLS.iter().zip(values) {
            self.set_cell(*index, encode_digit(value as i16));
        }

        if units % 2 == 0 {
            let minutes_cell = TIMER_CELLS[1];
            self.set_cell(minutes_cell, self.cell(minutes_cell) | DECIMAL_POINT);
        }
    }
}

// Blanket implementation for all SegmentDisplay types
impl<T: SegmentDisplay + ?Sized> SegmentDisplayExt for T {}
