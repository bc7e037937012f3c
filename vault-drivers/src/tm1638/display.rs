//! TM1638 display driver
//!
//! Keeps a 16-cell shadow of the chip's display RAM. Cell writes only
//! update the shadow; [`SegmentDisplay::flush`] sends all of it in one bulk
//! write. LEDs marked in the flash mask are sent dark during the first half
//! of every second.

use vault_core::traits::display::{led_cell, FlashMask, SegmentDisplay, DISPLAY_CELLS};
use vault_core::traits::SegmentDisplayExt;
use vault_hal::PinError;

use super::transport::Transport;
use super::{CMD_DISPLAY_OFF, CMD_DISPLAY_ON};

/// Length of one flash phase (ms)
pub const FLASH_PHASE_MS: u64 = 500;

/// Highest brightness level
pub const MAX_BRIGHTNESS: u8 = 0x07;

/// Display driver error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The link could not be configured
    Setup(PinError),
}

impl From<PinError> for DisplayError {
    fn from(err: PinError) -> Self {
        DisplayError::Setup(err)
    }
}

/// TM1638 display/keypad driver
pub struct Tm1638<T> {
    transport: T,
    buffer: [u8; DISPLAY_CELLS],
    flash: FlashMask,
    brightness: u8,
}

impl<T: Transport> Tm1638<T> {
    /// Bring up the display
    ///
    /// Configures the link, switches the display on at `brightness`
    /// (masked to 0-7) and sends a blank frame.
    pub fn setup(mut transport: T, brightness: u8) -> Result<Self, DisplayError> {
        transport.configure()?;

        let mut display = Self {
            transport,
            buffer: [0; DISPLAY_CELLS],
            flash: FlashMask::NONE,
            brightness: 0,
        };
        display.set_brightness(brightness);
        display.blank();
        display.flush(0);
        Ok(display)
    }

    /// Switch the display on at a brightness level (masked to 0-7)
    pub fn set_brightness(&mut self, level: u8) {
        self.brightness = level & MAX_BRIGHTNESS;
        self.transport.send_command(CMD_DISPLAY_ON | self.brightness);
    }

    /// Current brightness level
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Switch the display off, keeping its contents
    pub fn display_off(&mut self) {
        self.transport.send_command(CMD_DISPLAY_OFF);
    }

    /// Update one cell and send it straight away
    ///
    /// Out-of-range indices are ignored.
    pub fn write_cell(&mut self, index: usize, value: u8) {
        if let Some(cell) = self.buffer.get_mut(index) {
            *cell = value;
            self.transport.send_at(index as u8, value);
        }
    }

    /// Shadow of the display RAM
    pub fn buffer(&self) -> &[u8; DISPLAY_CELLS] {
        &self.buffer
    }

    /// The bytes a flush at `now_ms` would send
    pub fn frame(&self, now_ms: u64) -> [u8; DISPLAY_CELLS] {
        let mut frame = self.buffer;
        if (now_ms / FLASH_PHASE_MS) % 2 == 0 {
            for bit in 0..8u8 {
                if self.flash.contains_bit(bit) {
                    frame[led_cell(bit)] = 0x00;
                }
            }
        }
        frame
    }

    /// Give the link back
    pub fn release(self) -> T {
        self.transport
    }
}

impl<T: Transport> SegmentDisplay for Tm1638<T> {
    fn cell(&self, index: usize) -> u8 {
        self.buffer.get(index).copied().unwrap_or(0)
    }

    fn set_cell(&mut self, index: usize, value: u8) {
        if let Some(cell) = self.buffer.get_mut(index) {
            *cell = value;
        }
    }

    fn flash(&self) -> FlashMask {
        self.flash
    }

    fn set_flash(&mut self, mask: FlashMask) {
        self.flash = mask;
    }

    fn flush(&mut self, now_ms: u64) {
        let frame = self.frame(now_ms);
        self.transport.send_bulk(0, &frame);
    }

    fn read_buttons(&mut self) -> u8 {
        let buttons = self.transport.read_buttons();
        #[cfg(feature = "defmt")]
        if buttons != 0 {
            defmt::debug!("Buttons: {=u8:#b}", buttons);
        }
        buttons
    }
}
