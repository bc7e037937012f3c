//! TM1638 LED & key module
//!
//! Eight 7-segment digits, eight LEDs and eight buttons behind one chip,
//! driven over three GPIO lines:
//!
//! - STB: strobe, held low for a whole transaction
//! - CLK: clock, data is latched on the rising edge
//! - DIO: bidirectional data, LSB first
//!
//! [`BitBang`] speaks the wire protocol; [`Tm1638`] keeps the display
//! buffer and implements [`vault_core::traits::SegmentDisplay`].

pub mod display;
pub mod transport;

pub use display::{DisplayError, Tm1638};
pub use transport::{BitBang, Transport};

/// Data command: write with auto-incrementing address
pub const CMD_WRITE_AUTO: u8 = 0x40;

/// Data command: write to a fixed address
pub const CMD_WRITE_FIXED: u8 = 0x44;

/// Data command: read the key scan
pub const CMD_READ_KEYS: u8 = 0x42;

/// Address command base; OR in the cell index
pub const CMD_ADDRESS: u8 = 0xC0;

/// Display control: on, OR in brightness 0-7
pub const CMD_DISPLAY_ON: u8 = 0x88;

/// Display control: off
pub const CMD_DISPLAY_OFF: u8 = 0x80;

/// Key scan bytes per read
pub const KEY_SCAN_BYTES: u8 = 4;
