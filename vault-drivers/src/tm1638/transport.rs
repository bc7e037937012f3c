//! Bit-banged three-wire link
//!
//! Every byte goes out LSB first as 16 half-steps. On even half-steps the
//! data line takes the next bit and the clock drops; on odd half-steps the
//! clock rises and the chip latches the bit. Each half-step is followed by a
//! short delay so the chip sees stable levels.
//!
//! Transactions always finish with the strobe high. Nothing here can be
//! interrupted halfway; `&mut self` keeps transactions from interleaving.

use embedded_hal::delay::DelayNs;
use vault_hal::{FlexPin, OutputPin, PinError};

use super::{CMD_ADDRESS, CMD_READ_KEYS, CMD_WRITE_AUTO, CMD_WRITE_FIXED, KEY_SCAN_BYTES};

/// Default delay after each half-step (ns)
pub const DEFAULT_HALF_STEP_NS: u32 = 1_000;

/// Half-steps per byte on the wire
const HALF_STEPS_PER_BYTE: u8 = 16;

/// Link to the display chip
pub trait Transport {
    /// Put the lines into their idle state
    fn configure(&mut self) -> Result<(), PinError>;

    /// Send one byte in its own strobe window
    fn send_command(&mut self, command: u8);

    /// Write consecutive cells from `start_address` (0-15), in one strobe
    /// window
    fn send_bulk(&mut self, start_address: u8, data: &[u8]);

    /// Write one cell
    fn send_at(&mut self, address: u8, value: u8);

    /// Read the key scan, one bit per button
    fn read_buttons(&mut self) -> u8;
}

/// GPIO bit-bang implementation of [`Transport`]
pub struct BitBang<STB, CLK, DIO, D> {
    strobe: STB,
    clock: CLK,
    data: DIO,
    delay: D,
    half_step_ns: u32,
}

impl<STB, CLK, DIO, D> BitBang<STB, CLK, DIO, D>
where
    STB: OutputPin,
    CLK: OutputPin,
    DIO: FlexPin,
    D: DelayNs,
{
    /// Create a link from three lines and a delay source
    pub fn new(strobe: STB, clock: CLK, data: DIO, delay: D) -> Self {
        Self {
            strobe,
            clock,
            data,
            delay,
            half_step_ns: DEFAULT_HALF_STEP_NS,
        }
    }

    /// Override the half-step delay
    pub fn with_half_step_ns(mut self, half_step_ns: u32) -> Self {
        self.half_step_ns = half_step_ns;
        self
    }

    /// Shift one byte out, LSB first
    ///
    /// Does not touch the strobe; callers frame the transaction.
    pub fn send_byte(&mut self, value: u8) {
        for half in 0..HALF_STEPS_PER_BYTE {
            if half % 2 == 0 {
                self.data.set_state((value >> (half / 2)) & 0x01 != 0);
                self.clock.set_low();
            } else {
                self.clock.set_high();
            }
            self.pause();
        }
    }

    /// Give the pins and delay back
    pub fn release(self) -> (STB, CLK, DIO, D) {
        (self.strobe, self.clock, self.data, self.delay)
    }

    fn pause(&mut self) {
        self.delay.delay_ns(self.half_step_ns);
    }

    fn begin(&mut self) {
        self.strobe.set_low();
    }

    fn end(&mut self) {
        self.strobe.set_high();
    }
}

impl<STB, CLK, DIO, D> Transport for BitBang<STB, CLK, DIO, D>
where
    STB: OutputPin,
    CLK: OutputPin,
    DIO: FlexPin,
    D: DelayNs,
{
    fn configure(&mut self) -> Result<(), PinError> {
        self.strobe.configure_output()?;
        self.clock.configure_output()?;
        self.data.configure_output()?;
        self.data.set_as_output();

        self.strobe.set_high();
        self.clock.set_high();
        Ok(())
    }

    fn send_command(&mut self, command: u8) {
        self.begin();
        self.send_byte(command);
        self.end();
    }

    fn send_bulk(&mut self, start_address: u8, data: &[u8]) {
        self.begin();
        self.send_byte(CMD_WRITE_AUTO);
        self.send_byte(CMD_ADDRESS | (start_address & 0x0F));
        for &byte in data {
            self.send_byte(byte);
        }
        self.end();
    }

    fn send_at(&mut self, address: u8, value: u8) {
        self.begin();
        self.send_byte(CMD_WRITE_FIXED);
        self.send_byte(CMD_ADDRESS | (address & 0x0F));
        self.send_byte(value);
        self.end();
    }

    fn read_buttons(&mut self) -> u8 {
        self.begin();
        self.send_byte(CMD_READ_KEYS);
        self.data.set_as_input();

        let mut buttons = 0u8;
        for slot in 0..KEY_SCAN_BYTES {
            let mut value = 0u8;
            for half in 0..HALF_STEPS_PER_BYTE {
                if half % 2 == 0 {
                    self.clock.set_low();
                } else {
                    self.clock.set_high();
                    value = (value << 1) | u8::from(self.data.is_high());
                }
                self.pause();
            }
            buttons |= value >> slot;
        }

        self.data.set_as_output();
        self.end();
        buttons
    }
}


#[cfg(test)]
mod tests {
    use super::mock::bus;
    use super::*;

    #[test]
    fn test_configure_idles_high() {
        let (mut bus, wire) = bus();
        bus.configure().unwrap();
        let wire = wire.borrow();
        assert!(wire.strobe);
        assert!(wire.clock);
        assert!(!wire.data_is_input);
    }

    #[test]
    fn test_configure_failure() {
        let (mut bus, wire) = bus();
        wire.borrow_mut().fail_configure = Some(PinError::Unavailable);
        assert_eq!(bus.configure(), Err(PinError::Unavailable));
    }

    #[test]
    fn test_command_lsb_first() {
        let (mut bus, wire) = bus();
        bus.configure().unwrap();
        bus.send_command(0x01);

        let wire = wire.borrow();
        assert_eq!(wire.windows.len(), 1);
        assert_eq!(
            wire.windows[0],
            [true, false, false, false, false, false, false, false]
        );
        assert!(wire.strobe);
    }

    #[test]
    fn test_sixteen_half_steps_per_byte() {
        let (mut bus, _wire) = bus();
        bus.configure().unwrap();
        bus.send_command(0x8A);
        let (_, _, _, delay) = bus.release();
        assert_eq!(delay.calls, 16);
        assert_eq!(delay.total_ns, 16 * u64::from(DEFAULT_HALF_STEP_NS));
    }

    #[test]
    fn test_half_step_override() {
        let (bus, _wire) = bus();
        let mut bus = bus.with_half_step_ns(250);
        bus.configure().unwrap();
        bus.send_command(0x00);
        let (_, _, _, delay) = bus.release();
        assert_eq!(delay.total_ns, 16 * 250);
    }

    #[test]
    fn test_bulk_single_window() {
        let (mut bus, wire) = bus();
        bus.configure().unwrap();
        bus.send_bulk(0, &[0x3F, 0x01, 0x06]);

        assert_eq!(wire.borrow().window_bytes(), [[0x40, 0xC0, 0x3F, 0x01, 0x06]]);
    }

    #[test]
    fn test_bulk_start_address() {
        let (mut bus, wire) = bus();
        bus.configure().unwrap();
        bus.send_bulk(8, &[0x66, 0x6D]);
        bus.send_bulk(0x1F, &[0x00]);

        assert_eq!(
            wire.borrow().window_bytes(),
            vec![vec![0x40, 0xC8, 0x66, 0x6D], vec![0x40, 0xCF, 0x00]]
        );
    }

    #[test]
    fn test_send_at() {
        let (mut bus, wire) = bus();
        bus.configure().unwrap();
        bus.send_at(3, 0x7F);

        assert_eq!(wire.borrow().window_bytes(), [[0x44, 0xC3, 0x7F]]);
    }

    #[test]
    fn test_read_buttons() {
        let (mut bus, wire) = bus();
        bus.configure().unwrap();
        {
            let mut wire = wire.borrow_mut();
            wire.queue_scan_byte(0b0000_0001);
            wire.queue_scan_byte(0b0000_0100);
            wire.queue_scan_byte(0b0001_0000);
            wire.queue_scan_byte(0b0100_0000);
        }

        assert_eq!(bus.read_buttons(), 0b0000_1111);

        let wire = wire.borrow();
        // Only the command byte is latched from our side
        assert_eq!(wire.window_bytes(), [[0x42]]);
        assert!(!wire.data_is_input);
        assert!(wire.strobe);
        assert!(wire.input.is_empty());
    }

    #[test]
    fn test_read_buttons_high_bits() {
        let (mut bus, wire) = bus();
        bus.configure().unwrap();
        {
            let mut wire = wire.borrow_mut();
            wire.queue_scan_byte(0b1000_0000);
            wire.queue_scan_byte(0);
            wire.queue_scan_byte(0);
            wire.queue_scan_byte(0);
        }

        assert_eq!(bus.read_buttons(), 0b1000_0000);
    }

    #[test]
    fn test_transactions_do_not_merge() {
        let (mut bus, wire) = bus();
        bus.configure().unwrap();
        bus.send_command(0x88);
        bus.send_bulk(0, &[0x00]);

        assert_eq!(
            wire.borrow().window_bytes(),
            vec![vec![0x88], vec![0x40, 0xC0, 0x00]]
        );
    }
}
