//! GPIO pin abstractions
//!
//! Provides traits for digital input, output and bidirectional pins that can
//! be implemented by chip-specific HALs.

/// Errors raised while claiming or configuring a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number does not exist on this chip
    InvalidPin,
    /// Pin is owned by another peripheral or already claimed
    Unavailable,
}

/// Digital output pin
///
/// Level changes are infallible once the pin has been configured; only
/// [`OutputPin::configure_output`] can fail.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }

    /// Claim the pin as a push-pull output
    ///
    /// Pins handed over already configured (the usual case with typed HAL
    /// pins) keep the default implementation.
    fn configure_output(&mut self) -> Result<(), PinError> {
        Ok(())
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Pin that switches between driving and sampling the line
///
/// Used for the shared DIO line of TM1638-style controllers, which is
/// driven by the MCU for commands and by the chip for key scan data.
pub trait FlexPin: OutputPin + InputPin {
    /// Release the line and sample it
    fn set_as_input(&mut self);

    /// Drive the line again
    fn set_as_output(&mut self);
}
