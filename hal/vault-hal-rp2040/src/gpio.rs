//! vault-hal pin traits for embassy-rp GPIO types
//!
//! The TM1638 lines map onto embassy-rp types as follows:
//! - STB, CLK: `Output` (push-pull, idle high)
//! - DIO: `Flex` (driven for commands, released with pull-up for key scans)
//! - tilt switch and other sensors: `Input`

use embassy_rp::gpio::{AnyPin, Flex, Input, Level, Output, Pull};
use embassy_rp::Peri;

impl<'d> vault_hal::OutputPin for Output<'d> {
    fn set_high(&mut self) {
        Output::set_high(self);
    }

    fn set_low(&mut self) {
        Output::set_low(self);
    }

    fn toggle(&mut self) {
        Output::toggle(self);
    }

    fn is_set_high(&self) -> bool {
        Output::is_set_high(self)
    }
}

impl<'d> vault_hal::InputPin for Input<'d> {
    fn is_high(&self) -> bool {
        Input::is_high(self)
    }
}

impl<'d> vault_hal::OutputPin for Flex<'d> {
    fn set_high(&mut self) {
        Flex::set_high(self);
    }

    fn set_low(&mut self) {
        Flex::set_low(self);
    }

    fn is_set_high(&self) -> bool {
        Flex::is_set_high(self)
    }

    fn configure_output(&mut self) -> Result<(), vault_hal::PinError> {
        Flex::set_as_output(self);
        Ok(())
    }
}

impl<'d> vault_hal::InputPin for Flex<'d> {
    fn is_high(&self) -> bool {
        Flex::is_high(self)
    }
}

impl<'d> vault_hal::FlexPin for Flex<'d> {
    fn set_as_input(&mut self) {
        Flex::set_as_input(self);
    }

    fn set_as_output(&mut self) {
        Flex::set_as_output(self);
    }
}

/// Create an idle-high push-pull output (strobe, clock)
pub fn idle_high_output(pin: Peri<'static, AnyPin>) -> Output<'static> {
    Output::new(pin, Level::High)
}

/// Create the bidirectional data line
///
/// With `pull_up` the line stays defined while the controller is clocking
/// out key data.
pub fn data_line(pin: Peri<'static, AnyPin>, pull_up: bool) -> Flex<'static> {
    let mut flex = Flex::new(pin);
    flex.set_pull(pull(pull_up));
    flex.set_high();
    flex.set_as_output();
    flex
}

/// Create a switch input (switch to ground when pulled up)
pub fn switch_input(pin: Peri<'static, AnyPin>, pull_up: bool) -> Input<'static> {
    Input::new(pin, pull(pull_up))
}

fn pull(pull_up: bool) -> Pull {
    if pull_up {
        Pull::Up
    } else {
        Pull::None
    }
}
