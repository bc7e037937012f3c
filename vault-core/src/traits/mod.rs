//! Hardware abstraction traits
//!
//! These traits define the interface between the game logic and the
//! display/keypad hardware.

pub mod display;

pub use display::{FlashMask, SegmentDisplay, SegmentDisplayExt};
