//! Inter-task communication channels
//!
//! The game task owns the display and the game; other tasks only raise
//! signals for it to pick up.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Tilt switch changed state (latest only, never blocks the sender)
pub static TILT_EVENT: Signal<CriticalSectionRawMutex, ()> = Signal::new();
