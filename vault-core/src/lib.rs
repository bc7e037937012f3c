//! Board-agnostic core logic for the vault game firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Display/keypad abstraction trait
//! - Segment encoding and button edge detection
//! - State machine and round logic
//! - Cooperative loop runner
//! - Configuration type definitions and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buttons;
pub mod config;
pub mod game;
pub mod segment;
pub mod state;
pub mod timing;
pub mod traits;

#[cfg(test)]
mod testing;
