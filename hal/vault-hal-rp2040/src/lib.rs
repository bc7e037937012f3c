//! RP2040-specific HAL for the Vault firmware
//!
//! This crate provides RP2040 implementations of the shared `vault-hal`
//! traits, plus RP2040-specific functionality:
//!
//! - Pin trait implementations for embassy-rp `Output`, `Input` and `Flex`
//! - Taking pins by number for config-driven pin assignment

#![no_std]

pub mod gpio;
pub mod pins;

// Re-export shared traits from vault-hal for convenience
pub use vault_hal::{FlexPin, InputPin, OutputPin, PinError};
