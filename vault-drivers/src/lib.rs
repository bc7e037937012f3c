//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in vault-core:
//!
//! - TM1638 LED & key module over a bit-banged three-wire link

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod tm1638;
