//! The code-breaking game
//!
//! - [`Code`]: four-digit secret and guess
//! - [`Game`]: round state, countdown, and entry actions
//! - [`GameLoop`]: one cooperative loop iteration over a display

pub mod code;
pub mod engine;
pub mod runner;

pub use code::Code;
pub use engine::{Game, COUNTDOWN_INACTIVE};
pub use runner::GameLoop;
