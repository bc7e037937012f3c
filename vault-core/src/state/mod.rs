//! Game state machine
//!
//! Defines the phases of a round and the legal moves between them.
//! The table is explicit, finite, and deterministic; entry actions live in
//! [`crate::game::Game`].

pub mod events;
pub mod machine;

pub use events::GameEvent;
pub use machine::{GameState, Transition};
