//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod game;
pub mod tilt;

pub use game::game_task;
pub use tilt::tilt_task;
