//! State machine definition
//!
//! What the display shows and which inputs count is a function of the
//! current state.

use super::events::GameEvent;

/// Round phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameState {
    /// New secret being generated, display cleared
    Resetting,
    /// Clock running, placeholder shown, waiting for first button
    Started,
    /// Player entering and confirming guesses
    Guessing,
    /// Code cracked, win pattern showing
    Correct,
    /// Countdown expired
    TimeUp,
    /// Round over; supervising loop decides when to restart
    GameOver,
}

/// A state change, reported to the caller for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: GameState,
    pub to: GameState,
    pub event: GameEvent,
}

impl GameState {
    /// Check if the countdown runs in this state
    pub fn clock_running(&self) -> bool {
        matches!(self, GameState::Started | GameState::Guessing)
    }

    /// Check if digit and confirm buttons are live
    pub fn accepts_guesses(&self) -> bool {
        matches!(self, GameState::Guessing)
    }

    /// Check if this is the terminal state of a round
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameState::GameOver)
    }

    /// Process an event and return the next state
    ///
    /// This is the core state transition logic.
    pub fn transition(self, event: GameEvent) -> Self {
        use GameEvent::*;
        use GameState::*;

        match (self, event) {
            // Resetting transitions
            (Resetting, RoundReady) => Started,

            // Started transitions
            (Started, Timeout) => TimeUp,
            (Started, ButtonReleased) => Guessing,

            // Guessing transitions
            (Guessing, Timeout) => TimeUp,
            (Guessing, Solved) => Correct,

            // End of round
            (Correct, WinDisplayElapsed) => GameOver,
            (TimeUp, FeedbackDone) => GameOver,

            // GameOver transitions
            (GameOver, Restart) => Resetting,

            // Abort ends the round from any state
            (_, Abort) => GameOver,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_to_started() {
        let next = GameState::Resetting.transition(GameEvent::RoundReady);
        assert_eq!(next, GameState::Started);
    }

    #[test]
    fn test_first_button_starts_guessing() {
        let next = GameState::Started.transition(GameEvent::ButtonReleased);
        assert_eq!(next, GameState::Guessing);
    }

    #[test]
    fn test_timeout_from_running_states() {
        for state in [GameState::Started, GameState::Guessing] {
            assert_eq!(state.transition(GameEvent::Timeout), GameState::TimeUp);
        }
    }

    #[test]
    fn test_timeout_ignored_elsewhere() {
        for state in [GameState::Correct, GameState::GameOver, GameState::Resetting] {
            assert_eq!(state.transition(GameEvent::Timeout), state);
        }
    }

    #[test]
    fn test_win_flow() {
        let correct = GameState::Guessing.transition(GameEvent::Solved);
        assert_eq!(correct, GameState::Correct);
        let over = correct.transition(GameEvent::WinDisplayElapsed);
        assert_eq!(over, GameState::GameOver);
    }

    #[test]
    fn test_solved_only_while_guessing() {
        assert_eq!(
            GameState::Started.transition(GameEvent::Solved),
            GameState::Started
        );
    }

    #[test]
    fn test_abort_from_any_state() {
        let states = [
            GameState::Resetting,
            GameState::Started,
            GameState::Guessing,
            GameState::Correct,
            GameState::TimeUp,
        ];

        for state in states {
            assert_eq!(state.transition(GameEvent::Abort), GameState::GameOver);
        }
    }

    #[test]
    fn test_restart_only_from_game_over() {
        assert_eq!(
            GameState::GameOver.transition(GameEvent::Restart),
            GameState::Resetting
        );
        assert_eq!(
            GameState::Guessing.transition(GameEvent::Restart),
            GameState::Guessing
        );
    }

    #[test]
    fn test_clock_running() {
        assert!(GameState::Started.clock_running());
        assert!(GameState::Guessing.clock_running());
        assert!(!GameState::Correct.clock_running());
        assert!(!GameState::TimeUp.clock_running());
        assert!(!GameState::GameOver.clock_running());
    }

    #[test]
    fn test_accepts_guesses() {
        assert!(GameState::Guessing.accepts_guesses());
        assert!(!GameState::Started.accepts_guesses());
        assert!(!GameState::Correct.accepts_guesses());
        assert!(!GameState::TimeUp.accepts_guesses());
        assert!(!GameState::GameOver.accepts_guesses());
    }
}
