//! Cooperative game loop
//!
//! One call to [`GameLoop::poll`] is one iteration of the control loop:
//!
//! 1. advance the countdown
//! 2. on the refresh cadence, sample buttons, render, and flush
//! 3. step the state machine once
//! 4. after game over, restart on the release of a button pressed after
//!    the round ended (if enabled)
//!
//! Sleeping between iterations is the caller's job.

use rand_core::RngCore;

use super::engine::Game;
use crate::buttons::ButtonEdgeTracker;
use crate::state::Transition;
use crate::timing::Deadline;
use crate::traits::display::SegmentDisplay;

/// Game plus the display it drives
pub struct GameLoop<D, R> {
    display: D,
    game: Game<R>,
    buttons: ButtonEdgeTracker,
    refresh: Deadline,
    /// Buttons pressed since the round ended
    restart_armed: u8,
}

impl<D: SegmentDisplay, R: RngCore> GameLoop<D, R> {
    /// Wrap a display and a game
    pub fn new(display: D, game: Game<R>, now_ms: u64) -> Self {
        let refresh = Deadline::new(u64::from(game.config().refresh_ms), now_ms);
        Self {
            display,
            game,
            buttons: ButtonEdgeTracker::new(),
            refresh,
            restart_armed: 0,
        }
    }

    /// Run one loop iteration
    pub fn poll(&mut self, now_ms: u64) -> Option<Transition> {
        self.game.tick(now_ms);

        let mut released = 0;
        if self.refresh.poll(now_ms) {
            let current = self.display.read_buttons();
            if self.game.state().is_terminal() {
                self.restart_armed |= self.buttons.pressed(current);
            }
            released = self.buttons.sample(current);
            self.game.render(&mut self.display);
            self.display.flush(now_ms);
        }

        if self.game.state().is_terminal() {
            // Buttons held over from the round do not count
            if self.game.config().restart_on_release && released & self.restart_armed != 0 {
                return self.restart(now_ms);
            }
            return None;
        }

        self.game.step(now_ms, released)
    }

    /// Force the current round to end
    pub fn abort(&mut self, now_ms: u64) -> Option<Transition> {
        self.game.abort(now_ms)
    }

    /// Start a new round after game over
    pub fn restart(&mut self, now_ms: u64) -> Option<Transition> {
        let transition = self.game.restart(now_ms)?;
        self.restart_armed = 0;
        Some(transition)
    }

    /// The game
    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    /// The display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutable access to the display
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::{GameEvent, GameState};
    use crate::testing::{MockDisplay, ScriptedRng};

    fn new_loop(config: GameConfig) -> GameLoop<MockDisplay, ScriptedRng> {
        let game = Game::new(config, ScriptedRng::new(&[3, 1, 4, 1]), 0);
        GameLoop::new(MockDisplay::new(), game, 0)
    }

    /// Poll every 10 ms over `from..to` and collect the transitions
    fn run(
        game_loop: &mut GameLoop<MockDisplay, ScriptedRng>,
        from: u64,
        to: u64,
    ) -> Vec<(u64, Transition)> {
        (from..to)
            .step_by(10)
            .filter_map(|now| game_loop.poll(now).map(|t| (now, t)))
            .collect()
    }

    /// One-second round, already in Guessing at t=110
    fn short_round(timeup_hold_ms: u32) -> GameLoop<MockDisplay, ScriptedRng> {
        let config = GameConfig {
            round_seconds: 1,
            timeup_hold_ms,
            ..GameConfig::default()
        };
        let mut game_loop = new_loop(config);
        game_loop.poll(10);
        game_loop.display_mut().buttons = 0b0000_0010;
        game_loop.poll(50);
        game_loop.display_mut().buttons = 0;
        game_loop.poll(100);
        assert_eq!(game_loop.game().state(), GameState::Guessing);
        game_loop
    }

    #[test]
    fn test_refresh_cadence() {
        let mut game_loop = new_loop(GameConfig::default());
        for now in (0..=200).step_by(10) {
            game_loop.poll(now);
        }
        assert_eq!(game_loop.display().flushes, 4);
        assert_eq!(game_loop.display().reads, 4);
        assert_eq!(game_loop.display().last_flush_ms, Some(200));
    }

    #[test]
    fn test_first_poll_starts_round() {
        let mut game_loop = new_loop(GameConfig::default());
        let transition = game_loop.poll(10).unwrap();
        assert_eq!(transition.event, GameEvent::RoundReady);
        assert_eq!(game_loop.game().state(), GameState::Started);
    }

    #[test]
    fn test_release_reaches_game() {
        let mut game_loop = new_loop(GameConfig::default());
        game_loop.poll(10);

        game_loop.display_mut().buttons = 0b1000_0000;
        assert_eq!(game_loop.poll(50), None);

        game_loop.display_mut().buttons = 0;
        let transition = game_loop.poll(100).unwrap();
        assert_eq!(transition.to, GameState::Guessing);
    }

    #[test]
    fn test_held_button_counts_once() {
        let mut game_loop = new_loop(GameConfig::default());
        game_loop.poll(10);

        // Into Guessing
        game_loop.display_mut().buttons = 0b0000_0010;
        game_loop.poll(50);
        game_loop.display_mut().buttons = 0;
        game_loop.poll(100);

        game_loop.display_mut().buttons = 0b1000_0000;
        game_loop.poll(150);
        game_loop.poll(200);
        game_loop.display_mut().buttons = 0;
        game_loop.poll(250);
        game_loop.poll(300);

        assert_eq!(game_loop.game().guess().digit(0), 1);
    }

    #[test]
    fn test_display_tracks_game() {
        let mut game_loop = new_loop(GameConfig::default());
        game_loop.poll(10);
        game_loop.poll(50);
        // C0dE placeholder after the round starts
        assert_eq!(game_loop.display().cells[0], 0x39);
    }

    #[test]
    fn test_restart_on_release() {
        let mut game_loop = new_loop(GameConfig::default());
        game_loop.poll(10);
        game_loop.abort(20).unwrap();

        game_loop.display_mut().buttons = 0b0000_0001;
        assert_eq!(game_loop.poll(50), None);
        game_loop.display_mut().buttons = 0;
        let transition = game_loop.poll(100).unwrap();
        assert_eq!(transition.from, GameState::GameOver);
        assert_eq!(transition.to, GameState::Resetting);

        let transition = game_loop.poll(110).unwrap();
        assert_eq!(transition.to, GameState::Started);
    }

    #[test]
    fn test_release_during_time_up_is_ignored() {
        let mut game_loop = short_round(3_000);
        run(&mut game_loop, 110, 1_000);

        // Held when the clock runs out, let go during the pattern
        game_loop.display_mut().buttons = 0b1000_0000;
        let transitions = run(&mut game_loop, 1_000, 1_060);
        game_loop.display_mut().buttons = 0;
        let after = run(&mut game_loop, 1_060, 4_000);

        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].0, 1_010);
        assert_eq!(transitions[0].1.to, GameState::TimeUp);
        assert!(after.is_empty());
        assert_eq!(game_loop.game().state(), GameState::TimeUp);

        let after = run(&mut game_loop, 4_000, 5_000);
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].0, 4_010);
        assert_eq!(after[0].1.event, GameEvent::FeedbackDone);
        assert_eq!(game_loop.game().state(), GameState::GameOver);
    }

    #[test]
    fn test_button_held_into_game_over_does_not_restart() {
        let mut game_loop = short_round(100);
        run(&mut game_loop, 110, 950);

        game_loop.display_mut().buttons = 0b1000_0000;
        let transitions = run(&mut game_loop, 950, 1_200);
        assert_eq!(transitions.len(), 2);
        assert_eq!(transitions[1].1.to, GameState::GameOver);

        game_loop.display_mut().buttons = 0;
        assert!(run(&mut game_loop, 1_200, 1_350).is_empty());
        assert_eq!(game_loop.game().state(), GameState::GameOver);

        // A fresh press after game over still restarts
        game_loop.display_mut().buttons = 0b1000_0000;
        game_loop.poll(1_350);
        game_loop.display_mut().buttons = 0;
        let transition = game_loop.poll(1_400).unwrap();
        assert_eq!(transition.from, GameState::GameOver);
        assert_eq!(transition.to, GameState::Resetting);
    }

    #[test]
    fn test_button_held_through_abort_does_not_restart() {
        let mut game_loop = new_loop(GameConfig::default());
        game_loop.poll(10);
        game_loop.display_mut().buttons = 0b0000_0001;
        game_loop.poll(50);
        game_loop.abort(60).unwrap();

        game_loop.display_mut().buttons = 0;
        assert_eq!(game_loop.poll(100), None);
        assert_eq!(game_loop.game().state(), GameState::GameOver);
    }

    #[test]
    fn test_restart_disabled() {
        let config = GameConfig {
            restart_on_release: false,
            ..GameConfig::default()
        };
        let mut game_loop = new_loop(config);
        game_loop.poll(10);
        game_loop.abort(20);

        game_loop.display_mut().buttons = 0b0000_0001;
        game_loop.poll(50);
        game_loop.display_mut().buttons = 0;
        assert_eq!(game_loop.poll(100), None);
        assert_eq!(game_loop.game().state(), GameState::GameOver);

        assert!(game_loop.restart(120).is_some());
    }

    #[test]
    fn test_countdown_runs_from_loop() {
        let mut game_loop = new_loop(GameConfig::default());
        for now in (0..=3_010).step_by(10) {
            game_loop.poll(now);
        }
        assert_eq!(game_loop.game().countdown(), 177);
    }
}
