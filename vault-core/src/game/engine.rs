//! Round logic
//!
//! [`Game`] owns the secret, the guess and the countdown, and applies the
//! entry actions of each [`GameState`]. It never touches hardware: the
//! caller feeds it time and release edges, and [`Game::render`] paints the
//! current view onto any [`SegmentDisplay`].

use rand_core::RngCore;

use super::code::Code;
use crate::config::{FlashPolicy, GameConfig};
use crate::state::{GameEvent, GameState, Transition};
use crate::timing::{Deadline, SECOND_MS};
use crate::traits::display::{FlashMask, SegmentDisplay, SegmentDisplayExt, CODE_DIGITS};

/// Countdown value when no round clock is shown
pub const COUNTDOWN_INACTIVE: i32 = -1;

/// The code-breaking game
pub struct Game<R> {
    config: GameConfig,
    rng: R,
    state: GameState,
    secret: Code,
    guess: Code,
    /// Seconds left, or [`COUNTDOWN_INACTIVE`]
    countdown: i32,
    second: Deadline,
    /// End of the win or time-up pattern
    hold_until_ms: u64,
    leds: u8,
    flash: FlashMask,
    /// Whole display lit (time up)
    filled: bool,
    attempts: u16,
}

impl<R: RngCore> Game<R> {
    /// Create a game and enter [`GameState::Resetting`]
    pub fn new(config: GameConfig, rng: R, now_ms: u64) -> Self {
        let mut game = Self {
            config,
            rng,
            state: GameState::Resetting,
            secret: Code::ZERO,
            guess: Code::ZERO,
            countdown: COUNTDOWN_INACTIVE,
            second: Deadline::new(SECOND_MS, now_ms),
            hold_until_ms: 0,
            leds: 0,
            flash: FlashMask::NONE,
            filled: false,
            attempts: 0,
        };
        game.reset_round(now_ms);
        game
    }

    /// Current state
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Seconds left in the round, -1 when inactive
    pub fn countdown(&self) -> i32 {
        self.countdown
    }

    /// The player's current guess
    pub fn guess(&self) -> &Code {
        &self.guess
    }

    /// The secret for this round
    pub fn secret(&self) -> &Code {
        &self.secret
    }

    /// Flash mask for the indicator LEDs
    pub fn flash(&self) -> FlashMask {
        self.flash
    }

    /// Steady indicator LED byte
    pub fn leds(&self) -> u8 {
        self.leds
    }

    /// Confirmed guesses this round
    pub fn attempts(&self) -> u16 {
        self.attempts
    }

    /// Active configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Advance the countdown against the wall clock
    ///
    /// However many seconds passed since the last call, the countdown drops
    /// by at most one.
    pub fn tick(&mut self, now_ms: u64) {
        if self.second.catch_up(now_ms) > 0 && self.state.clock_running() && self.countdown > 0 {
            self.countdown -= 1;
        }
        debug_assert!(self.countdown >= COUNTDOWN_INACTIVE);
    }

    /// Run one state machine step with the release edges seen since the
    /// last step
    pub fn step(&mut self, now_ms: u64, released: u8) -> Option<Transition> {
        let event = if self.state.clock_running() && self.countdown == 0 {
            Some(GameEvent::Timeout)
        } else if self.state.accepts_guesses() {
            self.handle_buttons(released)
        } else {
            match self.state {
                GameState::Resetting => Some(GameEvent::RoundReady),
                GameState::Started => (released != 0).then_some(GameEvent::ButtonReleased),
                GameState::Correct => {
                    (now_ms >= self.hold_until_ms).then_some(GameEvent::WinDisplayElapsed)
                }
                GameState::TimeUp => {
                    (now_ms >= self.hold_until_ms).then_some(GameEvent::FeedbackDone)
                }
                GameState::Guessing | GameState::GameOver => None,
            }
        }?;

        Some(self.apply(event, now_ms))
    }

    /// Force the round to end
    ///
    /// Returns `None` when the round is already over.
    pub fn abort(&mut self, now_ms: u64) -> Option<Transition> {
        if self.state.is_terminal() {
            return None;
        }
        Some(self.apply(GameEvent::Abort, now_ms))
    }

    /// Start a new round after game over
    pub fn restart(&mut self, now_ms: u64) -> Option<Transition> {
        if !self.state.is_terminal() {
            return None;
        }
        Some(self.apply(GameEvent::Restart, now_ms))
    }

    /// Paint the current view onto a display
    pub fn render<D: SegmentDisplay + ?Sized>(&self, display: &mut D) {
        match self.state {
            GameState::Resetting => display.blank(),
            _ if self.filled => display.fill(),
            GameState::Started => {
                display.set_code(None);
                display.set_timer(self.countdown);
                display.set_leds(self.leds);
            }
            _ => {
                display.set_code(Some(&self.guess));
                display.set_timer(self.countdown);
                display.set_leds(self.leds);
            }
        }
        display.set_flash(self.flash);
    }

    fn apply(&mut self, event: GameEvent, now_ms: u64) -> Transition {
        let from = self.state;
        let to = from.transition(event);
        self.state = to;
        self.enter(to, event, now_ms);
        Transition { from, to, event }
    }

    /// Entry actions
    fn enter(&mut self, state: GameState, event: GameEvent, now_ms: u64) {
        match state {
            GameState::Resetting => self.reset_round(now_ms),
            GameState::Correct => {
                self.leds = 0xFF;
                self.flash = FlashMask::ALL;
                self.hold_until_ms = now_ms + u64::from(self.config.win_hold_ms);
            }
            GameState::TimeUp => {
                self.filled = true;
                self.flash = FlashMask::ALL;
                self.hold_until_ms = now_ms + u64::from(self.config.timeup_hold_ms);
            }
            GameState::GameOver if event == GameEvent::Abort => {
                self.countdown = COUNTDOWN_INACTIVE;
            }
            GameState::Started | GameState::Guessing | GameState::GameOver => {}
        }
    }

    fn reset_round(&mut self, now_ms: u64) {
        self.secret = Code::random(&mut self.rng);
        self.guess = Code::ZERO;
        self.flash = FlashMask::NONE;
        self.leds = 0;
        self.filled = false;
        self.attempts = 0;
        self.countdown = i32::from(self.config.round_seconds);
        self.second.restart(now_ms);
    }

    /// Apply digit and confirm releases while guessing
    ///
    /// Digit releases are applied before a confirm in the same sample.
    fn handle_buttons(&mut self, released: u8) -> Option<GameEvent> {
        for position in 0..CODE_DIGITS {
            if released & self.config.digit_mask(position) != 0 {
                self.guess.increment(position);
            }
        }

        if released & self.config.confirm_mask() == 0 {
            return None;
        }

        self.attempts = self.attempts.saturating_add(1);
        let matched = self.secret.matched_positions(&self.guess);

        let mut mask = FlashMask::NONE;
        for (position, &hit) in matched.iter().enumerate() {
            let flagged = match self.config.flash_policy {
                FlashPolicy::Matched => hit,
                FlashPolicy::Unmatched => !hit,
            };
            if flagged {
                mask = mask.union(FlashMask::for_position(position));
            }
        }
        self.flash = mask;
        self.leds = mask.bits();

        matched.iter().all(|&hit| hit).then_some(GameEvent::Solved)
    }
}
