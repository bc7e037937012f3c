//! Game task
//!
//! Runs the cooperative game loop: poll, log, then sleep for the loop yield
//! or until the tilt switch fires, whichever comes first.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Flex, Output};
use embassy_time::{Delay, Instant, Timer};

use vault_core::config::GameConfig;
use vault_core::game::{Game, GameLoop};
use vault_core::state::{GameState, Transition};
use vault_drivers::tm1638::{BitBang, Tm1638};

use crate::channels::TILT_EVENT;

/// Game task - owns the display and the round
#[embassy_executor::task]
pub async fn game_task(
    config: GameConfig,
    strobe: Output<'static>,
    clock: Output<'static>,
    data: Flex<'static>,
) {
    info!("Game task started");

    let transport = BitBang::new(strobe, clock, data, Delay);
    let display = match Tm1638::setup(transport, config.brightness) {
        Ok(display) => display,
        Err(e) => {
            error!("Display setup failed: {:?}", e);
            // Nothing to show without a display
            loop {
                Timer::after_secs(60).await;
            }
        }
    };
    info!("Display ready (brightness {})", config.brightness);

    let start = Instant::now();
    let game = Game::new(config, RoscRng, 0);
    let mut game_loop = GameLoop::new(display, game, 0);
    let yield_ms = u64::from(config.loop_yield_ms);

    loop {
        let now_ms = start.elapsed().as_millis();
        if let Some(transition) = game_loop.poll(now_ms) {
            log_transition(&transition, game_loop.game());
        }
        trace!("Loop at {}ms, countdown {}", now_ms, game_loop.game().countdown());

        match select(Timer::after_millis(yield_ms), TILT_EVENT.wait()).await {
            Either::First(()) => {}
            Either::Second(()) => {
                warn!("Tilt detected");
                if config.tilt_aborts {
                    let now_ms = start.elapsed().as_millis();
                    if let Some(transition) = game_loop.abort(now_ms) {
                        log_transition(&transition, game_loop.game());
                    }
                }
            }
        }
    }
}

fn log_transition(transition: &Transition, game: &Game<RoscRng>) {
    info!(
        "{:?} -> {:?} on {:?}",
        transition.from, transition.to, transition.event
    );

    match transition.to {
        GameState::Started => info!("New round, {}s on the clock", game.countdown()),
        GameState::Correct => info!(
            "Code cracked in {} attempts with {}s left",
            game.attempts(),
            game.countdown()
        ),
        GameState::TimeUp => info!("Time up after {} attempts", game.attempts()),
        _ => {}
    }
}
