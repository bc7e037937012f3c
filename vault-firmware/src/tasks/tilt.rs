//! Tilt switch monitor
//!
//! Turns switch edges into [`TILT_EVENT`] signals. The game task decides
//! what a tilt means.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Timer;

use crate::channels::TILT_EVENT;

/// Ignore further edges for this long after a tilt (ms)
const SETTLE_MS: u64 = 200;

/// Tilt task - signals on every switch edge
#[embassy_executor::task]
pub async fn tilt_task(mut sensor: Input<'static>) {
    info!("Tilt task started");

    loop {
        sensor.wait_for_any_edge().await;
        debug!("Tilt edge, level high={}", sensor.is_high());
        TILT_EVENT.signal(());

        // Contact bounce
        Timer::after_millis(SETTLE_MS).await;
    }
}
