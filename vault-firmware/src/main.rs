//! Vault - Code Breaker Game Firmware
//!
//! Main firmware binary for an RP2040 wired to a TM1638 LED & key module.
//! A random four-digit code, eight buttons and a three-minute countdown.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use vault_hal_rp2040::gpio::{data_line, idle_high_output, switch_input};
use vault_hal_rp2040::pins::PinBank;

mod channels;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Vault firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();
    let mut pins = PinBank::new(p);

    // Display link
    let wiring = config.pins;
    let display_pins = (
        pins.take(wiring.strobe.pin),
        pins.take(wiring.clock.pin),
        pins.take(wiring.data.pin),
    );
    match display_pins {
        (Ok(strobe), Ok(clock), Ok(data)) => {
            info!(
                "Display on STB=gpio{} CLK=gpio{} DIO=gpio{}",
                wiring.strobe.pin, wiring.clock.pin, wiring.data.pin
            );
            spawner
                .spawn(tasks::game_task(
                    config,
                    idle_high_output(strobe),
                    idle_high_output(clock),
                    data_line(data, wiring.data.pull_up),
                ))
                .unwrap();
        }
        (strobe, clock, data) => {
            let err = strobe.err().or(clock.err()).or(data.err());
            error!("Display pins unavailable: {:?}", err);
        }
    }

    // Tilt switch (optional)
    if let Some(tilt) = wiring.tilt {
        match pins.take(tilt.pin) {
            Ok(pin) => {
                info!("Tilt switch on gpio{}", tilt.pin);
                spawner
                    .spawn(tasks::tilt_task(switch_input(pin, tilt.pull_up)))
                    .unwrap();
            }
            Err(e) => warn!("Tilt switch pin unavailable: {:?}", e),
        }
    }

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        Timer::after_secs(10).await;
        trace!("Main loop heartbeat");
    }
}
