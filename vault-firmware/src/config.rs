//! Configuration loading
//!
//! `game.toml` is compiled into the firmware. The build script has already
//! checked it, so a parse failure here means the two validators disagree;
//! the defaults are used in that case.

use defmt::*;

use vault_core::config::{parse_config, GameConfig};

/// Embedded configuration (compiled into firmware)
/// Edit game.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../game.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load_config() -> GameConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Loaded game.toml: {}s rounds, brightness {}, {:?} feedback",
                config.round_seconds, config.brightness, config.flash_policy
            );
            config
        }
        Err(e) => {
            error!("game.toml rejected ({:?}), using defaults", e);
            GameConfig::default()
        }
    }
}
