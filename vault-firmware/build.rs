//! Build script for vault-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates game.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in each section of game.toml
const SECTIONS: &[(&str, &[&str])] = &[
    (
        "game",
        &[
            "round_seconds",
            "win_hold_ms",
            "timeup_hold_ms",
            "refresh_ms",
            "loop_yield_ms",
            "flash_policy",
            "restart_on_release",
            "tilt_aborts",
        ],
    ),
    ("display", &["brightness"]),
    ("buttons", &["digits", "confirm"]),
    ("pins", &["strobe", "clock", "data", "tilt"]),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate game.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=game.toml");

    let config_path = Path::new("game.toml");

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read game.toml", &[e.to_string()]),
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in game.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_keys(&config, &mut errors);
    validate_game(&config, &mut errors);
    validate_buttons(&config, &mut errors);
    validate_pins(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid game configuration", &errors);
    }

    println!("cargo:warning=game.toml validated successfully");
}

/// Abort the build with a boxed error report
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| {
                let truncated = if e.chars().count() > 62 {
                    format!("{}...", e.chars().take(59).collect::<String>())
                } else {
                    e.clone()
                };
                format!("║  • {:<62} ║", truncated)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Only known sections and keys are allowed
fn validate_keys(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("top level must be a table".to_string());
        return;
    };

    for (section, body) in root {
        let Some((_, keys)) = SECTIONS.iter().find(|(name, _)| *name == section.as_str()) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };

        let Some(body) = body.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        for key in body.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", section, key));
            }
        }
    }
}

fn integer(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

fn check_range(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    if let Some(value) = integer(config, section, key) {
        if value < min || value > max {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
        }
    }
}

/// Validate [game] and [display]
fn validate_game(config: &toml::Value, errors: &mut Vec<String>) {
    check_range(config, "game", "round_seconds", 0, 5999, errors);
    check_range(config, "game", "win_hold_ms", 0, u32::MAX as i64, errors);
    check_range(config, "game", "timeup_hold_ms", 0, u32::MAX as i64, errors);
    check_range(config, "game", "refresh_ms", 1, u16::MAX as i64, errors);
    check_range(config, "game", "loop_yield_ms", 1, u16::MAX as i64, errors);
    check_range(config, "display", "brightness", 0, 7, errors);

    if let Some(policy) = config.get("game").and_then(|g| g.get("flash_policy")) {
        if !matches!(policy.as_str(), Some("matched" | "unmatched")) {
            errors.push("[game] flash_policy must be 'matched' or 'unmatched'".to_string());
        }
    }

    for key in ["restart_on_release", "tilt_aborts"] {
        if let Some(value) = config.get("game").and_then(|g| g.get(key)) {
            if !value.is_bool() {
                errors.push(format!("[game] {} must be true or false", key));
            }
        }
    }
}

/// Validate [buttons]: four digit buttons plus confirm, all distinct, 0-7
fn validate_buttons(config: &toml::Value, errors: &mut Vec<String>) {
    let mut bits = vec![7, 6, 5, 4];
    let mut confirm = 0;

    if let Some(digits) = config.get("buttons").and_then(|b| b.get("digits")) {
        match digits.as_array() {
            Some(items) if items.len() == 4 => {
                bits = items.iter().map(|v| v.as_integer().unwrap_or(-1)).collect();
            }
            _ => {
                errors.push("[buttons] digits must be an array of 4 integers".to_string());
                return;
            }
        }
    }
    if let Some(value) = integer(config, "buttons", "confirm") {
        confirm = value;
    }
    bits.push(confirm);

    for (i, bit) in bits.iter().enumerate() {
        if !(0..8).contains(bit) {
            errors.push(format!("[buttons] button {} must be 0-7", bit));
        } else if bits[..i].contains(bit) {
            errors.push(format!("[buttons] button {} assigned twice", bit));
        }
    }
}

/// Validate [pins]: "gpioN" or "^gpioN", N in 0-29, no pin used twice
fn validate_pins(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(pins) = config.get("pins").and_then(|p| p.as_table()) else {
        return;
    };

    let mut used = Vec::new();
    for (key, value) in pins {
        let Some(text) = value.as_str() else {
            errors.push(format!("[pins] {} must be a string", key));
            continue;
        };
        if key == "tilt" && text == "none" {
            continue;
        }

        let number = text
            .trim_start_matches('^')
            .strip_prefix("gpio")
            .and_then(|n| n.parse::<u8>().ok());

        match number {
            Some(n) if n <= 29 => {
                if used.contains(&n) {
                    errors.push(format!("[pins] gpio{} used twice", n));
                }
                used.push(n);
            }
            _ => errors.push(format!("[pins] {} = '{}' is not a valid pin", key, text)),
        }
    }
}
