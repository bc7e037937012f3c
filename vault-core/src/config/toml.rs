//! Simple TOML parser for the game configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `game.toml`. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean, integer array)
//! - [section] headers: `game`, `display`, `buttons`, `pins`
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings or arrays
//! - Nested tables and dotted keys
//!
//! Keys that are not recognised are errors, so a typo in the file cannot
//! silently fall back to a default.

use heapless::String as HString;

use super::hardware::PinConfig;
use super::types::{ConfigError, FlashPolicy, GameConfig};

/// Longest key name kept in [`ParseError::UnknownKey`]
pub const MAX_KEY_LEN: usize = 24;

/// Parse error
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Line is not `key = value`
    InvalidLine,
    /// Key not valid in its section
    UnknownKey(HString<MAX_KEY_LEN>),
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// Parsed, but failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(err: ConfigError) -> Self {
        ParseError::Invalid(err)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Game,
    Display,
    Buttons,
    Pins,
}

/// Parse TOML configuration into GameConfig
///
/// Keys that are absent keep their default value. The result is validated
/// before it is returned.
pub fn parse_config(input: &str) -> Result<GameConfig, ParseError> {
    let mut config = GameConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    config.validate()?;
    Ok(config)
}

/// Parse section header like "game" or "pins"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "game" => Ok(Section::Game),
        "display" => Ok(Section::Display),
        "buttons" => Ok(Section::Buttons),
        "pins" => Ok(Section::Pins),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop a trailing comment, leaving `#` inside strings alone
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse an array of exactly `N` small integers, like "[7, 6, 5, 4]"
fn parse_int_array<const N: usize>(value: &str) -> Result<[u8; N], ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut out = [0u8; N];
    let mut count = 0;
    for item in inner.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let slot = out.get_mut(count).ok_or(ParseError::InvalidValue)?;
        *slot = parse_int(item)?;
        count += 1;
    }

    if count != N {
        return Err(ParseError::InvalidValue);
    }
    Ok(out)
}

/// Parse a pin string like "gpio12" or "^gpio15" (pull-up)
fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let value = parse_string(value);
    let (pull_up, s) = match value.strip_prefix('^') {
        Some(rest) => (true, rest),
        None => (false, value),
    };

    let pin = s
        .strip_prefix("gpio")
        .ok_or(ParseError::InvalidPin)?
        .parse()
        .map_err(|_| ParseError::InvalidPin)?;

    Ok(PinConfig { pin, pull_up })
}

/// Parse an optional pin; "none" leaves it unassigned
fn parse_optional_pin(value: &str) -> Result<Option<PinConfig>, ParseError> {
    match parse_string(value) {
        "none" => Ok(None),
        _ => parse_pin(value).map(Some),
    }
}

/// Parse flash policy
fn parse_flash_policy(value: &str) -> Result<FlashPolicy, ParseError> {
    match parse_string(value) {
        "matched" | "Matched" => Ok(FlashPolicy::Matched),
        "unmatched" | "Unmatched" => Ok(FlashPolicy::Unmatched),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Build the unknown-key error, truncating long names
fn unknown_key(key: &str) -> ParseError {
    let mut name = HString::new();
    for ch in key.chars() {
        if name.push(ch).is_err() {
            break;
        }
    }
    ParseError::UnknownKey(name)
}

/// Apply a key/value pair to the config
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut GameConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Game, "round_seconds") => config.round_seconds = parse_int(value)?,
        (Section::Game, "win_hold_ms") => config.win_hold_ms = parse_int(value)?,
        (Section::Game, "timeup_hold_ms") => config.timeup_hold_ms = parse_int(value)?,
        (Section::Game, "refresh_ms") => config.refresh_ms = parse_int(value)?,
        (Section::Game, "loop_yield_ms") => config.loop_yield_ms = parse_int(value)?,
        (Section::Game, "flash_policy") => config.flash_policy = parse_flash_policy(value)?,
        (Section::Game, "restart_on_release") => config.restart_on_release = parse_bool(value)?,
        (Section::Game, "tilt_aborts") => config.tilt_aborts = parse_bool(value)?,

        (Section::Display, "brightness") => config.brightness = parse_int(value)?,

        (Section::Buttons, "digits") => config.digit_buttons = parse_int_array(value)?,
        (Section::Buttons, "confirm") => config.confirm_button = parse_int(value)?,

        (Section::Pins, "strobe") => config.pins.strobe = parse_pin(value)?,
        (Section::Pins, "clock") => config.pins.clock = parse_pin(value)?,
        (Section::Pins, "data") => config.pins.data = parse_pin(value)?,
        (Section::Pins, "tilt") => config.pins.tilt = parse_optional_pin(value)?,

        _ => return Err(unknown_key(key)),
    }

    Ok(())
}
