//! Simple TOML parser for the clock configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the clock. Anything beyond that subset is rejected.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Dotted or nested section headers
//! - Arrays and inline tables
//! - Multi-line strings
//! - Datetime values

use tinyclock_core::config::{ClockConfig, ConfigError, MotorPins};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// Parsed fine but the values do not make sense
    Invalid(ConfigError),
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Start,
    Animation,
    Hands,
    Leds,
}

/// Parse TOML configuration into ClockConfig
///
/// Missing keys keep their defaults. The result is validated before it is
/// returned.
pub fn parse_config(input: &str) -> Result<ClockConfig, ParseError> {
    let mut config = ClockConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        // Parse key = value
        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    config.validate().map_err(ParseError::Invalid)?;
    Ok(config)
}

/// Parse section header like "start" or "animation"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "start" => Ok(Section::Start),
        "animation" => Ok(Section::Animation),
        "hands" => Ok(Section::Hands),
        "leds" => Ok(Section::Leds),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
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

/// Parse a pin string like "gpio4"
fn parse_pin(value: &str) -> Result<u8, ParseError> {
    let s = parse_string(value);
    let num = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    num.parse().map_err(|_| ParseError::InvalidPin)
}

/// Parse a "HH:MM" time of day
fn parse_time(value: &str) -> Result<(u8, u8), ParseError> {
    let (hour, minute) = parse_string(value)
        .split_once(':')
        .ok_or(ParseError::InvalidValue)?;
    Ok((parse_int(hour)?, parse_int(minute)?))
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut ClockConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Start => {
            let start = &mut config.start;
            match key {
                "year" => start.year = parse_int(value)?,
                "month" => start.month = parse_int(value)?,
                "day" => start.day = parse_int(value)?,
                "hour" => start.hour = parse_int(value)?,
                "minute" => start.minute = parse_int(value)?,
                "second" => start.second = parse_int(value)?,
                "time" => {
                    let (hour, minute) = parse_time(value)?;
                    start.hour = hour;
                    start.minute = minute;
                    start.second = 0;
                }
                _ => {} // Ignore unknown keys
            }
        }
        Section::Animation => {
            let window = &mut config.animation;
            match key {
                "enabled" => window.enabled = parse_bool(value)?,
                "start_hour" => window.start_hour = parse_int(value)?,
                "end_hour" => window.end_hour = parse_int(value)?,
                _ => {}
            }
        }
        Section::Hands => match key {
            "hour_pin" => {
                config.hands.hour = MotorPins {
                    first_pin: parse_pin(value)?,
                }
            }
            "minute_pin" => {
                config.hands.minute = MotorPins {
                    first_pin: parse_pin(value)?,
                }
            }
            _ => {}
        },
        Section::Leds => {
            if key == "pixel_count" {
                config.leds.pixel_count = parse_int(value)?;
            }
        }
        Section::Root => {}
    }

    Ok(())
}
