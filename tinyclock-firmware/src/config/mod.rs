//! Configuration loading and parsing
//!
//! The configuration is embedded at build time from `clock.toml` and
//! parsed at boot by a custom no_std parser. `build.rs` has already
//! validated the file, so a parse failure here means the two disagree.

pub mod toml;

use defmt::*;
use tinyclock_core::config::ClockConfig;

pub use toml::{parse_config, ParseError};

/// Embedded clock configuration
const CLOCK_TOML: &str = include_str!("../../clock.toml");

/// Load the embedded configuration, falling back to defaults
pub fn load_config() -> ClockConfig {
    match parse_config(CLOCK_TOML) {
        Ok(config) => {
            info!(
                "Config: start {=u16}-{=u8}-{=u8} {=u8}:{=u8}, chime {} ({=u8}-{=u8}), {=u8} pixels",
                config.start.year,
                config.start.month,
                config.start.day,
                config.start.hour,
                config.start.minute,
                config.animation.enabled,
                config.animation.start_hour,
                config.animation.end_hour,
                config.leds.pixel_count
            );
            config
        }
        Err(e) => {
            error!("Failed to parse clock.toml: {:?}, using defaults", e);
            ClockConfig::default()
        }
    }
}
