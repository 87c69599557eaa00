//! Clock configuration

use tinyclock_hal::DateTime;

use super::hardware::{HandsConfig, LedConfig};

/// Hours during which the hourly chime animation may play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationWindow {
    /// Play an animation on the hour at all
    pub enabled: bool,
    /// First eligible hour, inclusive
    pub start_hour: u8,
    /// Last eligible hour, inclusive
    pub end_hour: u8,
}

impl AnimationWindow {
    /// Whether an animation may play at `hour`
    ///
    /// The window does not wrap past midnight: a start later than the end
    /// never matches.
    pub fn contains(&self, hour: u8) -> bool {
        self.enabled && self.start_hour <= hour && hour <= self.end_hour
    }

    pub fn is_valid(&self) -> bool {
        self.start_hour <= 23 && self.end_hour <= 23
    }
}

impl Default for AnimationWindow {
    fn default() -> Self {
        Self {
            enabled: false,
            start_hour: 8,
            end_hour: 22,
        }
    }
}

/// Configuration problems found by [`ClockConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Start time has an out-of-range field
    InvalidStartTime,
    /// Animation hours outside 0-23
    InvalidWindow,
    /// Hand pins overlap or run off the port
    InvalidHandPins,
    /// Pixel count is zero or too large
    InvalidPixelCount,
}

/// Everything the clock needs at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// Wall-clock time the hands are seeked to and the RTC is set to
    pub start: DateTime,
    pub animation: AnimationWindow,
    pub hands: HandsConfig,
    pub leds: LedConfig,
}

impl ClockConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.start.is_valid() {
            return Err(ConfigError::InvalidStartTime);
        }
        if !self.animation.is_valid() {
            return Err(ConfigError::InvalidWindow);
        }
        if !self.hands.is_valid() {
            return Err(ConfigError::InvalidHandPins);
        }
        if !self.leds.is_valid() {
            return Err(ConfigError::InvalidPixelCount);
        }
        Ok(())
    }
}
