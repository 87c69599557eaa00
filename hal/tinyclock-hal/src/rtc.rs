//! Real-time clock abstraction
//!
//! A calendar clock that keeps running independently of the CPU and can
//! raise an interrupt when its fields match an alarm pattern.

/// Calendar date and wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    /// Full year, e.g. 2024
    pub year: u16,
    /// Month 1-12
    pub month: u8,
    /// Day of month 1-31
    pub day: u8,
    /// Hour 0-23
    pub hour: u8,
    /// Minute 0-59
    pub minute: u8,
    /// Second 0-59
    pub second: u8,
}

impl DateTime {
    /// Check field ranges; does not check days per month
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
            && (1..=31).contains(&self.day)
            && self.hour <= 23
            && self.minute <= 59
            && self.second <= 59
    }

    /// Day of week, 0 = Sunday
    pub fn day_of_week(&self) -> u8 {
        const OFFSETS: [u16; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
        let month = self.month.clamp(1, 12) as usize;
        let year = if month < 3 {
            self.year.saturating_sub(1)
        } else {
            self.year
        };
        let days = year + year / 4 - year / 100 + year / 400 + OFFSETS[month - 1] + self.day as u16;
        (days % 7) as u8
    }
}

impl Default for DateTime {
    fn default() -> Self {
        Self {
            year: 2024,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }
}

/// Alarm pattern: each `Some` field must match, `None` is a wildcard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmMatch {
    pub year: Option<u16>,
    pub month: Option<u8>,
    pub day: Option<u8>,
    pub hour: Option<u8>,
    pub minute: Option<u8>,
    pub second: Option<u8>,
}

impl AlarmMatch {
    /// Pattern that matches every instant
    pub const fn any() -> Self {
        Self {
            year: None,
            month: None,
            day: None,
            hour: None,
            minute: None,
            second: None,
        }
    }

    /// Fires once a minute, at second zero
    pub const fn every_minute() -> Self {
        Self::any().second(0)
    }

    pub const fn second(mut self, second: u8) -> Self {
        self.second = Some(second);
        self
    }

    /// Check whether `time` satisfies the pattern
    pub fn matches(&self, time: &DateTime) -> bool {
        fn field<T: PartialEq>(want: Option<T>, have: T) -> bool {
            want.map_or(true, |w| w == have)
        }

        field(self.year, time.year)
            && field(self.month, time.month)
            && field(self.day, time.day)
            && field(self.hour, time.hour)
            && field(self.minute, time.minute)
            && field(self.second, time.second)
    }
}

/// Real-time clock errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError {
    /// The clock has not been started or lost its time
    NotRunning,
    /// A date-time with out-of-range fields was supplied
    InvalidDateTime,
}

/// Calendar clock with one match alarm
pub trait RealTimeClock {
    /// Set the current date and time and start the clock
    fn set_datetime(&mut self, time: DateTime) -> Result<(), RtcError>;

    /// Read the current date and time
    fn now(&self) -> Result<DateTime, RtcError>;

    /// Program the alarm pattern and enable the alarm interrupt
    fn schedule_alarm(&mut self, pattern: AlarmMatch);

    /// Disable the alarm; also clears a latched alarm interrupt
    fn disable_alarm(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u8, minute: u8, second: u8) -> DateTime {
        DateTime {
            hour,
            minute,
            second,
            ..DateTime::default()
        }
    }

    #[test]
    fn test_validity() {
        assert!(DateTime::default().is_valid());
        assert!(!at(24, 0, 0).is_valid());
        assert!(!at(0, 60, 0).is_valid());
        assert!(!DateTime {
            month: 13,
            ..DateTime::default()
        }
        .is_valid());
    }

    #[test]
    fn test_day_of_week() {
        // 2024-01-01 was a Monday
        assert_eq!(DateTime::default().day_of_week(), 1);
        // 2000-02-29 was a Tuesday
        let leap = DateTime {
            year: 2000,
            month: 2,
            day: 29,
            ..DateTime::default()
        };
        assert_eq!(leap.day_of_week(), 2);
    }

    #[test]
    fn test_every_minute_pattern() {
        let pattern = AlarmMatch::every_minute();
        assert!(pattern.matches(&at(3, 17, 0)));
        assert!(pattern.matches(&at(23, 59, 0)));
        assert!(!pattern.matches(&at(3, 17, 1)));
    }

    #[test]
    fn test_any_matches_everything() {
        assert!(AlarmMatch::any().matches(&at(12, 34, 56)));
        let fixed = AlarmMatch {
            hour: Some(1),
            minute: Some(2),
            ..AlarmMatch::any()
        };
        assert!(fixed.matches(&at(1, 2, 0)));
        assert!(!fixed.matches(&at(1, 3, 0)));
    }
}
