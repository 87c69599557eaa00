//! Wall-clock time to hand step counts
//!
//! Each motor is a 20-step can stack geared 1:3 to its hand, so both
//! hands make 60 steps per revolution. The minute hand takes one step per
//! minute; the hour hand takes one step every 12 minutes.

/// Motor full steps per motor revolution
pub const MOTOR_STEPS_PER_REV: u32 = 20;

/// Gear reduction between motor and hand
pub const GEAR_RATIO: u32 = 3;

/// Steps per hand revolution
pub const STEPS_PER_REV: u32 = MOTOR_STEPS_PER_REV * GEAR_RATIO;

/// Hour hand steps per hour on a 12-hour dial
pub const STEPS_PER_HOUR: u32 = STEPS_PER_REV / 12;

/// Minutes between two hour hand steps
pub const MINUTES_PER_HOUR_STEP: u32 = 60 / STEPS_PER_HOUR;

/// Absolute hand positions, in steps clockwise from 12 o'clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandSteps {
    pub hour: u32,
    pub minute: u32,
}

impl HandSteps {
    /// Both hands at 12 o'clock
    pub const HOME: Self = Self { hour: 0, minute: 0 };

    pub fn is_home(&self) -> bool {
        *self == Self::HOME
    }

    /// Ticks a seek needs when both hands step together
    pub fn ticks_needed(&self) -> u32 {
        self.hour.max(self.minute)
    }
}

/// Hand positions for `hour:minute`
///
/// Positions are absolute, measured from home. Inputs are expected in
/// range (hour 0-23, minute 0-59).
pub fn time_to_steps(hour: u8, minute: u8) -> HandSteps {
    let hour = hour as u32 % 12;
    let minute = minute as u32;
    HandSteps {
        hour: hour * STEPS_PER_HOUR + minute / MINUTES_PER_HOUR_STEP,
        minute,
    }
}
