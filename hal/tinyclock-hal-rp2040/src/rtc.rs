//! On-chip RTC with a per-field match alarm
//!
//! Wraps `embassy_rp::rtc::Rtc` behind the `RealTimeClock` trait and
//! unmasks `RTC_IRQ` so alarm matches reach the firmware's handler.

use embassy_rp::interrupt::{self, InterruptExt};
use embassy_rp::peripherals::RTC;
use embassy_rp::rtc::{self, DateTimeFilter, DayOfWeek, Rtc};
use embassy_rp::Peri;
use tinyclock_hal::{AlarmMatch, DateTime, RealTimeClock, RtcError};

/// RP2040 real-time clock
pub struct RtcClock<'d> {
    rtc: Rtc<'d, RTC>,
}

impl<'d> RtcClock<'d> {
    /// Take the RTC with the alarm disabled and its interrupt line unmasked
    pub fn new(peri: Peri<'d, RTC>) -> Self {
        let mut rtc = Rtc::new(peri);
        rtc.disable_alarm();
        Rtc::<'d, RTC>::clear_interrupt();

        interrupt::RTC_IRQ.unpend();
        // SAFETY: the handler only touches state behind a critical-section mutex
        unsafe { interrupt::RTC_IRQ.enable() };

        Self { rtc }
    }
}

impl RealTimeClock for RtcClock<'_> {
    fn set_datetime(&mut self, time: DateTime) -> Result<(), RtcError> {
        if !time.is_valid() {
            return Err(RtcError::InvalidDateTime);
        }
        self.rtc.set_datetime(to_rp(&time)).map_err(map_error)
    }

    fn now(&self) -> Result<DateTime, RtcError> {
        self.rtc.now().map(|t| from_rp(&t)).map_err(map_error)
    }

    fn schedule_alarm(&mut self, pattern: AlarmMatch) {
        self.rtc.schedule_alarm(to_filter(&pattern));
    }

    fn disable_alarm(&mut self) {
        self.rtc.disable_alarm();
        Rtc::<'_, RTC>::clear_interrupt();
    }
}

fn map_error(err: rtc::RtcError) -> RtcError {
    match err {
        rtc::RtcError::NotRunning => RtcError::NotRunning,
        rtc::RtcError::InvalidDateTime(_) => RtcError::InvalidDateTime,
    }
}

fn day_of_week(index: u8) -> DayOfWeek {
    match index {
        0 => DayOfWeek::Sunday,
        1 => DayOfWeek::Monday,
        2 => DayOfWeek::Tuesday,
        3 => DayOfWeek::Wednesday,
        4 => DayOfWeek::Thursday,
        5 => DayOfWeek::Friday,
        _ => DayOfWeek::Saturday,
    }
}

fn to_rp(time: &DateTime) -> rtc::DateTime {
    rtc::DateTime {
        year: time.year,
        month: time.month,
        day: time.day,
        day_of_week: day_of_week(time.day_of_week()),
        hour: time.hour,
        minute: time.minute,
        second: time.second,
    }
}

fn from_rp(time: &rtc::DateTime) -> DateTime {
    DateTime {
        year: time.year,
        month: time.month,
        day: time.day,
        hour: time.hour,
        minute: time.minute,
        second: time.second,
    }
}

fn to_filter(pattern: &AlarmMatch) -> DateTimeFilter {
    let mut filter = DateTimeFilter::default();
    if let Some(year) = pattern.year {
        filter = filter.year(year);
    }
    if let Some(month) = pattern.month {
        filter = filter.month(month);
    }
    if let Some(day) = pattern.day {
        filter = filter.day(day);
    }
    if let Some(hour) = pattern.hour {
        filter = filter.hour(hour);
    }
    if let Some(minute) = pattern.minute {
        filter = filter.minute(minute);
    }
    if let Some(second) = pattern.second {
        filter = filter.second(second);
    }
    filter
}
