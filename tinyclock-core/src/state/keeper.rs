//! RealTimeKeeper: advances the hands on the per-minute RTC alarm

use tinyclock_hal::{AlarmMatch, DateTime, RealTimeClock, RtcError};

use super::events::KeeperEvent;
use super::machine::KeeperState;
use crate::animation::TriggerOutcome;
use crate::config::AnimationWindow;
use crate::motion::MINUTES_PER_HOUR_STEP;
use crate::traits::{Hand, HandDriver, Rotation};

/// The hour hand moves on every twelfth minute boundary
pub fn hour_hand_due(time: &DateTime) -> bool {
    time.second == 0 && time.minute as u32 % MINUTES_PER_HOUR_STEP == 0
}

/// The chime plays on the hour, inside the window
pub fn chime_due(time: &DateTime, window: &AnimationWindow) -> bool {
    time.minute == 0 && time.second == 0 && window.contains(time.hour)
}

/// What one alarm did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmOutcome {
    /// Hands advanced for `time`
    Advanced {
        time: DateTime,
        hour_stepped: bool,
        /// Set when the chime was due
        chime: Option<TriggerOutcome>,
    },
    /// The alarm re-fired within a minute already handled
    Duplicate { time: DateTime },
    /// Alarm arrived while disabled; nothing moved
    Ignored,
}

/// Keeps the hands in step with the RTC
#[derive(Debug)]
pub struct RealTimeKeeper {
    state: KeeperState,
    window: AnimationWindow,
    last_advanced: Option<DateTime>,
}

impl RealTimeKeeper {
    pub const fn new(window: AnimationWindow) -> Self {
        Self {
            state: KeeperState::Disabled,
            window,
            last_advanced: None,
        }
    }

    pub fn state(&self) -> KeeperState {
        self.state
    }

    pub fn window(&self) -> &AnimationWindow {
        &self.window
    }

    /// Schedule the alarm for the next second-zero
    ///
    /// The hands already show the minute the clock is in, so a match
    /// inside that minute counts as handled.
    pub fn enable<R: RealTimeClock>(&mut self, rtc: &mut R) {
        self.last_advanced = rtc.now().ok();
        rtc.schedule_alarm(AlarmMatch::every_minute());
        self.state = self.state.transition(KeeperEvent::Enable);
    }

    /// Cancel the alarm
    pub fn disable<R: RealTimeClock>(&mut self, rtc: &mut R) {
        rtc.disable_alarm();
        self.state = self.state.transition(KeeperEvent::Disable);
    }

    /// Alarm handler
    ///
    /// The alarm is disabled first so it cannot re-fire while the hands
    /// move, then rescheduled for the next minute even if reading the
    /// clock fails.
    pub fn on_alarm<R, H, F>(&mut self, rtc: &mut R, hands: &mut H, chime: F) -> Result<AlarmOutcome, RtcError>
    where
        R: RealTimeClock,
        H: HandDriver,
        F: FnOnce() -> TriggerOutcome,
    {
        rtc.disable_alarm();
        if self.state != KeeperState::Armed {
            return Ok(AlarmOutcome::Ignored);
        }

        let now = match rtc.now() {
            Ok(now) => now,
            Err(e) => {
                rtc.schedule_alarm(AlarmMatch::every_minute());
                return Err(e);
            }
        };

        let outcome = if self.last_advanced.is_some_and(|last| same_minute(&last, &now)) {
            AlarmOutcome::Duplicate { time: now }
        } else {
            self.last_advanced = Some(now);
            hands.rotate(Hand::Minute, Rotation::Clockwise);

            let hour_stepped = hour_hand_due(&now);
            if hour_stepped {
                hands.rotate(Hand::Hour, Rotation::Clockwise);
            }

            let chime = chime_due(&now, &self.window).then(chime);
            AlarmOutcome::Advanced {
                time: now,
                hour_stepped,
                chime,
            }
        };

        rtc.schedule_alarm(AlarmMatch::every_minute());
        self.state = self.state.transition(KeeperEvent::AlarmFired);
        Ok(outcome)
    }
}

fn same_minute(a: &DateTime, b: &DateTime) -> bool {
    (a.year, a.month, a.day, a.hour, a.minute) == (b.year, b.month, b.day, b.hour, b.minute)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::motion::seek::tests::StepLog;
    use proptest::prelude::*;

    /// Settable RTC that records alarm programming
    #[derive(Debug, Default)]
    pub(crate) struct FakeRtc {
        pub time: Option<DateTime>,
        pub alarm: Option<AlarmMatch>,
        pub disables: usize,
    }

    impl RealTimeClock for FakeRtc {
        fn set_datetime(&mut self, time: DateTime) -> Result<(), RtcError> {
            if !time.is_valid() {
                return Err(RtcError::InvalidDateTime);
            }
            self.time = Some(time);
            Ok(())
        }

        fn now(&self) -> Result<DateTime, RtcError> {
            self.time.ok_or(RtcError::NotRunning)
        }

        fn schedule_alarm(&mut self, pattern: AlarmMatch) {
            self.alarm = Some(pattern);
        }

        fn disable_alarm(&mut self) {
            self.alarm = None;
            self.disables += 1;
        }
    }

    pub(crate) fn at(hour: u8, minute: u8, second: u8) -> DateTime {
        DateTime {
            hour,
            minute,
            second,
            ..DateTime::default()
        }
    }

    fn window() -> AnimationWindow {
        AnimationWindow {
            enabled: true,
            start_hour: 8,
            end_hour: 20,
        }
    }

    /// Keeper enabled a day earlier, with the RTC now at `time`
    fn armed(time: DateTime) -> (RealTimeKeeper, FakeRtc) {
        let mut rtc = FakeRtc::default();
        rtc.set_datetime(DateTime { day: 2, ..time }).unwrap();
        let mut keeper = RealTimeKeeper::new(window());
        keeper.enable(&mut rtc);
        rtc.time = Some(time);
        (keeper, rtc)
    }

    #[test]
    fn test_enable_schedules_every_minute() {
        let (keeper, rtc) = armed(at(9, 0, 30));
        assert_eq!(keeper.state(), KeeperState::Armed);
        assert_eq!(rtc.alarm, Some(AlarmMatch::every_minute()));
    }

    #[test]
    fn test_plain_minute() {
        let (mut keeper, mut rtc) = armed(at(9, 13, 0));
        let mut hands = StepLog::default();

        let outcome = keeper.on_alarm(&mut rtc, &mut hands, || unreachable!()).unwrap();
        assert_eq!(
            outcome,
            AlarmOutcome::Advanced {
                time: at(9, 13, 0),
                hour_stepped: false,
                chime: None
            }
        );
        assert_eq!((hands.minute, hands.hour), (1, 0));
        assert_eq!(hands.forward, 0);
        assert_eq!(rtc.alarm, Some(AlarmMatch::every_minute()));
        assert_eq!(keeper.state(), KeeperState::Armed);
    }

    #[test]
    fn test_twelfth_minute_moves_hour() {
        let (mut keeper, mut rtc) = armed(at(9, 24, 0));
        let mut hands = StepLog::default();

        keeper.on_alarm(&mut rtc, &mut hands, || unreachable!()).unwrap();
        assert_eq!((hands.minute, hands.hour), (1, 1));
    }

    #[test]
    fn test_chime_on_the_hour_in_window() {
        let (mut keeper, mut rtc) = armed(at(10, 0, 0));
        let mut hands = StepLog::default();

        let outcome = keeper
            .on_alarm(&mut rtc, &mut hands, || TriggerOutcome::AlreadyActive)
            .unwrap();
        assert_eq!(
            outcome,
            AlarmOutcome::Advanced {
                time: at(10, 0, 0),
                hour_stepped: true,
                chime: Some(TriggerOutcome::AlreadyActive)
            }
        );
    }

    #[test]
    fn test_no_chime_outside_window() {
        let (mut keeper, mut rtc) = armed(at(21, 0, 0));
        let mut hands = StepLog::default();

        let outcome = keeper.on_alarm(&mut rtc, &mut hands, || unreachable!()).unwrap();
        assert!(matches!(outcome, AlarmOutcome::Advanced { chime: None, .. }));
    }

    #[test]
    fn test_duplicate_fire_does_not_double_step() {
        let (mut keeper, mut rtc) = armed(at(9, 12, 0));
        let mut hands = StepLog::default();

        keeper.on_alarm(&mut rtc, &mut hands, || unreachable!()).unwrap();
        let again = keeper.on_alarm(&mut rtc, &mut hands, || unreachable!()).unwrap();

        assert_eq!(again, AlarmOutcome::Duplicate { time: at(9, 12, 0) });
        assert_eq!((hands.minute, hands.hour), (1, 1));
        assert_eq!(rtc.alarm, Some(AlarmMatch::every_minute()));

        rtc.time = Some(at(9, 13, 0));
        keeper.on_alarm(&mut rtc, &mut hands, || unreachable!()).unwrap();
        assert_eq!(hands.minute, 2);
    }

    #[test]
    fn test_fire_in_enable_minute_does_not_step() {
        let mut rtc = FakeRtc::default();
        rtc.set_datetime(at(12, 0, 0)).unwrap();
        let mut keeper = RealTimeKeeper::new(window());
        let mut hands = StepLog::default();
        keeper.enable(&mut rtc);

        let outcome = keeper.on_alarm(&mut rtc, &mut hands, || unreachable!()).unwrap();
        assert_eq!(outcome, AlarmOutcome::Duplicate { time: at(12, 0, 0) });
        assert_eq!((hands.minute, hands.hour), (0, 0));
        assert_eq!(rtc.alarm, Some(AlarmMatch::every_minute()));

        rtc.time = Some(at(12, 1, 0));
        keeper.on_alarm(&mut rtc, &mut hands, || unreachable!()).unwrap();
        assert_eq!((hands.minute, hands.hour), (1, 0));
    }

    #[test]
    fn test_disabled_keeper_ignores_alarm() {
        let (mut keeper, mut rtc) = armed(at(9, 0, 0));
        let mut hands = StepLog::default();
        keeper.disable(&mut rtc);

        assert_eq!(keeper.state(), KeeperState::Disabled);
        assert_eq!(rtc.alarm, None);
        let outcome = keeper.on_alarm(&mut rtc, &mut hands, || unreachable!()).unwrap();
        assert_eq!(outcome, AlarmOutcome::Ignored);
        assert_eq!(hands.minute, 0);
        assert_eq!(rtc.alarm, None);
    }

    #[test]
    fn test_rtc_error_reschedules() {
        let mut rtc = FakeRtc::default();
        let mut keeper = RealTimeKeeper::new(window());
        let mut hands = StepLog::default();
        keeper.enable(&mut rtc);

        let result = keeper.on_alarm(&mut rtc, &mut hands, || unreachable!());
        assert_eq!(result, Err(RtcError::NotRunning));
        assert_eq!(hands.minute, 0);
        assert_eq!(rtc.alarm, Some(AlarmMatch::every_minute()));
        assert_eq!(keeper.state(), KeeperState::Armed);
    }

    proptest! {
        #[test]
        fn prop_hour_step_iff_twelfth_minute(hour in 0u8..24, minute in 0u8..60, second in 0u8..60) {
            let (mut keeper, mut rtc) = armed(at(hour, minute, second));
            let mut hands = StepLog::default();
            let mut chimed = false;

            keeper.on_alarm(&mut rtc, &mut hands, || {
                chimed = true;
                TriggerOutcome::AlreadyActive
            }).unwrap();

            prop_assert_eq!(hands.minute, 1);
            prop_assert_eq!(hands.hour == 1, second == 0 && minute % 12 == 0);
            prop_assert_eq!(
                chimed,
                minute == 0 && second == 0 && (8..=20).contains(&hour)
            );
        }
    }
}
