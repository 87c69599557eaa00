//! Startup seek from home to the current time
//!
//! The seek runs on the shared tick source: every tick moves each hand
//! that still has distance to cover by one step. When both counters reach
//! zero the tick handler stops the timer, and the caller, which has been
//! spinning on the timer's enable bit, disarms it.

use tinyclock_hal::PeriodicTimer;

use super::conversion::HandSteps;
use crate::timer::{Consumer, SharedTimer, TickLease, TimerError};
use crate::traits::{Direction, Hand, HandDriver};

/// Phase direction used while seeking
///
/// Positions are clockwise distances from home and, with the hands wired
/// as built, clockwise is backward through the phase table.
pub const SEEK_DIRECTION: Direction = Direction::Backward;

/// Steps still to go for each hand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SeekState {
    pub hour_remaining: u32,
    pub minute_remaining: u32,
}

impl SeekState {
    pub fn is_done(&self) -> bool {
        self.hour_remaining == 0 && self.minute_remaining == 0
    }
}

/// Result of starting a seek
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SeekStart {
    /// Target is 12:00; the timer was never armed
    AlreadyHome,
    /// Timer armed; the seek completes after `ticks` ticks
    Started { ticks: u32 },
}

/// Result of one seek tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SeekTick {
    /// Hands moved; steps are left
    Stepping(SeekState),
    /// Last steps taken and the timer stopped
    Finished,
}

/// Drives both hands to a target on the shared tick source
#[derive(Debug, Default)]
pub struct SeekController {
    state: SeekState,
    lease: Option<TickLease>,
}

impl SeekController {
    pub const fn new() -> Self {
        Self {
            state: SeekState {
                hour_remaining: 0,
                minute_remaining: 0,
            },
            lease: None,
        }
    }

    /// Load the target and arm the timer
    ///
    /// A home target does nothing. On error the counters are untouched.
    pub fn begin<T: PeriodicTimer>(
        &mut self,
        target: HandSteps,
        timer: &mut SharedTimer<T>,
    ) -> Result<SeekStart, TimerError> {
        if target.is_home() {
            return Ok(SeekStart::AlreadyHome);
        }

        let lease = timer.arm(Consumer::Seek)?;
        self.state = SeekState {
            hour_remaining: target.hour,
            minute_remaining: target.minute,
        };
        self.lease = Some(lease);
        Ok(SeekStart::Started {
            ticks: target.ticks_needed(),
        })
    }

    /// Tick handler: step each unfinished hand once
    pub fn on_tick<H: HandDriver, T: PeriodicTimer>(
        &mut self,
        hands: &mut H,
        timer: &mut SharedTimer<T>,
    ) -> SeekTick {
        if self.state.minute_remaining > 0 {
            self.state.minute_remaining -= 1;
            hands.step(Hand::Minute, SEEK_DIRECTION);
        }

        if self.state.hour_remaining > 0 {
            self.state.hour_remaining -= 1;
            hands.step(Hand::Hour, SEEK_DIRECTION);
        }

        let outcome = if self.state.is_done() {
            timer.stop();
            SeekTick::Finished
        } else {
            SeekTick::Stepping(self.state)
        };

        timer.clear_pending_tick();
        outcome
    }

    /// Release the timer once it has stopped
    ///
    /// Returns false when no seek was armed.
    pub fn finish<T: PeriodicTimer>(&mut self, timer: &mut SharedTimer<T>) -> bool {
        match self.lease.take() {
            Some(lease) => timer.disarm(lease),
            None => false,
        }
    }

    /// Whether a seek holds the timer
    pub fn is_active(&self) -> bool {
        self.lease.is_some()
    }

    pub fn state(&self) -> SeekState {
        self.state
    }
}

/// Block until `is_running` reports false
///
/// This is a deliberate busy-wait, not a suspension point: it runs once
/// at boot and must notice the stop immediately. `is_running` should take
/// and release any lock itself so the tick interrupt can run between
/// polls.
pub fn wait_until_stopped(mut is_running: impl FnMut() -> bool) {
    while is_running() {
        core::hint::spin_loop();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::motion::time_to_steps;
    use crate::timer::shared::tests::FakeTimer;
    use crate::timer::TimerOwner;
    use proptest::prelude::*;

    /// Hand driver that counts steps per hand and direction
    #[derive(Debug, Default)]
    pub(crate) struct StepLog {
        pub hour: u32,
        pub minute: u32,
        pub forward: u32,
    }

    impl HandDriver for StepLog {
        fn step(&mut self, hand: Hand, direction: Direction) {
            match hand {
                Hand::Hour => self.hour += 1,
                Hand::Minute => self.minute += 1,
            }
            if direction == Direction::Forward {
                self.forward += 1;
            }
        }
    }

    /// Deliver wraps until the timer stops; returns the tick count
    fn run(seek: &mut SeekController, hands: &mut StepLog, timer: &mut SharedTimer<FakeTimer>) -> u32 {
        let mut ticks = 0;
        while timer.is_running() {
            timer.source_mut().wrap();
            assert!(timer.source().irq_asserted());
            seek.on_tick(hands, timer);
            assert!(!timer.source().pending);
            ticks += 1;
            assert!(ticks <= 60, "seek did not stop");
        }
        ticks
    }

    #[test]
    fn test_home_target_never_arms() {
        let mut seek = SeekController::new();
        let mut timer = SharedTimer::new(FakeTimer::default());

        assert_eq!(seek.begin(HandSteps::HOME, &mut timer), Ok(SeekStart::AlreadyHome));
        assert_eq!(timer.owner(), TimerOwner::Unowned);
        assert!(!timer.source().irq_enabled);
        assert!(!seek.is_active());
        assert!(!seek.finish(&mut timer));
    }

    #[test]
    fn test_seek_five_fifty_nine() {
        let mut seek = SeekController::new();
        let mut hands = StepLog::default();
        let mut timer = SharedTimer::new(FakeTimer::default());

        let start = seek.begin(HandSteps { hour: 5, minute: 59 }, &mut timer);
        assert_eq!(start, Ok(SeekStart::Started { ticks: 59 }));
        assert_eq!(seek.state().hour_remaining, 5);

        assert_eq!(run(&mut seek, &mut hands, &mut timer), 59);
        assert!(seek.state().is_done());
        assert_eq!(hands.hour, 5);
        assert_eq!(hands.minute, 59);
        assert_eq!(hands.forward, 0);

        // Stopped but still owned until the caller finishes
        assert_eq!(timer.owner(), TimerOwner::Seek);
        assert!(seek.finish(&mut timer));
        assert_eq!(timer.owner(), TimerOwner::Unowned);
        assert!(!seek.is_active());
    }

    #[test]
    fn test_seek_leaves_motor_phases() {
        use crate::stepper::hands::tests::hands;
        use crate::stepper::PhaseIndex;

        let mut seek = SeekController::new();
        let mut hands = hands();
        let mut timer = SharedTimer::new(FakeTimer::default());

        seek.begin(HandSteps { hour: 5, minute: 59 }, &mut timer).unwrap();
        while timer.is_running() {
            seek.on_tick(&mut hands, &mut timer);
        }
        assert!(seek.finish(&mut timer));

        assert_eq!(hands.motor(Hand::Hour).phase(), PhaseIndex::new(3));
        assert_eq!(hands.motor(Hand::Minute).phase(), PhaseIndex::new(1));
    }

    #[test]
    fn test_stepping_reports_remaining() {
        let mut seek = SeekController::new();
        let mut hands = StepLog::default();
        let mut timer = SharedTimer::new(FakeTimer::default());

        seek.begin(HandSteps { hour: 2, minute: 1 }, &mut timer).unwrap();
        let first = seek.on_tick(&mut hands, &mut timer);
        assert_eq!(
            first,
            SeekTick::Stepping(SeekState {
                hour_remaining: 1,
                minute_remaining: 0
            })
        );
        assert_eq!(seek.on_tick(&mut hands, &mut timer), SeekTick::Finished);
        assert!(!timer.is_running());
        assert!(seek.finish(&mut timer));
    }

    #[test]
    fn test_begin_on_owned_timer_leaves_state() {
        let mut seek = SeekController::new();
        let mut timer = SharedTimer::new(FakeTimer::default());
        let lease = timer.arm(Consumer::Animation).unwrap();

        assert_eq!(
            seek.begin(HandSteps { hour: 3, minute: 3 }, &mut timer),
            Err(TimerError::AlreadyOwned(Consumer::Animation))
        );
        assert_eq!(seek.state(), SeekState::default());
        assert!(!seek.is_active());
        assert!(timer.disarm(lease));
    }

    #[test]
    fn test_wait_until_stopped_polls() {
        let mut polls = 0;
        wait_until_stopped(|| {
            polls += 1;
            polls < 5
        });
        assert_eq!(polls, 5);
    }

    proptest! {
        #[test]
        fn prop_seek_steps_exactly_target(hour in 0u8..24, minute in 0u8..60) {
            let target = time_to_steps(hour, minute);
            let mut seek = SeekController::new();
            let mut hands = StepLog::default();
            let mut timer = SharedTimer::new(FakeTimer::default());

            seek.begin(target, &mut timer).unwrap();
            let ticks = run(&mut seek, &mut hands, &mut timer);
            seek.finish(&mut timer);

            prop_assert_eq!(ticks, target.ticks_needed());
            prop_assert_eq!(hands.hour, target.hour);
            prop_assert_eq!(hands.minute, target.minute);
            prop_assert!(seek.state().is_done());
            prop_assert_eq!(timer.owner(), TimerOwner::Unowned);
        }
    }
}
