//! ClockCore: the whole clock behind one lock
//!
//! Hands, shared timer, RTC and LED ring are owned here together with the
//! three controllers that use them. Interrupt handlers call
//! [`ClockCore::on_timer_tick`] and [`ClockCore::on_alarm`]; boot code calls
//! [`seek_to`] and [`ClockCore::rtc_init`].

use smart_leds::{SmartLedsWrite, RGB8};
use tinyclock_hal::{DateTime, PeriodicTimer, RealTimeClock, RtcError};

use crate::animation::{AnimationEngine, AnimationState, AnimationTick, TriggerOutcome};
use crate::config::ClockConfig;
use crate::motion::{time_to_steps, wait_until_stopped, SeekController, SeekStart, SeekState, SeekTick};
use crate::state::{AlarmOutcome, KeeperState, RealTimeKeeper};
use crate::timer::{SharedTimer, TimerError, TimerOwner};
use crate::traits::{Hand, HandDriver, Rotation};

/// Errors from the boot-time entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// The per-minute alarm must be disabled first
    AlarmArmed,
    /// The tick source is held by another consumer
    Timer(TimerError),
    Rtc(RtcError),
}

impl From<TimerError> for ClockError {
    fn from(e: TimerError) -> Self {
        ClockError::Timer(e)
    }
}

impl From<RtcError> for ClockError {
    fn from(e: RtcError) -> Self {
        ClockError::Rtc(e)
    }
}

/// What a timer tick was used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    Seek(SeekTick),
    Animation(AnimationTick),
    /// Tick with no owner; acknowledged and dropped
    Spurious,
}

/// All clock state
pub struct ClockCore<H, T, R, W> {
    hands: H,
    timer: SharedTimer<T>,
    rtc: R,
    leds: W,
    seek: SeekController,
    keeper: RealTimeKeeper,
    animation: AnimationEngine,
}

impl<H, T, R, W> ClockCore<H, T, R, W>
where
    H: HandDriver,
    T: PeriodicTimer,
    R: RealTimeClock,
    W: SmartLedsWrite<Color = RGB8>,
{
    /// Assemble the clock; the hands must already be initialised at home
    pub fn new(hands: H, timer: T, rtc: R, leds: W, config: &ClockConfig, seed: u64) -> Self {
        Self {
            hands,
            timer: SharedTimer::new(timer),
            rtc,
            leds,
            seek: SeekController::new(),
            keeper: RealTimeKeeper::new(config.animation),
            animation: AnimationEngine::new(&config.leds, seed),
        }
    }

    /// Start moving the hands from home to `time`
    pub fn begin_seek(&mut self, time: &DateTime) -> Result<SeekStart, ClockError> {
        if self.keeper.state() != KeeperState::Disabled {
            return Err(ClockError::AlarmArmed);
        }
        let target = time_to_steps(time.hour, time.minute);
        Ok(self.seek.begin(target, &mut self.timer)?)
    }

    /// True while a seek holds the timer and it is still counting
    pub fn seek_running(&self) -> bool {
        self.seek.is_active() && self.timer.is_running()
    }

    /// Release the timer after the seek stopped it
    pub fn finish_seek(&mut self) -> bool {
        self.seek.finish(&mut self.timer)
    }

    /// Set the RTC and arm the per-minute alarm
    pub fn rtc_init(&mut self, time: DateTime) -> Result<(), ClockError> {
        self.keeper.disable(&mut self.rtc);
        self.rtc.set_datetime(time)?;
        self.keeper.enable(&mut self.rtc);
        Ok(())
    }

    /// Resume per-minute stepping, e.g. after calibration
    pub fn enable_alarm(&mut self) {
        self.keeper.enable(&mut self.rtc);
    }

    /// Pause per-minute stepping
    pub fn disable_alarm(&mut self) {
        self.keeper.disable(&mut self.rtc);
    }

    /// Single-step one hand for manual homing
    ///
    /// Refused while the alarm is armed or the timer is owned.
    pub fn nudge(&mut self, hand: Hand, rotation: Rotation) -> bool {
        if !self.keeper.state().hands_free() || self.timer.owner() != TimerOwner::Unowned {
            return false;
        }
        self.hands.rotate(hand, rotation);
        true
    }

    /// Play an animation now
    pub fn trigger_animation(&mut self) -> TriggerOutcome {
        self.animation.trigger(&mut self.timer)
    }

    /// Timer wrap interrupt
    pub fn on_timer_tick(&mut self) -> TickOutcome {
        match self.timer.owner() {
            TimerOwner::Seek => TickOutcome::Seek(self.seek.on_tick(&mut self.hands, &mut self.timer)),
            TimerOwner::Animation => {
                TickOutcome::Animation(self.animation.on_tick(&mut self.timer, &mut self.leds))
            }
            TimerOwner::Unowned => {
                self.timer.clear_pending_tick();
                TickOutcome::Spurious
            }
        }
    }

    /// RTC alarm interrupt
    pub fn on_alarm(&mut self) -> Result<AlarmOutcome, RtcError> {
        let animation = &mut self.animation;
        let timer = &mut self.timer;
        self.keeper
            .on_alarm(&mut self.rtc, &mut self.hands, || animation.trigger(timer))
    }

    pub fn keeper_state(&self) -> KeeperState {
        self.keeper.state()
    }

    pub fn seek_state(&self) -> SeekState {
        self.seek.state()
    }

    pub fn animation_state(&self) -> AnimationState {
        self.animation.state()
    }

    pub fn timer_owner(&self) -> TimerOwner {
        self.timer.owner()
    }

    pub fn hands(&self) -> &H {
        &self.hands
    }

    pub fn timer(&self) -> &T {
        self.timer.source()
    }

    pub fn rtc(&self) -> &R {
        &self.rtc
    }

    pub fn leds(&self) -> &W {
        &self.leds
    }
}

/// Short exclusive access to a shared [`ClockCore`]
///
/// The firmware implements this over a critical-section mutex; each call
/// holds the lock only for the closure.
pub trait ClockCell {
    type Clock;

    fn with<U>(&self, f: impl FnOnce(&mut Self::Clock) -> U) -> U;
}

/// Seek the hands to `time` and wait for the seek to finish
///
/// Blocks the caller: the enable bit is polled in a spin loop, taking the
/// lock afresh for every poll so the tick interrupt can run in between.
pub fn seek_to<C, H, T, R, W>(clock: &C, time: &DateTime) -> Result<SeekStart, ClockError>
where
    C: ClockCell<Clock = ClockCore<H, T, R, W>>,
    H: HandDriver,
    T: PeriodicTimer,
    R: RealTimeClock,
    W: SmartLedsWrite<Color = RGB8>,
{
    let start = clock.with(|c| c.begin_seek(time))?;
    if let SeekStart::Started { .. } = start {
        wait_until_stopped(|| clock.with(|c| c.seek_running()));
        clock.with(|c| c.finish_seek());
    }
    Ok(start)
}
