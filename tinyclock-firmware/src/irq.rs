//! Shared clock instance and the two interrupt handlers that drive it
//!
//! All clock work happens here: `PWM_IRQ_WRAP` at 50 Hz while the timer
//! is owned, `RTC_IRQ` once a minute while the alarm is armed. Both take
//! the clock lock for the duration of one handler.

use core::cell::RefCell;

use defmt::*;
use embassy_rp::interrupt;
use embassy_rp::peripherals::PIO0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::once_lock::OnceLock;
use tinyclock_core::animation::{AnimationTick, TriggerOutcome};
use tinyclock_core::motion::SeekTick;
use tinyclock_core::state::AlarmOutcome;
use tinyclock_core::stepper::ClockHands;
use tinyclock_core::{ClockCell, ClockCore, TickOutcome};
use tinyclock_hal_rp2040::{GpioOutput, GpioPort, PioWs2812, PwmTickTimer, RtcClock};

pub type Hands = ClockHands<GpioPort<'static>, GpioOutput<'static>>;
pub type Leds = PioWs2812<'static, PIO0, 0>;
pub type Clock = ClockCore<Hands, PwmTickTimer<'static>, RtcClock<'static>, Leds>;

/// The clock behind a critical-section mutex
pub struct SharedClock(Mutex<CriticalSectionRawMutex, RefCell<Clock>>);

impl SharedClock {
    pub fn new(clock: Clock) -> Self {
        Self(Mutex::new(RefCell::new(clock)))
    }
}

impl ClockCell for SharedClock {
    type Clock = Clock;

    fn with<U>(&self, f: impl FnOnce(&mut Clock) -> U) -> U {
        self.0.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

/// Set once at boot, before any clock interrupt is unmasked
pub static CLOCK: OnceLock<SharedClock> = OnceLock::new();

#[interrupt]
fn PWM_IRQ_WRAP() {
    let Some(clock) = CLOCK.try_get() else {
        return;
    };

    match clock.with(|c| c.on_timer_tick()) {
        TickOutcome::Seek(SeekTick::Stepping(state)) => {
            trace!(
                "Seek tick: {=u32} hour, {=u32} minute steps left",
                state.hour_remaining,
                state.minute_remaining
            );
        }
        TickOutcome::Seek(SeekTick::Finished) => info!("Seek reached target"),
        TickOutcome::Animation(AnimationTick::Finished { blanked: true }) => info!("Animation finished"),
        TickOutcome::Animation(AnimationTick::Finished { blanked: false }) => {
            warn!("Animation finished, blank frame write failed")
        }
        TickOutcome::Animation(AnimationTick::WriteFailed) => warn!("LED frame write failed"),
        TickOutcome::Animation(tick) => trace!("Animation tick: {:?}", tick),
        TickOutcome::Spurious => warn!("Timer tick with no owner"),
    }
}

#[interrupt]
fn RTC_IRQ() {
    let Some(clock) = CLOCK.try_get() else {
        return;
    };

    match clock.with(|c| c.on_alarm()) {
        Ok(AlarmOutcome::Advanced {
            time,
            hour_stepped,
            chime,
        }) => {
            debug!(
                "Minute {=u8}:{=u8}, hour hand stepped: {}",
                time.hour, time.minute, hour_stepped
            );
            match chime {
                Some(TriggerOutcome::Started { pattern }) => info!("Chime: {=str}", pattern),
                Some(TriggerOutcome::AlreadyActive) => warn!("Chime dropped, animation running"),
                Some(TriggerOutcome::TimerBusy(owner)) => {
                    warn!("Chime dropped, timer held by {:?}", owner)
                }
                None => {}
            }
        }
        Ok(AlarmOutcome::Duplicate { time }) => {
            warn!("Alarm fired twice for {=u8}:{=u8}", time.hour, time.minute)
        }
        Ok(AlarmOutcome::Ignored) => warn!("Alarm fired while disabled"),
        Err(e) => error!("RTC read failed in alarm: {:?}", e),
    }
}
