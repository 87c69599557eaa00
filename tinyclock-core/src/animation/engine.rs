//! Non-re-entrant animation player
//!
//! `trigger` claims the shared tick source and returns at once. Frames
//! are rendered from the tick interrupt until the pattern's duration has
//! elapsed; the tick after that blanks the ring and releases the timer.

use heapless::Vec;
use smart_leds::{SmartLedsWrite, RGB8};
use tinyclock_hal::PeriodicTimer;

use super::patterns::{PatternState, Render, OFF, PATTERNS};
use crate::config::LedConfig;
use crate::timer::{Consumer, SharedTimer, TickLease, TimerError};

/// Largest ring the frame buffer holds
pub const MAX_PIXELS: usize = LedConfig::MAX_PIXELS as usize;

/// Observable animation state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationState {
    /// True only while the animation owns the timer
    pub active: bool,
    /// Frames rendered so far
    pub elapsed: u32,
    /// Index into [`PATTERNS`]
    pub pattern: usize,
}

/// Result of [`AnimationEngine::trigger`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerOutcome {
    /// Timer armed, pattern chosen
    Started { pattern: &'static str },
    /// An animation is already playing; the trigger was dropped
    AlreadyActive,
    /// Someone else holds the timer; the trigger was dropped
    TimerBusy(Consumer),
}

/// Result of one animation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationTick {
    /// A new frame went out
    Rendered,
    /// Pattern kept the previous frame
    Skipped,
    /// The LED writer rejected the frame
    WriteFailed,
    /// Duration reached and timer released; `blanked` is false when the
    /// writer rejected the blank frame
    Finished { blanked: bool },
    /// No animation was playing
    Idle,
}

/// Plays one pattern at a time on the shared tick source
pub struct AnimationEngine {
    state: AnimationState,
    lease: Option<TickLease>,
    patterns: PatternState,
    frame: Vec<RGB8, MAX_PIXELS>,
}

impl AnimationEngine {
    /// Engine for `leds.pixel_count` pixels with a seeded pattern picker
    pub fn new(leds: &LedConfig, seed: u64) -> Self {
        let len = (leds.pixel_count as usize).min(MAX_PIXELS);
        Self {
            state: AnimationState::default(),
            lease: None,
            patterns: PatternState::new(seed),
            frame: core::iter::repeat(OFF).take(len).collect(),
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Start a random pattern unless one is already playing
    ///
    /// A dropped trigger changes nothing.
    pub fn trigger<T: PeriodicTimer>(&mut self, timer: &mut SharedTimer<T>) -> TriggerOutcome {
        if self.state.active {
            return TriggerOutcome::AlreadyActive;
        }

        let lease = match timer.arm(Consumer::Animation) {
            Ok(lease) => lease,
            Err(TimerError::AlreadyOwned(owner)) => return TriggerOutcome::TimerBusy(owner),
        };

        let pattern = self.patterns.pick(PATTERNS.len() as u32) as usize;
        self.state = AnimationState {
            active: true,
            elapsed: 0,
            pattern,
        };
        self.lease = Some(lease);

        TriggerOutcome::Started {
            pattern: PATTERNS[pattern].name,
        }
    }

    /// Tick handler
    pub fn on_tick<T, W>(&mut self, timer: &mut SharedTimer<T>, leds: &mut W) -> AnimationTick
    where
        T: PeriodicTimer,
        W: SmartLedsWrite<Color = RGB8>,
    {
        if !self.state.active {
            timer.clear_pending_tick();
            return AnimationTick::Idle;
        }

        let pattern = &PATTERNS[self.state.pattern];
        if self.state.elapsed >= pattern.duration_ticks {
            if let Some(lease) = self.lease.take() {
                timer.disarm(lease);
            }
            self.frame.fill(OFF);
            let blanked = leds.write(self.frame.iter().copied()).is_ok();
            self.state.active = false;
            return AnimationTick::Finished { blanked };
        }

        let outcome = match (pattern.render)(&mut self.frame, self.state.elapsed, &mut self.patterns) {
            Render::Skip => AnimationTick::Skipped,
            Render::Frame => match leds.write(self.frame.iter().copied()) {
                Ok(()) => AnimationTick::Rendered,
                Err(_) => AnimationTick::WriteFailed,
            },
        };

        self.state.elapsed += 1;
        timer.clear_pending_tick();
        outcome
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::timer::shared::tests::FakeTimer;
    use crate::timer::TimerOwner;

    /// Pixel sink that keeps the last frame
    #[derive(Debug, Default)]
    pub(crate) struct FakeRing {
        pub last: Vec<RGB8, MAX_PIXELS>,
        pub frames: usize,
        pub reject: bool,
    }

    impl SmartLedsWrite for FakeRing {
        type Error = ();
        type Color = RGB8;

        fn write<I, P>(&mut self, iterator: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = P>,
            P: Into<Self::Color>,
        {
            if self.reject {
                return Err(());
            }
            self.last.clear();
            for pixel in iterator {
                self.last.push(pixel.into()).map_err(|_| ())?;
            }
            self.frames += 1;
            Ok(())
        }
    }

    fn engine() -> AnimationEngine {
        AnimationEngine::new(&LedConfig::default(), 42)
    }

    #[test]
    fn test_trigger_arms_timer() {
        let mut engine = engine();
        let mut timer = SharedTimer::new(FakeTimer::default());

        let outcome = engine.trigger(&mut timer);
        assert!(matches!(outcome, TriggerOutcome::Started { .. }));
        assert!(engine.is_active());
        assert_eq!(engine.state().elapsed, 0);
        assert!(engine.state().pattern < PATTERNS.len());
        assert_eq!(timer.owner(), TimerOwner::Animation);
        assert!(timer.is_running());
    }

    #[test]
    fn test_second_trigger_changes_nothing() {
        let mut engine = engine();
        let mut timer = SharedTimer::new(FakeTimer::default());
        let mut ring = FakeRing::default();

        engine.trigger(&mut timer);
        for _ in 0..5 {
            engine.on_tick(&mut timer, &mut ring);
        }
        let before = engine.state();
        let clears = timer.source().clears;

        assert_eq!(engine.trigger(&mut timer), TriggerOutcome::AlreadyActive);
        assert_eq!(engine.state(), before);
        assert_eq!(timer.owner(), TimerOwner::Animation);
        assert_eq!(timer.source().clears, clears);
    }

    #[test]
    fn test_trigger_while_seeking_is_dropped() {
        let mut engine = engine();
        let mut timer = SharedTimer::new(FakeTimer::default());
        let lease = timer.arm(Consumer::Seek).unwrap();

        assert_eq!(engine.trigger(&mut timer), TriggerOutcome::TimerBusy(Consumer::Seek));
        assert_eq!(engine.state(), AnimationState::default());
        assert!(timer.disarm(lease));
    }

    #[test]
    fn test_runs_for_duration_then_blanks() {
        let mut engine = engine();
        let mut timer = SharedTimer::new(FakeTimer::default());
        let mut ring = FakeRing::default();

        engine.trigger(&mut timer);
        let duration = PATTERNS[engine.state().pattern].duration_ticks;

        for _ in 0..duration {
            let tick = engine.on_tick(&mut timer, &mut ring);
            assert!(matches!(tick, AnimationTick::Rendered | AnimationTick::Skipped));
            assert!(engine.is_active());
        }
        assert_eq!(engine.state().elapsed, duration);

        assert_eq!(
            engine.on_tick(&mut timer, &mut ring),
            AnimationTick::Finished { blanked: true }
        );
        assert!(!engine.is_active());
        assert_eq!(ring.last.len(), 12);
        assert!(ring.last.iter().all(|&p| p == OFF));
        assert_eq!(timer.owner(), TimerOwner::Unowned);
        assert!(!timer.is_running());
        assert!(!timer.source().irq_enabled);

        // Free for the next hour
        assert!(matches!(engine.trigger(&mut timer), TriggerOutcome::Started { .. }));
    }

    #[test]
    fn test_rejected_blank_frame_is_reported() {
        let mut engine = engine();
        let mut timer = SharedTimer::new(FakeTimer::default());
        let mut ring = FakeRing::default();

        engine.trigger(&mut timer);
        let duration = PATTERNS[engine.state().pattern].duration_ticks;
        for _ in 0..duration {
            engine.on_tick(&mut timer, &mut ring);
        }

        ring.reject = true;
        assert_eq!(
            engine.on_tick(&mut timer, &mut ring),
            AnimationTick::Finished { blanked: false }
        );
        assert!(!engine.is_active());
        assert_eq!(timer.owner(), TimerOwner::Unowned);
    }

    #[test]
    fn test_idle_tick_is_acknowledged() {
        let mut engine = engine();
        let mut timer = SharedTimer::new(FakeTimer::default());
        let mut ring = FakeRing::default();
        timer.source_mut().pending = true;

        assert_eq!(engine.on_tick(&mut timer, &mut ring), AnimationTick::Idle);
        assert!(!timer.source().pending);
        assert_eq!(ring.frames, 0);
    }

    #[test]
    fn test_frame_buffer_is_clamped() {
        let engine = AnimationEngine::new(&LedConfig { pixel_count: 200 }, 1);
        assert_eq!(engine.frame.len(), MAX_PIXELS);
    }
}
