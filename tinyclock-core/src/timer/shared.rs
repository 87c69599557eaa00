//! Single-owner wrapper around a [`PeriodicTimer`]

use tinyclock_hal::PeriodicTimer;

/// Subsystems that may claim the tick source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Consumer {
    Seek,
    Animation,
}

/// Current owner of the tick source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerOwner {
    #[default]
    Unowned,
    Seek,
    Animation,
}

impl TimerOwner {
    /// Owning consumer, if any
    pub fn consumer(self) -> Option<Consumer> {
        match self {
            TimerOwner::Unowned => None,
            TimerOwner::Seek => Some(Consumer::Seek),
            TimerOwner::Animation => Some(Consumer::Animation),
        }
    }
}

impl From<Consumer> for TimerOwner {
    fn from(consumer: Consumer) -> Self {
        match consumer {
            Consumer::Seek => TimerOwner::Seek,
            Consumer::Animation => TimerOwner::Animation,
        }
    }
}

/// Errors from claiming the tick source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    /// Another consumer holds the timer; it must disarm first
    AlreadyOwned(Consumer),
}

/// Proof of ownership returned by [`SharedTimer::arm`]
///
/// Not `Clone`: exactly one disarm can consume it.
#[must_use = "a lease that is dropped leaves the timer owned forever"]
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickLease {
    consumer: Consumer,
}

impl TickLease {
    pub fn consumer(&self) -> Consumer {
        self.consumer
    }
}

/// Tick source with at most one owner
pub struct SharedTimer<T> {
    source: T,
    owner: TimerOwner,
}

impl<T: PeriodicTimer> SharedTimer<T> {
    /// Wrap a configured, stopped tick source
    pub fn new(mut source: T) -> Self {
        source.set_running(false);
        source.set_interrupt_enabled(false);
        source.clear_pending();
        Self {
            source,
            owner: TimerOwner::Unowned,
        }
    }

    pub fn owner(&self) -> TimerOwner {
        self.owner
    }

    /// Claim the timer for `consumer` and start ticking
    ///
    /// A stale pending tick is cleared before the interrupt is enabled, so
    /// the first delivered tick is a fresh one.
    pub fn arm(&mut self, consumer: Consumer) -> Result<TickLease, TimerError> {
        if let Some(current) = self.owner.consumer() {
            return Err(TimerError::AlreadyOwned(current));
        }

        self.owner = consumer.into();
        self.source.clear_pending();
        self.source.set_interrupt_enabled(true);
        self.source.set_running(true);
        Ok(TickLease { consumer })
    }

    /// Stop the timer and release ownership
    ///
    /// The hardware is always stopped. Ownership is only released when the
    /// lease belongs to the current owner; returns whether it was.
    pub fn disarm(&mut self, lease: TickLease) -> bool {
        self.source.set_running(false);
        self.source.clear_pending();
        self.source.set_interrupt_enabled(false);

        if self.owner == TimerOwner::from(lease.consumer) {
            self.owner = TimerOwner::Unowned;
            true
        } else {
            false
        }
    }

    /// Stop counting without releasing ownership
    pub fn stop(&mut self) {
        self.source.set_running(false);
    }

    /// Acknowledge the current tick
    pub fn clear_pending_tick(&mut self) {
        self.source.clear_pending();
    }

    /// Hardware enable bit
    pub fn is_running(&self) -> bool {
        self.source.is_running()
    }

    pub fn source(&self) -> &T {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut T {
        &mut self.source
    }
}
