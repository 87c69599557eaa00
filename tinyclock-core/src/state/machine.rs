//! Keeper state machine definition

use super::events::KeeperEvent;

/// Whether the per-minute alarm is live
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeeperState {
    /// No alarm scheduled; hands are free for seeking or calibration
    #[default]
    Disabled,
    /// Alarm scheduled for the next minute boundary
    Armed,
}

impl KeeperState {
    /// Check if the hands may be moved by anything but the keeper
    pub fn hands_free(&self) -> bool {
        matches!(self, KeeperState::Disabled)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: KeeperEvent) -> Self {
        use KeeperEvent::*;
        use KeeperState::*;

        match (self, event) {
            (Disabled, Enable) => Armed,
            (Armed, Enable) => Armed,
            (Armed, AlarmFired) => Armed,
            (_, Disable) => Disabled,

            // A late alarm after disable does not re-arm
            (Disabled, AlarmFired) => Disabled,
        }
    }
}
