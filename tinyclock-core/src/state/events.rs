//! Events that drive the keeper state machine

/// Keeper inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeeperEvent {
    /// Per-minute alarm scheduled
    Enable,
    /// Alarm cancelled, e.g. before seeking or manual calibration
    Disable,
    /// The alarm matched and was handled
    AlarmFired,
}
