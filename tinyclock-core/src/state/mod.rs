//! Per-minute timekeeping
//!
//! The keeper is a two-state machine driven by the RTC alarm. While armed
//! it advances the hands once a minute and rings the hourly chime.

pub mod events;
pub mod keeper;
pub mod machine;

pub use events::KeeperEvent;
pub use keeper::{chime_due, hour_hand_due, AlarmOutcome, RealTimeKeeper};
pub use machine::KeeperState;
