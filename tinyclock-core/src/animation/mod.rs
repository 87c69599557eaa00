//! Hourly LED animation
//!
//! An animation borrows the shared tick source for a fixed number of
//! ticks, renders one frame per tick and blanks the ring when done.

pub mod engine;
pub mod patterns;

pub use engine::{AnimationEngine, AnimationState, AnimationTick, TriggerOutcome};
pub use patterns::{Pattern, PatternState, Render, OFF, PATTERNS};
