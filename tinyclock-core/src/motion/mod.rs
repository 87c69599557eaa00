//! Hand motion
//!
//! Converting wall-clock time into absolute step counts, and seeking both
//! hands from home to those counts on the shared tick source.

pub mod conversion;
pub mod seek;

pub use conversion::{time_to_steps, HandSteps, MINUTES_PER_HOUR_STEP, STEPS_PER_HOUR, STEPS_PER_REV};
pub use seek::{wait_until_stopped, SeekController, SeekStart, SeekState, SeekTick, SEEK_DIRECTION};
