//! Configuration types
//!
//! Board-agnostic configuration consumed by the clock logic. Parsing lives
//! in the firmware; these types only carry and check values.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
