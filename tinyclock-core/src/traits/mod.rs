//! Hardware-facing traits of the clock logic
//!
//! These traits define the interface between the clock logic and the
//! motor and LED implementations it drives.

pub mod stepper;

pub use stepper::{Direction, Hand, HandDriver, Rotation};
