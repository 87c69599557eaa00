//! Board-agnostic core logic for the stepper clock firmware
//!
//! This crate contains all clock logic that does not depend on specific
//! hardware implementations:
//!
//! - Time to step conversion and the startup seek
//! - 4-phase stepper drive for both hands
//! - Single-owner sharing of the periodic tick source
//! - Per-minute timekeeping on the RTC alarm
//! - Hourly LED animation scheduling
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod animation;
pub mod clock;
pub mod config;
pub mod motion;
pub mod state;
pub mod stepper;
pub mod timer;
pub mod traits;

pub use clock::{seek_to, ClockCell, ClockCore, ClockError, TickOutcome};
