//! Shared periodic timer
//!
//! One hardware tick source is multiplexed between hand seeking and LED
//! animation. Ownership is explicit: arming hands out a [`TickLease`] that
//! is given back to disarm.

pub mod shared;

pub use shared::{Consumer, SharedTimer, TickLease, TimerError, TimerOwner};
