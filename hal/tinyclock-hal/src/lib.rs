//! TinyStepperClock Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the clock logic is written
//! against. The RP2040 implementation lives in `tinyclock-hal-rp2040`;
//! host tests implement the same traits with plain structs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tinyclock-firmware / tinyclock-core    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tinyclock-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ tinyclock-hal-│
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Single digital output
//! - [`gpio::OutputPort`] - Masked writes to a bank of outputs
//! - [`timer::PeriodicTimer`] - Fixed-rate tick source with an interrupt
//! - [`rtc::RealTimeClock`] - Calendar clock with a match alarm

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod rtc;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use gpio::{OutputPin, OutputPort};
pub use rtc::{AlarmMatch, DateTime, RealTimeClock, RtcError};
pub use timer::{PeriodicTimer, TickConfig, SYS_CLK_HZ};
