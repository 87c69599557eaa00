//! RP2040-specific HAL for the TinyStepperClock firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `tinyclock-hal` traits:
//!
//! - Dynamic pin allocation for config-driven hand wiring
//! - Masked GPIO port for the stepper coils
//! - PWM slice 0 as the shared 50 Hz tick source
//! - On-chip RTC with a per-minute alarm
//! - PIO-driven WS2812 LED ring
//! - Ring-oscillator seed for animation selection

#![no_std]

pub mod entropy;
pub mod gpio;
pub mod pins;
pub mod pio;
pub mod pwm_timer;
pub mod rtc;
pub mod ws2812;

pub use entropy::rosc_seed;
pub use gpio::{GpioOutput, GpioPort};
pub use pins::{BoardPeripherals, PinBank, PinError};
pub use pwm_timer::PwmTickTimer;
pub use rtc::RtcClock;
pub use ws2812::PioWs2812;
