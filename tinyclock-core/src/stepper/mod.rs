//! 4-phase stepper drive
//!
//! Both hand motors hang off one output port, each on four consecutive
//! bits. A motor only ever writes inside its own bit range.

pub mod hands;
pub mod motor;
pub mod phase;

pub use hands::ClockHands;
pub use motor::StepperMotor;
pub use phase::{PhaseIndex, PHASE_COUNT, PHASE_SEQUENCE};
