//! GPIO pin abstractions
//!
//! Provides traits for single digital outputs and for a bank of outputs
//! written through a mask, which is how the stepper coils are driven.

/// Digital output pin
///
/// Used for the driver-enable line and the status LED.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Bank of digital outputs addressed by bit position
///
/// Bit `n` of a mask or value refers to GPIO `n`. Only bits inside the
/// mask are touched by a write; all other outputs keep their level.
pub trait OutputPort {
    /// Configure every pin in `mask` as an output
    fn set_outputs(&mut self, mask: u32);

    /// Drive the pins selected by `mask` to the matching bits of `value`
    fn write_masked(&mut self, mask: u32, value: u32);

    /// Current driven levels, one bit per pin
    fn output_state(&self) -> u32;
}
