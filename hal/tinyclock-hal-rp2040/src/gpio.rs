//! GPIO outputs for the stepper coils and control lines
//!
//! `GpioPort` owns the coil pins handed out by the `PinBank` and lets the
//! core write them through a mask, bit `n` meaning GPIO `n`.

use embassy_rp::gpio::{AnyPin, Flex, Level, Output};
use embassy_rp::Peri;
use tinyclock_hal::{OutputPin, OutputPort};

use crate::pins::{PinError, GPIO_COUNT};

/// Mask-addressed bank of output pins
pub struct GpioPort<'d> {
    pins: [Option<Flex<'d>>; GPIO_COUNT as usize],
    levels: u32,
}

impl<'d> GpioPort<'d> {
    /// Create an empty port; pins are attached one by one
    pub fn new() -> Self {
        Self {
            pins: core::array::from_fn(|_| None),
            levels: 0,
        }
    }

    /// Attach a pin taken from the bank at its GPIO number
    pub fn attach(&mut self, pin_num: u8, pin: Peri<'d, AnyPin>) -> Result<(), PinError> {
        let slot = self
            .pins
            .get_mut(pin_num as usize)
            .ok_or(PinError::InvalidPin)?;
        if slot.is_some() {
            return Err(PinError::AlreadyTaken);
        }
        *slot = Some(Flex::new(pin));
        Ok(())
    }

    fn for_each_in(&mut self, mask: u32, mut f: impl FnMut(&mut Flex<'d>)) {
        for (n, slot) in self.pins.iter_mut().enumerate() {
            if mask & (1 << n) == 0 {
                continue;
            }
            if let Some(pin) = slot {
                f(pin);
            }
        }
    }
}

impl Default for GpioPort<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPort for GpioPort<'_> {
    fn set_outputs(&mut self, mask: u32) {
        self.for_each_in(mask, |pin| {
            pin.set_low();
            pin.set_as_output();
        });
        self.levels &= !mask;
    }

    fn write_masked(&mut self, mask: u32, value: u32) {
        // Release coils before energising the next ones
        self.for_each_in(mask & !value, |pin| pin.set_low());
        self.for_each_in(mask & value, |pin| pin.set_high());
        self.levels = (self.levels & !mask) | (value & mask);
    }

    fn output_state(&self) -> u32 {
        self.levels
    }
}

/// Single push-pull output, used for the driver enable and status LED
pub struct GpioOutput<'d> {
    pin: Output<'d>,
}

impl<'d> GpioOutput<'d> {
    /// Create an output starting at the given level
    pub fn new(pin: Peri<'d, AnyPin>, initial_high: bool) -> Self {
        let level = if initial_high { Level::High } else { Level::Low };
        Self {
            pin: Output::new(pin, level),
        }
    }
}

impl OutputPin for GpioOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
