//! Single stepper motor on a 4-bit slice of the output port

use tinyclock_hal::OutputPort;

use super::phase::PhaseIndex;
use crate::config::MotorPins;
use crate::traits::Direction;

/// One 4-phase motor
///
/// The port always shows `phase.pattern() << shift` inside `mask` once
/// [`StepperMotor::init`] has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepperMotor {
    mask: u32,
    shift: u8,
    phase: PhaseIndex,
}

impl StepperMotor {
    /// Motor whose coils are on `pins.first_pin .. pins.first_pin + 4`
    pub const fn new(pins: MotorPins) -> Self {
        Self {
            mask: pins.mask(),
            shift: pins.first_pin,
            phase: PhaseIndex::HOME,
        }
    }

    /// Configure the motor's pins as outputs and drive the home phase
    pub fn init<P: OutputPort>(&mut self, port: &mut P) {
        self.phase = PhaseIndex::HOME;
        port.set_outputs(self.mask);
        self.write(port);
    }

    /// Advance one phase and drive the new pattern
    pub fn step<P: OutputPort>(&mut self, port: &mut P, direction: Direction) {
        self.phase = self.phase.stepped(direction);
        self.write(port);
    }

    /// Current phase index
    pub fn phase(&self) -> PhaseIndex {
        self.phase
    }

    /// Bits of the port this motor owns
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Value this motor expects to see on its bits
    pub fn output(&self) -> u32 {
        self.phase.pattern() << self.shift
    }

    fn write<P: OutputPort>(&self, port: &mut P) {
        port.write_masked(self.mask, self.output());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Port that records levels like the real GPIO output register
    #[derive(Debug, Default)]
    pub(crate) struct FakePort {
        pub outputs: u32,
        pub levels: u32,
        pub writes: usize,
    }

    impl OutputPort for FakePort {
        fn set_outputs(&mut self, mask: u32) {
            self.outputs |= mask;
        }

        fn write_masked(&mut self, mask: u32, value: u32) {
            self.levels = (self.levels & !mask) | (value & mask);
            self.writes += 1;
        }

        fn output_state(&self) -> u32 {
            self.levels
        }
    }

    #[test]
    fn test_init_drives_home_phase() {
        let mut port = FakePort::default();
        let mut motor = StepperMotor::new(MotorPins { first_pin: 4 });
        motor.init(&mut port);

        assert_eq!(port.outputs, 0xF0);
        assert_eq!(port.levels, 0b1000 << 4);
        assert_eq!(motor.phase(), PhaseIndex::HOME);
    }

    #[test]
    fn test_step_leaves_other_bits_alone() {
        let mut port = FakePort {
            levels: 0xFFFF_FF0F,
            ..FakePort::default()
        };
        let mut motor = StepperMotor::new(MotorPins { first_pin: 4 });
        motor.init(&mut port);
        motor.step(&mut port, Direction::Forward);

        assert_eq!(port.levels, 0xFFFF_FF0F | (0b0010 << 4));
        motor.step(&mut port, Direction::Backward);
        motor.step(&mut port, Direction::Backward);
        assert_eq!(motor.phase().get(), 3);
        assert_eq!(port.levels & 0xF0, 0b0001 << 4);
        assert_eq!(port.levels & !0xF0, 0xFFFF_FF0F);
    }
}
