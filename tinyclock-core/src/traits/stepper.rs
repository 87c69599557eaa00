//! Stepper hand traits
//!
//! The clock has two hands, each on its own 4-phase stepper. Direction is
//! expressed in phase order; which phase order turns a hand clockwise is
//! fixed by the motor wiring.

/// Phase sequence direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Advance through the phase table (index + 1)
    Forward,
    /// Walk the phase table in reverse (index - 1)
    Backward,
}

/// Which clock hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hand {
    Hour,
    Minute,
}

/// Rotation as seen on the dial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    /// Phase direction that produces this rotation
    ///
    /// With the hands wired as built, walking the phase table backwards
    /// turns both hands clockwise.
    pub const fn direction(self) -> Direction {
        match self {
            Rotation::Clockwise => Direction::Backward,
            Rotation::CounterClockwise => Direction::Forward,
        }
    }
}

/// Something that can single-step either clock hand
///
/// Implemented by the stepper pair that owns the output port, and by
/// recording fakes in tests.
pub trait HandDriver {
    /// Move one hand by one phase in the given direction
    fn step(&mut self, hand: Hand, direction: Direction);

    /// Move one hand by one phase in the given dial rotation
    fn rotate(&mut self, hand: Hand, rotation: Rotation) {
        self.step(hand, rotation.direction());
    }
}
