//! Phase table and cyclic phase index

use crate::traits::Direction;

/// Number of entries in the phase table
pub const PHASE_COUNT: u8 = 4;

/// Coil patterns, in drive order, for the lowest bit of a motor's range
pub const PHASE_SEQUENCE: [u32; PHASE_COUNT as usize] = [0b1000, 0b0010, 0b0100, 0b0001];

/// Position in [`PHASE_SEQUENCE`], always in `0..PHASE_COUNT`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseIndex(u8);

impl PhaseIndex {
    /// Phase the motors are in at power-up
    pub const HOME: Self = Self(0);

    /// Build an index, reducing `index` modulo the table length
    pub const fn new(index: u8) -> Self {
        Self(index % PHASE_COUNT)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Next index, wrapping 3 -> 0
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % PHASE_COUNT)
    }

    /// Previous index, wrapping 0 -> 3
    pub const fn prev(self) -> Self {
        Self((self.0 + PHASE_COUNT - 1) % PHASE_COUNT)
    }

    /// Index after one step in `direction`
    pub const fn stepped(self, direction: Direction) -> Self {
        match direction {
            Direction::Forward => self.next(),
            Direction::Backward => self.prev(),
        }
    }

    /// Index reached from home after `steps` steps in `direction`
    pub const fn after(steps: u32, direction: Direction) -> Self {
        let offset = (steps % PHASE_COUNT as u32) as u8;
        match direction {
            Direction::Forward => Self::new(offset),
            Direction::Backward => Self::new(PHASE_COUNT - offset),
        }
    }

    /// Coil pattern for this index
    pub const fn pattern(self) -> u32 {
        PHASE_SEQUENCE[self.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping() {
        assert_eq!(PhaseIndex::new(3).next(), PhaseIndex::HOME);
        assert_eq!(PhaseIndex::HOME.prev(), PhaseIndex::new(3));
        assert_eq!(PhaseIndex::new(5).get(), 1);
    }

    #[test]
    fn test_stepped_matches_after() {
        let mut index = PhaseIndex::HOME;
        for steps in 1..=9u32 {
            index = index.stepped(Direction::Backward);
            assert_eq!(index, PhaseIndex::after(steps, Direction::Backward));
        }
        assert_eq!(PhaseIndex::after(59, Direction::Backward).get(), 1);
        assert_eq!(PhaseIndex::after(5, Direction::Backward).get(), 3);
        assert_eq!(PhaseIndex::after(4, Direction::Backward), PhaseIndex::HOME);
    }

    #[test]
    fn test_patterns_are_single_coil() {
        for index in 0..PHASE_COUNT {
            assert_eq!(PhaseIndex::new(index).pattern().count_ones(), 1);
        }
    }
}
