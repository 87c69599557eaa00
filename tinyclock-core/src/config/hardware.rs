//! Hardware wiring configuration

/// Consecutive GPIO block of one 4-phase motor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorPins {
    /// Lowest GPIO of the block; the motor uses `first_pin..first_pin + 4`
    pub first_pin: u8,
}

impl MotorPins {
    /// Highest usable first pin on a 30-GPIO part
    pub const MAX_FIRST_PIN: u8 = 26;

    /// Port bits covered by this motor
    ///
    /// Empty for a block starting past the port.
    pub const fn mask(&self) -> u32 {
        match 0b1111u32.checked_shl(self.first_pin as u32) {
            Some(mask) => mask,
            None => 0,
        }
    }

    /// GPIO numbers in coil order
    pub const fn pins(&self) -> [u8; 4] {
        let p = self.first_pin;
        [p, p + 1, p + 2, p + 3]
    }

    pub fn is_valid(&self) -> bool {
        self.first_pin <= Self::MAX_FIRST_PIN
    }
}

/// Wiring of both hand motors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandsConfig {
    pub hour: MotorPins,
    pub minute: MotorPins,
}

impl HandsConfig {
    /// Both blocks fit on the port and do not overlap
    pub fn is_valid(&self) -> bool {
        self.hour.is_valid()
            && self.minute.is_valid()
            && self.hour.mask() & self.minute.mask() == 0
    }
}

impl Default for HandsConfig {
    fn default() -> Self {
        Self {
            hour: MotorPins { first_pin: 0 },
            minute: MotorPins { first_pin: 4 },
        }
    }
}

/// Addressable LED ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedConfig {
    /// Number of pixels on the ring
    pub pixel_count: u8,
}

impl LedConfig {
    /// Largest ring a frame buffer can hold
    pub const MAX_PIXELS: u8 = 64;

    pub fn is_valid(&self) -> bool {
        (1..=Self::MAX_PIXELS).contains(&self.pixel_count)
    }
}

impl Default for LedConfig {
    fn default() -> Self {
        Self { pixel_count: 12 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_wiring() {
        let hands = HandsConfig::default();
        assert!(hands.is_valid());
        assert_eq!(hands.hour.mask(), 0x0F);
        assert_eq!(hands.minute.mask(), 0xF0);
        assert_eq!(hands.minute.pins(), [4, 5, 6, 7]);
    }

    #[test]
    fn test_overlapping_wiring() {
        let hands = HandsConfig {
            hour: MotorPins { first_pin: 2 },
            minute: MotorPins { first_pin: 4 },
        };
        assert!(!hands.is_valid());

        let too_high = MotorPins { first_pin: 27 };
        assert!(!too_high.is_valid());
    }

    #[test]
    fn test_pin_past_port_is_rejected() {
        let far = MotorPins { first_pin: 253 };
        assert_eq!(far.mask(), 0);
        assert!(!HandsConfig {
            hour: far,
            minute: MotorPins { first_pin: 4 },
        }
        .is_valid());
    }

    #[test]
    fn test_led_bounds() {
        assert!(LedConfig::default().is_valid());
        assert!(!LedConfig { pixel_count: 0 }.is_valid());
        assert!(!LedConfig { pixel_count: 65 }.is_valid());
    }
}
