//! WS2812 bit timing for the PIO LED driver
//!
//! The PIO program spends `T1 + T2 + T3` PIO cycles on every data bit,
//! so the state machine clock must be `bit_rate * CYCLES_PER_BIT`.
//!
//! ```text
//!  bit 1:  |‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾|____|     high for T1 + T2, low for T3
//!  bit 0:  |‾‾‾‾‾‾‾|___________________|     high for T1, low for T2 + T3
//! ```

use fixed::types::U24F8;
use smart_leds::RGB8;

/// Cycles the line stays low before each bit (end of previous bit)
pub const T1: u32 = 2;
/// Cycles that decide between a 0 and a 1
pub const T2: u32 = 5;
/// Cycles the line stays low at the end of a 1 bit
pub const T3: u32 = 3;

/// PIO cycles per WS2812 data bit
pub const CYCLES_PER_BIT: u32 = T1 + T2 + T3;

/// WS2812 data rate in kHz
pub const BIT_RATE_KHZ: u32 = 800;

/// Bits shifted out per pixel
pub const BITS_PER_PIXEL: u8 = 24;

/// Clock divider that runs the program at `BIT_RATE_KHZ * CYCLES_PER_BIT`
///
/// Computed in kHz so the 24.8 fixed-point intermediate never overflows.
pub fn clock_divider(sys_clk_hz: u32) -> U24F8 {
    U24F8::from_num(sys_clk_hz / 1000) / U24F8::from_num(BIT_RATE_KHZ * CYCLES_PER_BIT)
}

/// Pack a colour into the left-aligned GRB word the program shifts out
pub fn grb_word(color: RGB8) -> u32 {
    (u32::from(color.g) << 24) | (u32::from(color.r) << 16) | (u32::from(color.b) << 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divider_at_default_clock() {
        let div = clock_divider(125_000_000);
        assert_eq!(div, U24F8::from_num(15.625));
    }

    #[test]
    fn test_grb_order() {
        let word = grb_word(RGB8 {
            r: 0x11,
            g: 0x22,
            b: 0x33,
        });
        assert_eq!(word, 0x2211_3300);
    }

    #[test]
    fn test_bit_period() {
        assert_eq!(CYCLES_PER_BIT, 10);
    }
}
