//! Periodic tick source
//!
//! A hardware counter that wraps at a fixed rate and raises an interrupt
//! on every wrap. The clock shares one of these between hand seeking and
//! LED animation.

/// Nominal system clock of the RP2040 with the default PLL setup
pub const SYS_CLK_HZ: u32 = 125_000_000;

/// Divider and wrap settings for a counter clocked from the system clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickConfig {
    /// Integer part of the clock divider
    pub divider_int: u8,
    /// Fractional part of the clock divider, in sixteenths
    pub divider_frac: u8,
    /// Counter top; the counter wraps after `wrap + 1` counts
    pub wrap: u16,
}

impl TickConfig {
    /// 50 Hz from a 125 MHz system clock: 125 MHz / 40 / 62 500
    pub const FIFTY_HZ: Self = Self {
        divider_int: 40,
        divider_frac: 0,
        wrap: 62_499,
    };

    /// Tick rate in Hz for the given system clock
    ///
    /// Returns 0 for a zero divider, which the hardware treats as 256
    /// but which is never a sensible configuration here.
    pub fn rate_hz(&self, sys_clk_hz: u32) -> u32 {
        let divider_x16 = (self.divider_int as u64) * 16 + (self.divider_frac as u64 & 0x0F);
        if divider_x16 == 0 {
            return 0;
        }
        let counts = self.wrap as u64 + 1;
        ((sys_clk_hz as u64 * 16) / (divider_x16 * counts)) as u32
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self::FIFTY_HZ
    }
}

/// Fixed-rate tick source with a wrap interrupt
///
/// The timer is configured once at construction. Consumers only start,
/// stop and acknowledge it.
pub trait PeriodicTimer {
    /// Start or stop the counter
    fn set_running(&mut self, running: bool);

    /// Whether the counter is currently running
    fn is_running(&self) -> bool;

    /// Enable or disable delivery of the wrap interrupt
    fn set_interrupt_enabled(&mut self, enabled: bool);

    /// Acknowledge a pending wrap so the interrupt does not re-fire
    fn clear_pending(&mut self);
}
