//! 50 Hz tick source on PWM slice 0
//!
//! The slice is used purely as a counter: no pins are attached, the
//! divider and top come from `TickConfig` and every wrap raises
//! `PWM_IRQ_WRAP`. The firmware's interrupt handler routes the wrap to
//! whichever subsystem owns the timer.

use embassy_rp::interrupt::{self, InterruptExt};
use embassy_rp::pac;
use embassy_rp::peripherals::PWM_SLICE0;
use embassy_rp::pwm::{Config, Pwm};
use embassy_rp::Peri;
use fixed::types::extra::U4;
use fixed::FixedU16;
use tinyclock_hal::{PeriodicTimer, TickConfig};

/// Slice number of `PWM_SLICE0` in the shared PWM register block
const SLICE: usize = 0;

/// Free-running PWM slice used as a periodic interrupt source
pub struct PwmTickTimer<'d> {
    _pwm: Pwm<'d>,
}

impl<'d> PwmTickTimer<'d> {
    /// Configure the slice, leave it stopped and unmask its NVIC line
    pub fn new(slice: Peri<'d, PWM_SLICE0>, tick: TickConfig) -> Self {
        let mut config = Config::default();
        config.divider = FixedU16::<U4>::from_bits(
            (u16::from(tick.divider_int) << 4) | u16::from(tick.divider_frac & 0x0F),
        );
        config.top = tick.wrap;
        config.enable = false;

        let pwm = Pwm::new_free(slice, config);

        pac::PWM.inte().modify(|w| w.set_ch(SLICE, false));
        pac::PWM.intr().write(|w| w.set_ch(SLICE, true));

        interrupt::PWM_IRQ_WRAP.unpend();
        // SAFETY: the handler only touches state behind a critical-section mutex
        unsafe {
            interrupt::PWM_IRQ_WRAP.enable()
        };

        Self { _pwm: pwm }
    }
}

impl PeriodicTimer for PwmTickTimer<'_> {
    fn set_running(&mut self, running: bool) {
        if running {
            // Full period before the first wrap
            pac::PWM.ch(SLICE).ctr().write(|w| w.set_ctr(0));
        }
        pac::PWM.ch(SLICE).csr().modify(|w| w.set_en(running));
    }

    fn is_running(&self) -> bool {
        pac::PWM.ch(SLICE).csr().read().en()
    }

    fn set_interrupt_enabled(&mut self, enabled: bool) {
        pac::PWM.inte().modify(|w| w.set_ch(SLICE, enabled));
    }

    fn clear_pending(&mut self) {
        // INTR is write-one-to-clear
        pac::PWM.intr().write(|w| w.set_ch(SLICE, true));
    }
}
