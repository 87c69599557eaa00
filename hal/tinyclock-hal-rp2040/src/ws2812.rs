//! PIO-driven WS2812 LED ring
//!
//! Implements `smart_leds::SmartLedsWrite` so the animation engine can
//! push frames without knowing about PIO. Writes block on the TX FIFO;
//! a 12-pixel frame takes about 360 µs on the wire.

use core::convert::Infallible;

use embassy_rp::pio::{
    Common, Config, Direction as PioDirection, FifoJoin, Instance, PioPin, ShiftConfig,
    ShiftDirection, StateMachine,
};
use embassy_rp::{clocks, Peri};
use smart_leds::{SmartLedsWrite, RGB8};

use crate::pio::{clock_divider, grb_word, BITS_PER_PIXEL};

/// WS2812 strip on one PIO state machine
pub struct PioWs2812<'d, PIO: Instance, const SM: usize> {
    sm: StateMachine<'d, PIO, SM>,
}

impl<'d, PIO: Instance, const SM: usize> PioWs2812<'d, PIO, SM> {
    /// Load the WS2812 program and start the state machine
    ///
    /// The data line idles low, which WS2812 parts read as latch.
    pub fn new<DATA: PioPin>(
        common: &mut Common<'d, PIO>,
        mut sm: StateMachine<'d, PIO, SM>,
        data_pin: Peri<'d, DATA>,
    ) -> Self {
        // Side-set drives the data line; T1 = 2, T2 = 5, T3 = 3 cycles
        let prg = pio::pio_asm!(
            ".side_set 1",
            ".wrap_target",
            "bitloop:",
            "out x, 1 side 0 [2]",
            "jmp !x do_zero side 1 [1]",
            "jmp bitloop side 1 [4]",
            "do_zero:",
            "nop side 0 [4]",
            ".wrap"
        );

        let installed = common.load_program(&prg.program);
        let data_pio_pin = common.make_pio_pin(data_pin);

        let mut cfg = Config::default();
        cfg.use_program(&installed, &[&data_pio_pin]);
        cfg.clock_divider = clock_divider(clocks::clk_sys_freq());
        cfg.fifo_join = FifoJoin::TxOnly;
        cfg.shift_out = ShiftConfig {
            auto_fill: true,
            threshold: BITS_PER_PIXEL,
            direction: ShiftDirection::Left,
        };

        sm.set_config(&cfg);
        sm.set_pin_dirs(PioDirection::Out, &[&data_pio_pin]);
        sm.set_enable(true);

        Self { sm }
    }
}

impl<'d, PIO: Instance, const SM: usize> SmartLedsWrite for PioWs2812<'d, PIO, SM> {
    type Error = Infallible;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        for color in iterator {
            let word = grb_word(color.into());
            while !self.sm.tx().try_push(word) {}
        }
        Ok(())
    }
}
