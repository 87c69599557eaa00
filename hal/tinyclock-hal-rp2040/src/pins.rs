//! Dynamic pin allocation for config-driven hardware setup
//!
//! The hand motors sit on GPIO blocks chosen in `clock.toml`, so their
//! pins are handed out by number at runtime. The WS2812 data pin is fixed
//! because PIO pins are typed.

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{PIN_14, PIO0, PWM_SLICE0, RTC};
use embassy_rp::Peri;
use embassy_rp::Peripherals;

/// Number of user GPIOs on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// GPIO carrying the WS2812 data line
pub const LED_DATA_PIN: u8 = 14;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin reserved for special function
    Reserved,
}

/// Pin bank that holds the free GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT as usize],
}

impl PinBank {
    /// Split the peripherals into the pin bank and the fixed peripherals
    pub fn from_peripherals(p: Peripherals) -> (Self, BoardPeripherals) {
        let bank = Self {
            pins: [
                Some(p.PIN_0.into()),
                Some(p.PIN_1.into()),
                Some(p.PIN_2.into()),
                Some(p.PIN_3.into()),
                Some(p.PIN_4.into()),
                Some(p.PIN_5.into()),
                Some(p.PIN_6.into()),
                Some(p.PIN_7.into()),
                Some(p.PIN_8.into()),
                Some(p.PIN_9.into()),
                Some(p.PIN_10.into()),
                Some(p.PIN_11.into()),
                Some(p.PIN_12.into()),
                Some(p.PIN_13.into()),
                None, // LED_DATA_PIN
                Some(p.PIN_15.into()),
                Some(p.PIN_16.into()),
                Some(p.PIN_17.into()),
                Some(p.PIN_18.into()),
                Some(p.PIN_19.into()),
                Some(p.PIN_20.into()),
                Some(p.PIN_21.into()),
                Some(p.PIN_22.into()),
                Some(p.PIN_23.into()),
                Some(p.PIN_24.into()),
                Some(p.PIN_25.into()),
                Some(p.PIN_26.into()),
                Some(p.PIN_27.into()),
                Some(p.PIN_28.into()),
                Some(p.PIN_29.into()),
            ],
        };
        let board = BoardPeripherals {
            led_data: p.PIN_14,
            pio0: p.PIO0,
            pwm_slice0: p.PWM_SLICE0,
            rtc: p.RTC,
        };
        (bank, board)
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        if pin_num >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        if pin_num == LED_DATA_PIN {
            return Err(PinError::Reserved);
        }
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }
}

/// Fixed-function peripherals used alongside the pin bank
pub struct BoardPeripherals {
    pub led_data: Peri<'static, PIN_14>,
    pub pio0: Peri<'static, PIO0>,
    pub pwm_slice0: Peri<'static, PWM_SLICE0>,
    pub rtc: Peri<'static, RTC>,
}
