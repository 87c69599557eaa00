//! TinyStepperClock - two-hand stepper clock firmware
//!
//! Boots with both hands at 12 o'clock, seeks them to the configured
//! start time, sets the RTC and then advances the minute hand once a
//! minute from the RTC alarm. On the hour, inside the configured window,
//! the WS2812 ring plays a short light show.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_time::{Instant, Timer};
use tinyclock_core::stepper::ClockHands;
use tinyclock_core::{seek_to, ClockCell, ClockCore};
use tinyclock_hal::{OutputPin, TickConfig, SYS_CLK_HZ};
use tinyclock_hal_rp2040::{
    rosc_seed, GpioOutput, GpioPort, PinBank, PioWs2812, PwmTickTimer, RtcClock,
};
use {defmt_rtt as _, panic_probe as _};

use crate::irq::{SharedClock, CLOCK};

mod config;
mod irq;

/// H-bridge driver enable line
const DRIVER_ENABLE_PIN: u8 = 8;

/// On-board status LED
const STATUS_LED_PIN: u8 = 25;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("TinyStepperClock starting...");

    let p = embassy_rp::init(Default::default());
    let (mut pins, board) = PinBank::from_peripherals(p);
    info!("Peripherals initialized");

    let config = config::load_config();

    // Status LED stays lit while the clock is awake
    let _status = match pins.take(STATUS_LED_PIN) {
        Ok(pin) => {
            let mut led = GpioOutput::new(pin, false);
            led.set_high();
            Some(led)
        }
        Err(e) => {
            warn!("Status LED unavailable: {:?}", e);
            None
        }
    };

    let enable = match pins.take(DRIVER_ENABLE_PIN) {
        Ok(pin) => GpioOutput::new(pin, false),
        Err(e) => {
            error!("Driver enable pin unavailable: {:?}", e);
            halt().await
        }
    };

    let mut port = GpioPort::new();
    for motor in [config.hands.hour, config.hands.minute] {
        for pin_num in motor.pins() {
            let attached = pins.take(pin_num).and_then(|pin| port.attach(pin_num, pin));
            if let Err(e) = attached {
                error!("Hand pin {=u8} unavailable: {:?}", pin_num, e);
                halt().await
            }
        }
    }

    let mut hands = ClockHands::new(port, enable, &config.hands);
    hands.init();
    info!(
        "Hands at home: hour GPIO {=u8}-{=u8}, minute GPIO {=u8}-{=u8}",
        config.hands.hour.first_pin,
        config.hands.hour.first_pin + 3,
        config.hands.minute.first_pin,
        config.hands.minute.first_pin + 3
    );

    let tick = TickConfig::FIFTY_HZ;
    let timer = PwmTickTimer::new(board.pwm_slice0, tick);
    let rtc = RtcClock::new(board.rtc);

    let Pio { mut common, sm0, .. } = Pio::new(board.pio0, Irqs);
    let leds = PioWs2812::new(&mut common, sm0, board.led_data);

    let seed = rosc_seed(Instant::now().as_ticks());
    debug!("Animation seed {=u64}", seed);

    let clock = CLOCK.get_or_init(|| {
        SharedClock::new(ClockCore::new(hands, timer, rtc, leds, &config, seed))
    });
    info!("Clock ready, {=u32} Hz tick", tick.rate_hz(SYS_CLK_HZ));

    clock.with(|c| c.disable_alarm());

    let start = config.start;
    info!("Seeking to {=u8}:{=u8}", start.hour, start.minute);
    match seek_to(clock, &start) {
        Ok(outcome) => info!("Seek done: {:?}", outcome),
        Err(e) => error!("Seek failed: {:?}", e),
    }

    match clock.with(|c| c.rtc_init(start)) {
        Ok(()) => info!("RTC set, per-minute alarm armed"),
        Err(e) => error!("RTC init failed: {:?}", e),
    }

    // All clock work happens in the PWM and RTC interrupts from here on
    loop {
        Timer::after_secs(60).await;
        let state = clock.with(|c| c.keeper_state());
        trace!("Heartbeat, keeper {:?}", state);
    }
}

/// Park the firmware after an unrecoverable wiring error
async fn halt() -> ! {
    loop {
        Timer::after_secs(60).await;
    }
}
