//! Hour and minute motors sharing one output port

use tinyclock_hal::{OutputPin, OutputPort};

use super::motor::StepperMotor;
use crate::config::HandsConfig;
use crate::traits::{Direction, Hand, HandDriver};

/// Both hand motors, the port they share and the bridge enable line
pub struct ClockHands<P, E> {
    port: P,
    enable: E,
    hour: StepperMotor,
    minute: StepperMotor,
}

impl<P: OutputPort, E: OutputPin> ClockHands<P, E> {
    /// Create the pair; nothing is written until [`ClockHands::init`]
    pub fn new(port: P, enable: E, config: &HandsConfig) -> Self {
        Self {
            port,
            enable,
            hour: StepperMotor::new(config.hour),
            minute: StepperMotor::new(config.minute),
        }
    }

    /// Power-up sequence
    ///
    /// The bridges are held disabled while the home phase is written, so
    /// the coils energise directly into phase 0.
    pub fn init(&mut self) {
        self.enable.set_low();
        self.hour.init(&mut self.port);
        self.minute.init(&mut self.port);
        self.enable.set_high();
    }

    /// Motor state for one hand
    pub fn motor(&self, hand: Hand) -> &StepperMotor {
        match hand {
            Hand::Hour => &self.hour,
            Hand::Minute => &self.minute,
        }
    }

    /// Whether the bridges are enabled
    pub fn is_enabled(&self) -> bool {
        self.enable.is_set_high()
    }

    pub fn port(&self) -> &P {
        &self.port
    }
}

impl<P: OutputPort, E: OutputPin> HandDriver for ClockHands<P, E> {
    fn step(&mut self, hand: Hand, direction: Direction) {
        match hand {
            Hand::Hour => self.hour.step(&mut self.port, direction),
            Hand::Minute => self.minute.step(&mut self.port, direction),
        }
    }
}
