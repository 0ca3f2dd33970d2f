//! Lamp control loop.
//!
//! Composes a [`TouchSensor`] and a [`BrightnessRamp`] through the
//! [`IntentProcessor`]. The two components never talk to each other
//! directly; the lamp polls the sensor, interprets the read and calls into
//! the ramp controller.
//!
//! Brightness transitions block, so the sensor is not polled while one is
//! running. A press that starts and ends during a fade is never seen.
//!
//! # Usage
//!
//! ```ignore
//! let mut lamp = Lamp::new(sensor, ramp, &clock, &LampConfig::default());
//! lamp.start();
//!
//! loop {
//!     lamp.poll();
//! }
//! ```

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::DutyOutput;
use crate::clock::Clock;
use crate::intent_processor::{IntentProcessor, LampConfig, LampIntent};
use crate::ramp::BrightnessRamp;
use crate::touch::{TouchAdc, TouchRead, TouchSensor};

/// Hold time of each phase of the power-up blink
const POWER_UP_BLINK_HOLD_MS: u32 = 1000;

/// Result of one [`Lamp::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollResult {
    /// The sensor read taken this iteration
    pub read: TouchRead,
    /// Intent applied to the brightness controller, if any
    pub intent: Option<LampIntent>,
}

/// Touch lamp: one sensor, one brightness controller
pub struct Lamp<'a, A, O, C, const N: usize>
where
    A: TouchAdc,
    O: DutyOutput,
    C: Clock,
{
    sensor: TouchSensor<'a, A, C>,
    ramp: BrightnessRamp<'a, O, C, N>,
    clock: C,
    intents: IntentProcessor,
    power_on_brightness: u8,
    blink_on_power_up: bool,
}

impl<'a, A, O, C, const N: usize> Lamp<'a, A, O, C, N>
where
    A: TouchAdc,
    O: DutyOutput,
    C: Clock,
{
    pub fn new(
        sensor: TouchSensor<'a, A, C>,
        ramp: BrightnessRamp<'a, O, C, N>,
        clock: C,
        config: &LampConfig,
    ) -> Self {
        Self {
            sensor,
            ramp,
            clock,
            intents: IntentProcessor::new(config, config.power_on_brightness),
            power_on_brightness: config.power_on_brightness,
            blink_on_power_up: config.blink_on_power_up,
        }
    }

    /// Power-up sequence
    ///
    /// Calibrates the sensor, blinks if configured, then switches on at the
    /// power-on brightness.
    pub fn start(&mut self) {
        self.sensor.initialize();

        if self.blink_on_power_up {
            self.ramp.on();
            self.clock.delay_ms(POWER_UP_BLINK_HOLD_MS);
            self.ramp.off();
            self.clock.delay_ms(POWER_UP_BLINK_HOLD_MS);
        }

        self.ramp.set(self.power_on_brightness);
    }

    /// One iteration of the control loop
    pub fn poll(&mut self) -> PollResult {
        let read = self.sensor.read();
        let intent = self.intents.process(
            &read,
            self.clock.now_ms(),
            self.ramp.is_on(),
            self.ramp.last_brightness(),
        );

        match intent {
            Some(LampIntent::Toggle) => {
                #[cfg(feature = "esp32-log")]
                println!("[Lamp.poll] toggle, lamp on: {:?}", self.ramp.is_on());
                self.ramp.toggle();
            }
            Some(LampIntent::SetBrightness(brightness)) => self.ramp.set(brightness),
            None => {}
        }

        PollResult { read, intent }
    }

    /// Get a reference to the touch sensor
    pub fn sensor(&self) -> &TouchSensor<'a, A, C> {
        &self.sensor
    }

    /// Get a reference to the brightness controller
    pub fn ramp(&self) -> &BrightnessRamp<'a, O, C, N> {
        &self.ramp
    }

    /// Get a mutable reference to the brightness controller
    pub fn ramp_mut(&mut self) -> &mut BrightnessRamp<'a, O, C, N> {
        &mut self.ramp
    }
}
