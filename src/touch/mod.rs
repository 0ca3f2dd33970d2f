//! Debounced capacitive touch sensor with adaptive baseline
//!
//! Each [`TouchSensor::read`] takes one oversampled reading and compares it
//! against the idle baseline. A reading more than 0.5% above the baseline
//! counts as triggered. The debounced state flips only when the whole
//! hysteresis window agrees.
//!
//! The baseline follows slow drift (temperature, humidity) with an
//! exponential moving average, but only after the sensor has been released
//! and untriggered for `settle_iterations` samples. A press held for 30 s is
//! treated as a sensing fault: it is force-released and the baseline is
//! fully recalibrated.

mod subsystem;
mod window;

pub use subsystem::{TouchAdc, TouchSubsystem};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::clock::{Clock, elapsed_ms};
use crate::error::ConfigError;
use window::TriggerWindow;

/// A press held this long is force-released
pub const STUCK_PRESS_TIMEOUT_MS: u32 = 30_000;

/// Trigger threshold as a ratio of the baseline (201/200 = +0.5%)
const TRIGGER_NUMERATOR: u64 = 201;
const TRIGGER_DENOMINATOR: u64 = 200;

/// Configuration for a touch sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchConfig {
    /// Acquisitions accumulated per reading. Higher is more accurate but
    /// slower to respond.
    pub oversample_iterations: u16,
    /// Readings averaged for the idle baseline; also the EMA weight of the
    /// drift tracking
    pub calibration_samples: u16,
    /// Samples that must agree before the state flips, `1..=32`
    pub window_size: u8,
    /// Released, untriggered samples required before the baseline adapts
    pub settle_iterations: u16,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            oversample_iterations: 3000,
            calibration_samples: 25,
            window_size: 3,
            settle_iterations: 1000,
        }
    }
}

impl TouchConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 || self.window_size > 32 {
            return Err(ConfigError::WindowSize(self.window_size));
        }
        if self.calibration_samples == 0 {
            return Err(ConfigError::ZeroCalibrationSamples);
        }
        if self.oversample_iterations == 0 {
            return Err(ConfigError::ZeroOversampling);
        }
        Ok(())
    }
}

/// Debounced state change reported by a read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// State did not change
    Unchanged,
    /// Released to pressed
    Rising,
    /// Pressed to released
    Falling,
}

/// Result of one [`TouchSensor::read`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchRead {
    /// Debounced transition caused by this read
    pub edge: Edge,
    /// Debounced state after this read
    pub pressed: bool,
    /// How long the state before this read had been held, in milliseconds
    pub previous_state_duration_ms: u32,
}

/// Touch input bound to one pin of a [`TouchSubsystem`]
pub struct TouchSensor<'a, A: TouchAdc, C: Clock> {
    // External dependencies and configuration
    subsystem: &'a TouchSubsystem<A>,
    pin: A::Pin,
    clock: C,
    oversample_iterations: u16,
    calibration_samples: u16,
    settle_iterations: u16,

    // Internal state
    idle_baseline: u32,
    window: TriggerWindow,
    pressed: bool,
    state_change_ms: u32,
    ticks_since_last_trigger: u16,
    recalibration_owed: bool,
}

impl<'a, A: TouchAdc, C: Clock> TouchSensor<'a, A, C> {
    /// Bind a sensor to `pin`
    ///
    /// The sensor starts released with a zero baseline; call
    /// [`initialize`](Self::initialize) before the first read.
    pub fn new(
        subsystem: &'a TouchSubsystem<A>,
        pin: A::Pin,
        clock: C,
        config: &TouchConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let state_change_ms = clock.now_ms();
        Ok(Self {
            subsystem,
            pin,
            clock,
            oversample_iterations: config.oversample_iterations,
            calibration_samples: config.calibration_samples,
            settle_iterations: config.settle_iterations,
            idle_baseline: 0,
            window: TriggerWindow::new(config.window_size),
            pressed: false,
            state_change_ms,
            ticks_since_last_trigger: 0,
            recalibration_owed: false,
        })
    }

    /// Calibrate the idle baseline and reset to released
    pub fn initialize(&mut self) {
        self.calibrate();
        self.pressed = false;
        self.window.clear();
    }

    /// Debounced pressed state
    pub const fn pressed(&self) -> bool {
        self.pressed
    }

    /// Current estimate of the untouched reading
    pub const fn baseline(&self) -> u32 {
        self.idle_baseline
    }

    /// Sample once and advance the debounce state machine
    pub fn read(&mut self) -> TouchRead {
        let reading = self.sample();
        let now = self.clock.now_ms();

        self.window.push(u64::from(reading) > self.trigger_threshold());

        let was_pressed = self.pressed;
        let previous_state_duration_ms = elapsed_ms(now, self.state_change_ms);

        let mut pressed = was_pressed;
        if was_pressed {
            if previous_state_duration_ms >= STUCK_PRESS_TIMEOUT_MS {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[TouchSensor.read] press held for {:?} ms, forcing release",
                    previous_state_duration_ms
                );
                self.window.clear();
                self.recalibration_owed = true;
                self.ticks_since_last_trigger = self.settle_iterations;
            }
            if self.window.all_clear() {
                pressed = false;
                self.state_change_ms = now;
            }
        } else if self.window.all_set() {
            pressed = true;
            self.state_change_ms = now;
        }

        if pressed {
            self.ticks_since_last_trigger = 0;
        } else {
            self.track_drift(reading);
        }

        let edge = match (was_pressed, pressed) {
            (false, true) => Edge::Rising,
            (true, false) => Edge::Falling,
            _ => Edge::Unchanged,
        };
        self.pressed = pressed;

        TouchRead {
            edge,
            pressed,
            previous_state_duration_ms,
        }
    }

    /// Baseline adaptation while released
    fn track_drift(&mut self, reading: u32) {
        self.ticks_since_last_trigger = self.ticks_since_last_trigger.saturating_add(1);
        if self.ticks_since_last_trigger < self.settle_iterations {
            return;
        }

        if self.recalibration_owed {
            self.recalibration_owed = false;
            self.calibrate();
        } else {
            let weight = u64::from(self.calibration_samples);
            let nudged =
                (u64::from(self.idle_baseline) * (weight - 1) + u64::from(reading)) / weight;
            self.idle_baseline = saturate_u32(nudged);
        }
    }

    fn calibrate(&mut self) {
        let total: u64 = (0..self.calibration_samples)
            .map(|_| u64::from(self.sample()))
            .sum();
        self.idle_baseline = saturate_u32(total / u64::from(self.calibration_samples));

        #[cfg(feature = "esp32-log")]
        println!("[TouchSensor.calibrate] idle baseline {:?}", self.idle_baseline);
    }

    fn trigger_threshold(&self) -> u64 {
        u64::from(self.idle_baseline) * TRIGGER_NUMERATOR / TRIGGER_DENOMINATOR
    }

    fn sample(&self) -> u32 {
        self.subsystem.sample(self.pin, self.oversample_iterations)
    }
}

fn saturate_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
