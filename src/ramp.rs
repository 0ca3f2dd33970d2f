//! Brightness ramp controller
//!
//! Drives a set of duty-cycle outputs in lockstep and moves them between
//! brightness levels along the perceptual table. Every transition blocks the
//! caller until it has finished: the touch sensor is not polled while a ramp
//! is in flight, and there is no way to cancel one.
//!
//! Transitions:
//! - linear ramp along the table, one index per step delay
//! - dim-on flash: a jump to a visible level before fading to a very dim
//!   target, so switching on from dark is never invisible
//! - exponential settle towards the electrical off value after the turn-off
//!   ramp, hiding the coarse tail of the table

use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::DutyOutput;
use crate::clock::{Clock, duration_ms, elapsed_ms};
use crate::error::ConfigError;
use crate::lut::BrightnessTable;

/// How long the dim-on flash is held before fading to the target
pub const DIM_ON_FLASH_HOLD_MS: u32 = 50;

/// Step delay of the power-on fade
pub const POWER_ON_STEP_DELAY: Duration = Duration::from_millis(2);

/// Index the turn-off ramp stops at before the exponential settle
pub const OFF_RAMP_FLOOR: u8 = 10;

/// The off settle stops once outputs are this close to the off duty
pub const OFF_SETTLE_TOLERANCE: u16 = 10;

/// Poll interval of the step busy-wait
const STEP_POLL_MS: u32 = 1;

/// Brightness assumed before anything has been commanded
const INITIAL_BRIGHTNESS: u8 = 255;

/// Configuration for the brightness controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RampConfig {
    /// Lowest index that is reliably visible when switching on from dark
    pub min_dim_on: u8,
    /// Time off after which the lamp counts as fully dark again
    pub min_off_period: Duration,
    /// Default step delay when ramping up
    pub rampup_delay: Duration,
    /// Default step delay when ramping down
    pub rampdown_delay: Duration,
    /// Step delay of the turn-off ramp and settle
    pub turn_off_delay: Duration,
    /// Duty value that switches the outputs fully off
    pub off_duty: u16,
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            min_dim_on: 150,
            min_off_period: Duration::from_millis(250),
            rampup_delay: Duration::from_millis(7),
            rampdown_delay: Duration::from_millis(7),
            turn_off_delay: Duration::from_millis(3),
            off_duty: 16383,
        }
    }
}

/// Brightness controller for `N` outputs driven in unison
pub struct BrightnessRamp<'a, O: DutyOutput, C: Clock, const N: usize> {
    // External dependencies and configuration
    outputs: [O; N],
    clock: C,
    table: &'a BrightnessTable,
    min_dim_on: u8,
    min_off_period_ms: u32,
    rampup_delay_ms: u32,
    rampdown_delay_ms: u32,
    turn_off_delay_ms: u32,
    off_duty: u16,

    // Internal state
    is_on: bool,
    last_brightness: u8,
    last_on_ms: u32,
    duty: u16,
}

impl<'a, O: DutyOutput, C: Clock, const N: usize> BrightnessRamp<'a, O, C, N> {
    /// Create a controller in the off state
    ///
    /// Outputs are not written until the first transition.
    pub fn new(
        outputs: [O; N],
        clock: C,
        table: &'a BrightnessTable,
        config: &RampConfig,
    ) -> Result<Self, ConfigError> {
        if N == 0 {
            return Err(ConfigError::NoOutputs);
        }
        let last_on_ms = clock.now_ms();
        Ok(Self {
            outputs,
            clock,
            table,
            min_dim_on: config.min_dim_on,
            min_off_period_ms: duration_ms(config.min_off_period),
            rampup_delay_ms: duration_ms(config.rampup_delay),
            rampdown_delay_ms: duration_ms(config.rampdown_delay),
            turn_off_delay_ms: duration_ms(config.turn_off_delay),
            off_duty: config.off_duty,
            is_on: false,
            last_brightness: INITIAL_BRIGHTNESS,
            last_on_ms,
            duty: config.off_duty,
        })
    }

    /// Whether the lamp is logically on
    pub const fn is_on(&self) -> bool {
        self.is_on
    }

    /// Last commanded brightness index, kept across off/on cycles
    pub const fn last_brightness(&self) -> u8 {
        self.last_brightness
    }

    /// Duty value last written to every output
    pub const fn duty(&self) -> u16 {
        self.duty
    }

    /// Walk the table from `start` to `end`, one index per step
    ///
    /// `speed` overrides the step delay; without it the configured
    /// rampup/rampdown delay is used depending on direction. Blocks until
    /// `end` has been written.
    pub fn ramp(&mut self, start: u8, end: u8, speed: Option<Duration>) {
        let default_ms = if start < end {
            self.rampup_delay_ms
        } else {
            self.rampdown_delay_ms
        };
        self.step_through(start, end, speed.map_or(default_ms, duration_ms));
    }

    /// Switch on at `target`
    ///
    /// A very dim target after the lamp has been dark for longer than the
    /// minimum off period first flashes to `min_dim_on` and fades down from
    /// there. Otherwise the target is written directly.
    pub fn set(&mut self, target: u8) {
        let dark_ms = elapsed_ms(self.clock.now_ms(), self.last_on_ms);
        if !self.is_on && target < self.min_dim_on && dark_ms > self.min_off_period_ms {
            #[cfg(feature = "esp32-log")]
            println!(
                "[BrightnessRamp.set] dim-on flash at {:?} before {:?}",
                self.min_dim_on, target
            );
            self.write_index(self.min_dim_on);
            self.clock.delay_ms(DIM_ON_FLASH_HOLD_MS);
            self.ramp(self.min_dim_on, target, None);
        } else {
            self.write_index(target);
        }

        self.last_brightness = target;
        self.is_on = true;
        self.last_on_ms = self.clock.now_ms();
    }

    /// Fade on from `min_dim_on` to the last brightness
    pub fn on(&mut self) {
        self.step_through(
            self.min_dim_on,
            self.last_brightness,
            duration_ms(POWER_ON_STEP_DELAY),
        );
        self.is_on = true;
        self.last_on_ms = self.clock.now_ms();
    }

    /// Fade off, then settle exponentially onto the off duty
    ///
    /// The last brightness is kept so [`on`](Self::on) resumes there.
    pub fn off(&mut self) {
        self.step_through(self.last_brightness, OFF_RAMP_FLOOR, self.turn_off_delay_ms);

        // Halving the gap each step; a gap above the tolerance always shrinks
        let target = i32::from(self.off_duty);
        let mut gap = target - i32::from(self.duty);
        while gap.unsigned_abs() > u32::from(OFF_SETTLE_TOLERANCE) {
            self.write_duty(add_signed(self.duty, gap / 2));
            self.clock.delay_ms(self.turn_off_delay_ms);
            gap = target - i32::from(self.duty);
        }

        #[cfg(feature = "esp32-log")]
        println!("[BrightnessRamp.off] settled at {:?}", self.duty);

        self.is_on = false;
        self.last_on_ms = self.clock.now_ms();
    }

    /// Switch off if on, on otherwise
    pub fn toggle(&mut self) {
        if self.is_on {
            self.off();
        } else {
            self.on();
        }
    }

    /// Release the output handles
    pub fn free(self) -> [O; N] {
        self.outputs
    }

    /// Busy-wait walk from `start` to `end` with `delay_ms` between steps
    fn step_through(&mut self, start: u8, end: u8, delay_ms: u32) {
        let mut index = start;
        self.write_index(index);
        if start == end {
            return;
        }

        let rising = start < end;
        let mut last_step = self.clock.now_ms();
        while index != end {
            let now = self.clock.now_ms();
            if elapsed_ms(now, last_step) >= delay_ms {
                last_step = now;
                index = if rising {
                    index.wrapping_add(1)
                } else {
                    index.wrapping_sub(1)
                };
                self.write_index(index);
            }
            self.clock.delay_ms(STEP_POLL_MS);
        }
    }

    fn write_index(&mut self, index: u8) {
        self.write_duty(self.table.duty(index));
    }

    fn write_duty(&mut self, duty: u16) {
        self.duty = duty;
        for output in &mut self.outputs {
            output.set_duty(duty);
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn add_signed(duty: u16, delta: i32) -> u16 {
    (i32::from(duty) + delta).clamp(0, i32::from(u16::MAX)) as u16
}
