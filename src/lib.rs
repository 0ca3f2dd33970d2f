//! Control core of a touch-activated dimmable lamp.
//!
//! Two independent components:
//! - [`TouchSensor`] turns a noisy capacitive reading into a debounced
//!   pressed state with edges and hold durations.
//! - [`BrightnessRamp`] moves one or more duty-cycle outputs between
//!   perceptually linear brightness levels.
//!
//! [`Lamp`] wires them together into the tap-to-toggle, hold-to-dim loop.
#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod error;
pub mod intent_processor;
pub mod lamp;
pub mod lut;
pub mod output;
pub mod ramp;
pub mod touch;

pub use clock::{Clock, EmbassyClock};
pub use error::ConfigError;
pub use intent_processor::{IntentProcessor, LampConfig, LampIntent};
pub use lamp::{Lamp, PollResult};
pub use lut::{BrightnessTable, DEFAULT_BRIGHTNESS_STEPS};
pub use output::PwmChannel;
pub use ramp::{BrightnessRamp, RampConfig};
pub use touch::{Edge, TouchAdc, TouchConfig, TouchRead, TouchSensor, TouchSubsystem};

pub use embassy_time::Duration;

/// Write-only duty-cycle sink
///
/// Implement this trait to support different hardware platforms.
/// The brightness controller is generic over this trait. Writes take effect
/// on the next PWM period and are never acknowledged.
pub trait DutyOutput {
    /// Write a raw duty value
    fn set_duty(&mut self, duty: u16);
}
