//! Duty-cycle output adapters
//!
//! The brightness controller writes through [`DutyOutput`] handles and never
//! owns the hardware behind them.

use core::cell::Cell;

use embedded_hal::pwm::SetDutyCycle;

use crate::DutyOutput;

/// Shared compare register, e.g. a timer channel mapped into a `Cell`
impl DutyOutput for &Cell<u16> {
    fn set_duty(&mut self, duty: u16) {
        self.set(duty);
    }
}

impl<T: DutyOutput + ?Sized> DutyOutput for &mut T {
    fn set_duty(&mut self, duty: u16) {
        (**self).set_duty(duty);
    }
}

/// Adapter for any `embedded-hal` PWM channel
///
/// The duty written is the raw compare value, so the brightness table must
/// be expressed in the channel's `max_duty_cycle()` scale. Write errors are
/// dropped: outputs are fire-and-forget and reporting a failed write is the
/// HAL's job.
#[derive(Debug)]
pub struct PwmChannel<P> {
    channel: P,
}

impl<P: SetDutyCycle> PwmChannel<P> {
    /// Wrap a PWM channel
    pub const fn new(channel: P) -> Self {
        Self { channel }
    }

    /// Maximum duty value accepted by the wrapped channel
    pub fn max_duty(&self) -> u16 {
        self.channel.max_duty_cycle()
    }

    /// Release the wrapped channel
    pub fn into_inner(self) -> P {
        self.channel
    }
}

impl<P: SetDutyCycle> DutyOutput for PwmChannel<P> {
    fn set_duty(&mut self, duty: u16) {
        let _ = self.channel.set_duty_cycle(duty);
    }
}
