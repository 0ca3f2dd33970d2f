//! Intent processing module
//!
//! Turns debounced touch reads into lamp intents: a short tap toggles the
//! lamp, a long hold steps the brightness up or down until released.

use embassy_time::Duration;

use crate::clock::{duration_ms, elapsed_ms};
use crate::touch::{Edge, TouchRead};

/// Configuration for gesture interpretation and the lamp start-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LampConfig {
    /// Hold time after which a press dims instead of toggling
    pub long_press: Duration,
    /// Step delay while dimming up under the finger
    pub touch_rampup_delay: Duration,
    /// Step delay while dimming down under the finger
    pub touch_rampdown_delay: Duration,
    /// Brightness index set at power-up
    pub power_on_brightness: u8,
    /// Blink once at full on before settling at the power-on brightness
    pub blink_on_power_up: bool,
}

impl Default for LampConfig {
    fn default() -> Self {
        Self {
            long_press: Duration::from_millis(250),
            touch_rampup_delay: Duration::from_millis(15),
            touch_rampdown_delay: Duration::from_millis(15),
            power_on_brightness: 255,
            blink_on_power_up: false,
        }
    }
}

/// What the lamp should do after a touch read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LampIntent {
    /// Switch off if on, on otherwise
    Toggle,
    /// Set the brightness index directly
    SetBrightness(u8),
}

/// Tap/hold gesture state machine
///
/// Dimming bounces: it runs up to 255, then turns around and runs down to
/// 0, and so on, for as long as the finger stays on the sensor. The
/// direction is kept between holds.
#[derive(Debug, Clone)]
pub struct IntentProcessor {
    long_press_ms: u32,
    rampup_delay_ms: u32,
    rampdown_delay_ms: u32,

    dimming: bool,
    dim_up: bool,
    last_step_ms: u32,
}

impl IntentProcessor {
    /// Create a processor; `brightness` is the level the lamp starts at
    pub fn new(config: &LampConfig, brightness: u8) -> Self {
        Self {
            long_press_ms: duration_ms(config.long_press),
            rampup_delay_ms: duration_ms(config.touch_rampup_delay),
            rampdown_delay_ms: duration_ms(config.touch_rampdown_delay),
            dimming: false,
            dim_up: brightness != u8::MAX,
            last_step_ms: 0,
        }
    }

    /// Whether a hold-to-dim sequence is in progress
    pub const fn is_dimming(&self) -> bool {
        self.dimming
    }

    /// Interpret one read
    ///
    /// `is_on` and `brightness` describe the lamp before the read; `now` is
    /// the current tick count.
    pub fn process(
        &mut self,
        read: &TouchRead,
        now: u32,
        is_on: bool,
        brightness: u8,
    ) -> Option<LampIntent> {
        if read.edge == Edge::Falling {
            let was_dimming = self.dimming;
            self.dimming = false;
            if !was_dimming {
                return Some(LampIntent::Toggle);
            }
        }

        // On an edge the duration belongs to the state that just ended
        let held = self.dimming
            || (read.edge == Edge::Unchanged
                && read.previous_state_duration_ms >= self.long_press_ms);
        if !(is_on && read.pressed && held) {
            return None;
        }

        let delay_ms = if self.dim_up {
            self.rampup_delay_ms
        } else {
            self.rampdown_delay_ms
        };
        if elapsed_ms(now, self.last_step_ms) < delay_ms {
            return None;
        }

        self.dimming = true;
        self.last_step_ms = now;
        Some(LampIntent::SetBrightness(self.next_brightness(brightness)))
    }

    fn next_brightness(&mut self, brightness: u8) -> u8 {
        if self.dim_up {
            let next = brightness.saturating_add(1);
            if next == u8::MAX {
                self.dim_up = false;
            }
            next
        } else {
            let next = brightness.saturating_sub(1);
            if next == 0 {
                self.dim_up = true;
            }
            next
        }
    }
}
