//! Monotonic millisecond time source.
//!
//! Both the touch sensor and the brightness ramp read time through the
//! [`Clock`] trait. The counter is a free-running `u32` that wraps silently,
//! so every duration is computed with [`elapsed_ms`].

use embassy_time::{Duration, Instant, block_for};

/// Free-running millisecond counter with a blocking delay
///
/// Implementations take `&self` so one clock can be shared by every
/// component in the lamp.
pub trait Clock {
    /// Current tick count in milliseconds. Wraps at `u32::MAX`.
    fn now_ms(&self) -> u32;

    /// Block the calling thread for at least `ms` milliseconds
    fn delay_ms(&self, ms: u32);
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }

    fn delay_ms(&self, ms: u32) {
        (**self).delay_ms(ms);
    }
}

/// Clock backed by the `embassy-time` driver of the target
///
/// Delays busy-wait with [`block_for`], which keeps ramps deterministic on
/// platforms without a scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now_ms(&self) -> u32 {
        // Truncation gives the wrapping counter semantics
        Instant::now().as_millis() as u32
    }

    fn delay_ms(&self, ms: u32) {
        block_for(Duration::from_millis(u64::from(ms)));
    }
}

/// Milliseconds from `since` to `now`, correct across counter overflow
#[inline]
pub const fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Convert a configured duration to whole milliseconds, saturating
#[inline]
pub fn duration_ms(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}
