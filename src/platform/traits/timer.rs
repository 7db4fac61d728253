//! Monotonic timer trait

use crate::platform::Result;

/// Timer interface trait
///
/// Provides a monotonic clock and blocking delays. The acquisition component
/// uses [`now_ms`](TimerInterface::now_ms) to throttle reads to the
/// configured interval; it never sleeps on its own.
pub trait TimerInterface {
    /// Block for the given number of microseconds
    fn delay_us(&mut self, us: u32) -> Result<()>;

    /// Block for the given number of milliseconds
    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.delay_us(ms.saturating_mul(1000))
    }

    /// Microseconds since an arbitrary platform epoch, monotonic
    fn now_us(&self) -> u64;

    /// Milliseconds since an arbitrary platform epoch, monotonic
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}
