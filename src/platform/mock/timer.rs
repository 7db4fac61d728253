//! Mock Timer implementation for testing

use crate::platform::{traits::TimerInterface, Result};

/// Mock Timer implementation
///
/// Keeps a simulated clock that only advances through `delay_us`/`delay_ms`,
/// so tests control elapsed time exactly.
#[derive(Debug)]
pub struct MockTimer {
    now_us: u64,
}

impl MockTimer {
    /// Create a new mock timer starting at zero
    pub fn new() -> Self {
        Self { now_us: 0 }
    }
}

impl Default for MockTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerInterface for MockTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        self.now_us = self.now_us.wrapping_add(us as u64);
        Ok(())
    }

    fn now_us(&self) -> u64 {
        self.now_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_timer_advances_on_delay() {
        let mut timer = MockTimer::new();
        assert_eq!(timer.now_us(), 0);

        timer.delay_us(1000).unwrap();
        assert_eq!(timer.now_us(), 1000);

        timer.delay_ms(5).unwrap();
        assert_eq!(timer.now_us(), 6000);
    }

    #[test]
    fn test_mock_timer_now_ms_truncates() {
        let mut timer = MockTimer::new();
        timer.delay_us(3500).unwrap();
        assert_eq!(timer.now_ms(), 3);
    }
}
