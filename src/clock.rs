/*!
Millisecond time source for the game loop.

Purpose
- The race window is a busy-polled deadline: the engine reads `now_ms()` in a
  tight loop until either the response appears or the window has elapsed.
- The match loop also needs plain blocking delays (indicator sweep, settle
  delay after a win), exposed as `sleep_ms`.

Implementations
- `SystemClock`: wall clock backed by `std::time::Instant`.
- Tests use a deterministic manual clock (see `crate::test_utils`).
*/

use std::time::{Duration, Instant};

/// Monotonic millisecond clock plus a blocking delay.
pub trait Clock {
    /// Milliseconds elapsed since an arbitrary, fixed epoch. Never decreases.
    fn now_ms(&self) -> u64;

    /// Block the caller for `ms` milliseconds.
    fn sleep_ms(&mut self, ms: u64);
}

impl<C: Clock + ?Sized> Clock for &mut C {
    #[inline]
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    #[inline]
    fn sleep_ms(&mut self, ms: u64) {
        (**self).sleep_ms(ms)
    }
}

/// Wall clock measured from the moment it was created.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    epoch: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn sleep_ms(&mut self, ms: u64) {
        if ms > 0 {
            std::thread::sleep(Duration::from_millis(ms));
        }
    }
}
