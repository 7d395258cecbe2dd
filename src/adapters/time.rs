//! Monotonic clock adapter.
//!
//! Implements [`ClockPort`] for the game core.
//!
//! - **`target_os = "espidf"`** — uptime from `esp_timer_get_time()` (the
//!   ESP-IDF high-resolution monotonic timer).
//! - **all other targets** — `std::time::Instant`.
//!
//! Sleeps go through `std::thread::sleep` on both targets; under ESP-IDF
//! that is a FreeRTOS delay, which is exactly what the blocking game flow
//! wants.

use core::time::Duration;

use crate::app::ports::ClockPort;

pub struct MonotonicClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl ClockPort for MonotonicClock {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }

    #[cfg(target_os = "espidf")]
    fn uptime_ms(&self) -> u64 {
        // SAFETY: esp_timer_get_time has no preconditions after boot.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    #[cfg(not(target_os = "espidf"))]
    fn uptime_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
