//! Injectable time source for TTL bookkeeping.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Time source used by the in-memory cache to evaluate entry expiry.
///
/// Production code uses [`SystemClock`]; tests can inject a
/// [`ManualClock`] and advance it by hand instead of sleeping through
/// real TTLs.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// Clock backed by the system's monotonic time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually-advanced clock for deterministic expiry tests.
///
/// Clones share the same offset, so a clock handed to a cache can be
/// advanced from the test body.
#[derive(Clone)]
pub struct ManualClock {
    start: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl ManualClock {
    /// Creates a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Advances the clock by `duration`.
    pub fn advance(&self, duration: Duration) {
        let mut offset = self.offset.lock().unwrap();
        *offset += duration;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap()
    }
}
