//! Injected time source for store-assigned timestamps.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

/// Supplies "now" to anything that stamps records.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
  fn now(&self) -> DateTime<Utc> { (**self).now() }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> { Utc::now() }
}

/// A deterministic clock for tests.
///
/// Every call to [`Clock::now`] returns the current instant and then advances
/// it by `step`, so successive writes get strictly increasing timestamps.
#[derive(Debug)]
pub struct ManualClock {
  current: Mutex<DateTime<Utc>>,
  step:    Duration,
}

impl ManualClock {
  pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
    Self { current: Mutex::new(start), step }
  }

  /// A clock that never advances on its own.
  pub fn frozen(at: DateTime<Utc>) -> Self { Self::new(at, Duration::zero()) }

  /// Move the clock to `at`.
  pub fn set(&self, at: DateTime<Utc>) {
    *self.current.lock().unwrap_or_else(|e| e.into_inner()) = at;
  }
}

impl Clock for ManualClock {
  fn now(&self) -> DateTime<Utc> {
    let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
    let now = *current;
    *current = now + self.step;
    now
  }
}
