use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/* 📖 # Why inject the clock?

Records carry timestamps and ids derived from the current time, and email bodies embed
dates. Reading the time through a trait lets tests pin "now" and compare full JSON
responses and email bodies against snapshots.
*/

/// Source of the current time.
pub trait Clock: std::fmt::Debug + Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given instant until advanced manually. Clones share the instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_advances() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap());
        let shared = clock.clone();
        clock.advance(Duration::seconds(90));
        assert_eq!(
            shared.now(),
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 31, 30).unwrap()
        );
    }
}
