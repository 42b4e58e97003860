use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

/* 📖 # How are record ids assigned?

Ids are milliseconds since the epoch, like the timestamps a browser client would
generate. Two submissions within the same millisecond must still get distinct ids, so
the generator hands out `max(now_ms, last + 1)`: ids track the clock while it moves
forward and stay strictly increasing when it does not (or when it jumps backwards).
*/

/// Unique identifier of a stored lead or contact message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out time-derived, strictly increasing record ids. Safe to share between threads.
#[derive(Debug, Default)]
pub struct RecordIdGenerator {
    last: AtomicU64,
}

impl RecordIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self, now: DateTime<Utc>) -> RecordId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = millis.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return RecordId(candidate),
                Err(actual) => last = actual,
            }
        }
    }
}
