//! Live clock adapter using the system clock.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Live clock backed by the system time.
///
/// Its UTC date decides which `data/<date>.json` snapshot a fetch writes
/// and which week a digest covers.
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
