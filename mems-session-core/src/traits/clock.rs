use std::time::Instant;

use chrono::{DateTime, Utc};

/// Time source for the session engine.
///
/// `monotonic` drives stage scheduling; `wall` stamps samples and ledger
/// entries.
pub trait Clock: Send + Sync {
    fn monotonic(&self) -> Instant;

    fn wall(&self) -> DateTime<Utc>;
}

/// Clock backed by `Instant::now` and `Utc::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn monotonic(&self) -> Instant {
        Instant::now()
    }

    fn wall(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
