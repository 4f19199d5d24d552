//! Time sources for request timestamps

use chrono::Utc;
use std::fmt::Debug;

/// Source of the unix timestamp put into each signed request
pub trait Clock: Send + Sync + Debug {
    /// Current time in whole unix seconds
    fn now_unix(&self) -> i64;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Always returns the same timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0
    }
}
