//! Logical timestamp type.
//!
//! Timestamps are plain seconds on a monotonic logical clock supplied by the
//! caller. The core never reads the wall clock; all timelock logic is a pure
//! function of a supplied `now` plus stored timestamps.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the logical clock, in whole seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed since this timestamp (relative to `now`).
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// Whether this timestamp + duration has passed relative to `now`.
    pub fn has_expired(&self, duration_secs: u64, now: Timestamp) -> bool {
        now.0 >= self.0.saturating_add(duration_secs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_saturates_below_zero() {
        let t = Timestamp::new(100);
        assert_eq!(t.elapsed_since(Timestamp::new(40)), 0);
        assert_eq!(t.elapsed_since(Timestamp::new(140)), 40);
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let t = Timestamp::new(100);
        assert!(!t.has_expired(50, Timestamp::new(149)));
        assert!(t.has_expired(50, Timestamp::new(150)));
    }
}
