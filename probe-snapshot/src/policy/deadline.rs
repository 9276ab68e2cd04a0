//! Cooperative capture deadline.

use std::time::{Duration, Instant};

/// An optional absolute cutoff for one capture.
///
/// The serializer compares the current time against the cutoff before each
/// value; it cannot interrupt a call already running inside an inspected value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Deadline {
    cutoff: Option<Instant>,
}

impl Deadline {
    /// A deadline that never expires.
    pub const fn never() -> Self {
        Self { cutoff: None }
    }

    pub const fn at(cutoff: Instant) -> Self {
        Self {
            cutoff: Some(cutoff),
        }
    }

    /// A deadline `timeout` from now. Overflowing timeouts never expire.
    pub fn after(timeout: Duration) -> Self {
        Self {
            cutoff: Instant::now().checked_add(timeout),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.cutoff.is_some_and(|cutoff| now >= cutoff)
    }

    pub const fn cutoff(&self) -> Option<Instant> {
        self.cutoff
    }
}
