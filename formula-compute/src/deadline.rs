//! Time limits for comparisons, checked cooperatively by the simplifier and the similarity
//! pipeline.

use crate::error::{kind::Timeout, Error};
use std::time::{Duration, Instant};

/// A per-comparison time limit. It is checked between pipeline stages, after every rewrite the
/// simplifier makes, and inside the common subexpression search.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    /// Starts a deadline that expires `limit` from now. `None` never expires.
    pub fn new(limit: Option<Duration>) -> Self {
        Self { start: Instant::now(), limit }
    }

    /// A deadline that never expires.
    pub fn none() -> Self {
        Self::new(None)
    }

    /// Returns a [`Timeout`] error naming `stage` if the deadline has passed.
    pub fn check(&self, stage: &'static str) -> Result<(), Error> {
        match self.limit {
            Some(limit) if self.start.elapsed() >= limit => {
                Err(Error::spanless(Timeout { stage, limit }))
            },
            _ => Ok(()),
        }
    }
}
