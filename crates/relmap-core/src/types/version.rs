//! Version seed and increment strategies for optimistic-concurrency columns

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::value::Value;
use crate::errors::Result;

/// Source of wall-clock time for timestamp versions
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// What a version strategy may consult while producing a value
#[derive(Debug, Clone)]
pub struct VersionContext {
    clock: Arc<dyn Clock>,
}

impl VersionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

impl Default for VersionContext {
    fn default() -> Self {
        Self {
            clock: Arc::new(SystemClock),
        }
    }
}

/// Seed and successor values for a version column
///
/// `Ok(None)` from either method means the storage engine owns the value
/// and nothing must be written.
pub trait VersionType: Send + Sync {
    /// Version for a newly inserted row
    ///
    /// # Errors
    ///
    /// Implementations fail only when the seed cannot be represented.
    fn seed(&self, ctx: &VersionContext) -> Result<Option<Value>>;

    /// Version to write on update
    ///
    /// # Errors
    ///
    /// `InvalidVersionValue` when `current` cannot be advanced.
    fn next(&self, current: Option<&Value>, ctx: &VersionContext) -> Result<Option<Value>>;

    fn compare(&self, a: &Value, b: &Value) -> Option<Ordering>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_context() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let ctx = VersionContext::with_clock(Arc::new(FixedClock(instant)));
        assert_eq!(ctx.now(), instant);
    }

    #[test]
    fn test_default_context_uses_system_clock() {
        let before = Utc::now();
        let now = VersionContext::default().now();
        assert!(now >= before);
    }
}
