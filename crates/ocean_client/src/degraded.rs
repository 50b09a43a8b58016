//! Partial-failure reporting for aggregate reads
//!
//! An aggregate is assembled from several independent contract calls. A
//! failing sub-call defaults its field instead of failing the aggregate, and
//! the failure is recorded so callers can tell "zero" from "zero because the
//! fetch failed".

use log::warn;
use serde::Serialize;

use crate::error::{OceanError, Result};

/// One failed sub-call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubCallError {
    pub source: String,
    pub message: String,
}

/// Aggregate value plus its degradation report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fetched<T> {
    pub value: T,
    /// At least one field was defaulted because its sub-call failed
    pub degraded: bool,
    /// The aggregate view failed and legacy contracts were used instead
    pub used_fallback: bool,
    pub errors: Vec<SubCallError>,
}

impl<T> Fetched<T> {
    pub fn complete(value: T) -> Self {
        Self { value, degraded: false, used_fallback: false, errors: Vec::new() }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        Fetched {
            value: f(self.value),
            degraded: self.degraded,
            used_fallback: self.used_fallback,
            errors: self.errors,
        }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Collects sub-call failures while an aggregate is being assembled
#[derive(Debug, Default)]
pub struct Partial {
    degraded: bool,
    used_fallback: bool,
    errors: Vec<SubCallError>,
}

impl Partial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unwrap a sub-call result, defaulting the field on failure
    pub fn take<T: Default>(&mut self, source: &str, result: Result<T>) -> T {
        self.take_or(source, result, T::default())
    }

    pub fn take_or<T>(&mut self, source: &str, result: Result<T>, default: T) -> T {
        match result {
            Ok(value) => value,
            Err(err) => {
                self.record(source, &err);
                self.degraded = true;
                default
            }
        }
    }

    /// Unwrap an aggregate view result; a failure switches to the fallback
    /// path without marking the aggregate degraded
    pub fn primary<T>(&mut self, source: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.record(source, &err);
                self.used_fallback = true;
                None
            }
        }
    }

    /// Merge the report of a nested aggregate
    pub fn absorb<T>(&mut self, fetched: Fetched<T>) -> T {
        self.degraded |= fetched.degraded;
        self.used_fallback |= fetched.used_fallback;
        self.errors.extend(fetched.errors);
        fetched.value
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn finish<T>(self, value: T) -> Fetched<T> {
        Fetched {
            value,
            degraded: self.degraded,
            used_fallback: self.used_fallback,
            errors: self.errors,
        }
    }

    fn record(&mut self, source: &str, err: &OceanError) {
        warn!("{} failed, defaulting: {}", source, err);
        self.errors.push(SubCallError { source: source.to_string(), message: err.to_string() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_defaults_and_marks_degraded() {
        let mut partial = Partial::new();
        let ok: u64 = partial.take("a", Ok(7));
        let failed: u64 = partial.take("b", Err(OceanError::rpc("b", "execution reverted")));
        assert_eq!((ok, failed), (7, 0));

        let fetched = partial.finish(ok + failed);
        assert!(fetched.degraded);
        assert!(!fetched.used_fallback);
        assert_eq!(fetched.errors.len(), 1);
        assert_eq!(fetched.errors[0].source, "b");
    }

    #[test]
    fn test_primary_failure_is_not_degradation() {
        let mut partial = Partial::new();
        let view: Option<u64> = partial.primary("view", Err(OceanError::rpc("view", "revert")));
        assert!(view.is_none());

        let fetched = partial.finish(());
        assert!(!fetched.degraded);
        assert!(fetched.used_fallback);
        assert_eq!(fetched.errors.len(), 1);
    }

    #[test]
    fn test_absorb_merges_reports() {
        let mut inner = Partial::new();
        let _: u8 = inner.take("inner", Err(OceanError::rpc("inner", "timeout")));
        let nested = inner.finish(3u8);

        let mut outer = Partial::new();
        let value = outer.absorb(nested);
        let fetched = outer.finish(value);
        assert_eq!(fetched.value, 3);
        assert!(fetched.degraded);
        assert_eq!(fetched.errors[0].source, "inner");
    }
}
