//! In-memory interaction statistics
//!
//! This module records per-request outcomes for the `/stats` endpoint:
//! totals, error counts, per-mode usage, and average response time. The
//! recorder is process-lifetime only; shipping the numbers to an external
//! analytics sink is out of scope.

use crate::response_mode::ResponseMode;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Interaction statistics recorder
///
/// Shared across request handlers behind a single `Mutex`; every record
/// call is a short critical section with no allocation-heavy work inside.
#[derive(Debug, Default)]
pub struct InteractionStats {
    inner: Mutex<StatsInner>,
}

#[derive(Debug, Default)]
struct StatsInner {
    total: u64,
    errors: u64,
    mode_usage: HashMap<ResponseMode, u64>,
    total_response_time: Duration,
}

/// Point-in-time snapshot of the recorded statistics
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    /// Total interactions recorded, successful or not
    pub total_interactions: u64,
    /// Interactions that returned an answer
    pub successful: u64,
    /// Interactions that ended in an error
    pub errors: u64,
    /// Usage counts per response mode (successful interactions only)
    pub mode_usage: HashMap<String, u64>,
    /// Mean response time across all interactions, in seconds
    pub average_response_time_seconds: f64,
}

impl InteractionStats {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful interaction
    ///
    /// # Arguments
    ///
    /// * `mode` - The response mode the answer was generated under
    /// * `elapsed` - Wall-clock time spent handling the request
    pub fn record_success(&self, mode: ResponseMode, elapsed: Duration) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.total += 1;
        inner.total_response_time += elapsed;
        *inner.mode_usage.entry(mode).or_insert(0) += 1;
    }

    /// Record a failed interaction
    ///
    /// # Arguments
    ///
    /// * `elapsed` - Wall-clock time spent before the failure surfaced
    pub fn record_error(&self, elapsed: Duration) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.total += 1;
        inner.errors += 1;
        inner.total_response_time += elapsed;
    }

    /// Take a snapshot of the current counters
    pub fn snapshot(&self) -> StatsSnapshot {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let average = if inner.total == 0 {
            0.0
        } else {
            inner.total_response_time.as_secs_f64() / inner.total as f64
        };

        StatsSnapshot {
            total_interactions: inner.total,
            successful: inner.total - inner.errors,
            errors: inner.errors,
            mode_usage: inner
                .mode_usage
                .iter()
                .map(|(mode, count)| (mode.to_string(), *count))
                .collect(),
            average_response_time_seconds: average,
        }
    }
}
