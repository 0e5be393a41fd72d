// src/stats.rs

//! Per-identity statistics snapshot

// dependencies
use crate::record::UserRecord;
use std::time::Duration;

/// Point-in-time view of one identity's usage.
///
/// An identity with no record reports the zero state: nothing in the
/// window, no history, and a slot available right away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowStats {
    /// Accepted requests still inside the window as of the query
    pub requests_in_window: usize,
    /// Every request observed, allowed or blocked
    pub total_requests: u64,
    /// Requests that were denied
    pub blocked_requests: u64,
    /// Effective max requests for this identity
    pub limit: usize,
    /// When the next slot frees up (clock nanoseconds); None if one is free now
    pub next_available_at_nanos: Option<u64>,
    /// Time of the most recent request, allowed or blocked (clock nanoseconds)
    pub last_seen_nanos: Option<u64>,
    /// Tier label assigned to this identity, if any
    pub tier: Option<String>,
    pub(crate) observed_at_nanos: u64,
}

impl WindowStats {
    pub(crate) fn empty(limit: usize, now: u64) -> Self {
        Self {
            requests_in_window: 0,
            total_requests: 0,
            blocked_requests: 0,
            limit,
            next_available_at_nanos: None,
            last_seen_nanos: None,
            tier: None,
            observed_at_nanos: now,
        }
    }

    pub(crate) fn from_record(
        record: &UserRecord,
        limit: usize,
        window_nanos: u64,
        now: u64,
    ) -> Self {
        Self {
            requests_in_window: record.in_window(),
            total_requests: record.total,
            blocked_requests: record.blocked,
            limit,
            next_available_at_nanos: record.next_available_at(limit, window_nanos),
            last_seen_nanos: Some(record.last_seen),
            tier: record.tier.clone(),
            observed_at_nanos: now,
        }
    }

    /// Requests that were let through
    pub fn allowed_requests(&self) -> u64 {
        self.total_requests - self.blocked_requests
    }

    /// Slots left in the current window
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.requests_in_window)
    }

    /// How long after the query the next slot frees up; None if available now
    pub fn retry_after(&self) -> Option<Duration> {
        self.next_available_at_nanos
            .map(|at| Duration::from_nanos(at.saturating_sub(self.observed_at_nanos)))
    }
}
