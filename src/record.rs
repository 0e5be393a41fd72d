// src/record.rs

//! Per-identity window state.
//!
//! Timestamps are appended in non-decreasing order, so everything that has
//! aged out of the window sits at the front and eviction is a prefix trim.

// dependencies
use std::collections::VecDeque;

/// State kept for one identity, created on its first observed request.
#[derive(Debug, Default)]
pub(crate) struct UserRecord {
    /// accepted requests still possibly inside the window, oldest first
    pub(crate) timestamps: VecDeque<u64>,
    pub(crate) blocked: u64,
    pub(crate) total: u64,
    pub(crate) last_seen: u64,
    pub(crate) tier: Option<String>,
}

impl UserRecord {
    pub(crate) fn new(now: u64) -> Self {
        Self {
            last_seen: now,
            ..Self::default()
        }
    }

    /// Drop every timestamp with `now - ts >= window_nanos`.
    /// Returns the number evicted.
    pub(crate) fn evict_expired(&mut self, now: u64, window_nanos: u64) -> usize {
        let mut evicted = 0;
        while let Some(&oldest) = self.timestamps.front() {
            if now.saturating_sub(oldest) < window_nanos {
                break;
            }
            self.timestamps.pop_front();
            evicted += 1;
        }
        evicted
    }

    pub(crate) fn in_window(&self) -> usize {
        self.timestamps.len()
    }

    /// Evict, then either take a slot or count a denial.
    /// Both outcomes bump `total` and `last_seen`.
    pub(crate) fn try_acquire(&mut self, now: u64, max_requests: usize, window_nanos: u64) -> bool {
        self.evict_expired(now, window_nanos);
        self.total += 1;
        self.last_seen = self.last_seen.max(now);

        if self.timestamps.len() < max_requests {
            // keep the deque ordered even if the clock hands back an older reading
            let stamp = self.timestamps.back().map_or(now, |&newest| newest.max(now));
            self.timestamps.push_back(stamp);
            true
        } else {
            self.blocked += 1;
            false
        }
    }

    /// Instant at which the in-window count next drops below `max_requests`,
    /// or None if a slot is free already.
    pub(crate) fn next_available_at(&self, max_requests: usize, window_nanos: u64) -> Option<u64> {
        let len = self.timestamps.len();
        if len < max_requests {
            return None;
        }
        // after a tier downgrade more than max_requests may remain;
        // a slot frees once len - max_requests + 1 entries have expired
        self.timestamps
            .get(len - max_requests)
            .map(|&ts| ts.saturating_add(window_nanos))
    }

    /// Instant at which every stored timestamp has left the window.
    pub(crate) fn window_clears_at(&self, window_nanos: u64) -> Option<u64> {
        self.timestamps
            .back()
            .map(|&newest| newest.saturating_add(window_nanos))
    }
}
