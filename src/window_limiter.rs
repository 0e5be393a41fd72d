// src/window_limiter.rs

// window-limiter: A per-identity rate limiter based on a sliding window log.

// dependencies
use crate::clock::{Clock, SystemClock};
use crate::config::{WindowLimit, WindowLimiterConfig};
use crate::errors::WindowLimiterError;
use crate::record::UserRecord;
use crate::stats::WindowStats;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;
use tracing::{debug, info, trace};

/// The main WindowLimiter model.
/// T is the type used to identify clients (e.g., String, u64, etc.).
/// C is the clock type, defaulting to SystemClock.
///
/// Client state lives in a sharded `DashMap`. Every decision runs while
/// holding the write guard for its identity's entry, so lookup-or-create,
/// eviction, the capacity check and the append form one atomic step per
/// identity, while identities in other shards proceed in parallel.
#[derive(Debug)]
pub struct WindowLimiter<T, C = SystemClock>
where
    T: Hash + Eq + Clone + Debug,
    C: Clock,
{
    config: WindowLimiterConfig,
    client_state: DashMap<T, UserRecord>,
    clock: C,
}

impl<T> WindowLimiter<T, SystemClock>
where
    T: Hash + Eq + Clone + Debug,
{
    /// Create a limiter allowing `max_requests` per trailing `window`,
    /// using the system clock and no tiers.
    pub fn new(max_requests: usize, window: Duration) -> Result<Self, WindowLimiterError> {
        Self::with_config(
            WindowLimiterConfig::new(max_requests, window),
            SystemClock::new(),
        )
    }
}

// methods for the WindowLimiter type
impl<T, C> WindowLimiter<T, C>
where
    T: Hash + Eq + Clone + Debug,
    C: Clock,
{
    // method to create a new window limiter from a config object
    pub fn with_config(config: WindowLimiterConfig, clock: C) -> Result<Self, WindowLimiterError> {
        config.validate()?;

        debug!(
            max_requests = config.default_limit.max_requests,
            window = ?config.default_limit.window,
            tiers = config.tiers.len(),
            "Creating window limiter"
        );

        Ok(Self {
            config,
            client_state: DashMap::new(),
            clock,
        })
    }

    // accessor method to return the global max requests per window
    pub fn max_requests(&self) -> usize {
        self.config.default_limit.max_requests
    }

    // accessor method to return the global window duration
    pub fn window(&self) -> Duration {
        self.config.default_limit.window
    }

    pub fn config(&self) -> &WindowLimiterConfig {
        &self.config
    }

    /// Number of identities currently holding a record
    pub fn tracked_identities(&self) -> usize {
        self.client_state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.client_state.is_empty()
    }

    fn limit_for(&self, record: &UserRecord) -> WindowLimit {
        *self.config.resolve_limit(record.tier.as_deref())
    }

    /// Decide whether `client_id` may make a request now.
    pub fn is_allowed(&self, client_id: T) -> bool {
        self.check_request(client_id).allowed
    }

    /// Decide whether `client_id` may make a request now, with metadata.
    ///
    /// An allowed request takes one slot in the window. A denied request
    /// is counted in the identity's totals but takes no slot.
    pub fn check_request(&self, client_id: T) -> WindowLimiterDecision {
        let current_time_nanos = self.clock.now();

        let mut record = match self.client_state.entry(client_id) {
            Entry::Occupied(occupied) => occupied.into_ref(),
            Entry::Vacant(vacant) => {
                debug!(client = ?vacant.key(), "Tracking new client");
                vacant.insert(UserRecord::new(current_time_nanos))
            }
        };

        let limit = self.limit_for(&record);
        let window_nanos = limit.window_nanos();
        let allowed = record.try_acquire(current_time_nanos, limit.max_requests, window_nanos);

        let retry_after = if allowed {
            None
        } else {
            record
                .next_available_at(limit.max_requests, window_nanos)
                .map(|at| Duration::from_nanos(at.saturating_sub(current_time_nanos)))
        };

        let decision = WindowLimiterDecision {
            allowed,
            limit: limit.max_requests,
            remaining: limit.max_requests.saturating_sub(record.in_window()),
            retry_after,
            reset_time_nanos: record
                .window_clears_at(window_nanos)
                .unwrap_or(current_time_nanos),
        };

        trace!(
            client = ?record.key(),
            allowed,
            in_window = record.in_window(),
            limit = limit.max_requests,
            "Window decision"
        );

        decision
    }

    /// Forget everything about `client_id`, as if it never made a request.
    pub fn reset<Q>(&self, client_id: &Q)
    where
        T: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        if self.client_state.remove(client_id).is_some() {
            debug!(client = ?client_id, "Reset client window");
        }
    }

    /// Snapshot of `client_id`'s usage.
    ///
    /// Expired timestamps are pruned, but the query never takes a slot,
    /// never counts as a request and never creates a record.
    pub fn stats<Q>(&self, client_id: &Q) -> WindowStats
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let current_time_nanos = self.clock.now();

        match self.client_state.get_mut(client_id) {
            Some(mut record) => {
                let limit = self.limit_for(&record);
                let window_nanos = limit.window_nanos();
                record.evict_expired(current_time_nanos, window_nanos);
                WindowStats::from_record(
                    &record,
                    limit.max_requests,
                    window_nanos,
                    current_time_nanos,
                )
            }
            None => WindowStats::empty(self.max_requests(), current_time_nanos),
        }
    }

    /// Put `client_id` in a tier. Takes effect on its next request and
    /// leaves stored history untouched. Does not count as a request.
    pub fn assign_tier(&self, client_id: T, tier: impl Into<String>) {
        let current_time_nanos = self.clock.now();
        let tier = tier.into();

        let mut record = self
            .client_state
            .entry(client_id)
            .or_insert_with(|| UserRecord::new(current_time_nanos));

        debug!(client = ?record.key(), tier = %tier, "Assigned tier");
        record.tier = Some(tier);
    }

    /// Move `client_id` back onto the global limit.
    pub fn clear_tier<Q>(&self, client_id: &Q)
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(mut record) = self.client_state.get_mut(client_id) {
            record.tier = None;
        }
    }

    // method to clean up clients idle for longer than the threshold
    pub fn cleanup_inactive(&self, inactivity_threshold: Duration) -> usize {
        let current_time_nanos = self.clock.now();
        let threshold_nanos = u64::try_from(inactivity_threshold.as_nanos()).unwrap_or(u64::MAX);

        let mut removed = 0;
        self.client_state.retain(|_, record| {
            let keep = current_time_nanos.saturating_sub(record.last_seen) <= threshold_nanos;
            if !keep {
                removed += 1;
            }
            keep
        });

        if removed > 0 {
            info!(
                removed,
                remaining = self.client_state.len(),
                "Cleaned up inactive clients"
            );
        }
        removed
    }
}

/// Result of a rate limiting decision with metadata for HTTP responses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowLimiterDecision {
    /// Whether the request should be allowed
    pub allowed: bool,
    /// Max requests per window that applied to this decision
    pub limit: usize,
    /// Slots left in the window after this decision
    pub remaining: usize,
    /// Time until the client can make another request (when denied)
    pub retry_after: Option<Duration>,
    /// When the window empties out completely (clock nanoseconds)
    pub reset_time_nanos: u64,
}
