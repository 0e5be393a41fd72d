// src/config.rs

//! Configuration types for the window limiter

// dependencies
use crate::errors::WindowLimiterError;
use std::collections::HashMap;
use std::time::Duration;

/// A single quota: at most `max_requests` within any trailing `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLimit {
    pub(crate) max_requests: usize,
    pub(crate) window: Duration,
}

impl WindowLimit {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Validate the limit
    pub fn validate(&self) -> Result<(), WindowLimiterError> {
        if self.max_requests == 0 {
            return Err(WindowLimiterError::InvalidMaxRequests);
        }
        if self.window.is_zero() || u64::try_from(self.window.as_nanos()).is_err() {
            return Err(WindowLimiterError::InvalidWindow);
        }
        Ok(())
    }

    // only meaningful once validate() has passed
    pub(crate) fn window_nanos(&self) -> u64 {
        u64::try_from(self.window.as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Configuration for window limiter behavior
#[derive(Debug, Clone)]
pub struct WindowLimiterConfig {
    pub(crate) default_limit: WindowLimit,
    pub(crate) tiers: HashMap<String, WindowLimit>,
}

impl WindowLimiterConfig {
    /// Create a new configuration with the global request budget and window
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            default_limit: WindowLimit::new(max_requests, window),
            tiers: HashMap::new(),
        }
    }

    /// Builder-style: set the global max requests per window
    pub fn max_requests(mut self, max_requests: usize) -> Self {
        self.default_limit.max_requests = max_requests;
        self
    }

    /// Builder-style: set the global window duration
    pub fn window(mut self, window: Duration) -> Self {
        self.default_limit.window = window;
        self
    }

    /// Builder-style: register (or replace) a named tier with its own limit
    pub fn tier(mut self, name: impl Into<String>, limit: WindowLimit) -> Self {
        self.tiers.insert(name.into(), limit);
        self
    }

    /// The limit applied to identities without a tier
    pub fn default_limit(&self) -> &WindowLimit {
        &self.default_limit
    }

    /// Resolve the effective limit for an identity's tier label.
    ///
    /// An explicit tier limit wins; no tier, or a tier that was never
    /// configured, falls back to the global limit.
    pub fn resolve_limit(&self, tier: Option<&str>) -> &WindowLimit {
        tier.and_then(|name| self.tiers.get(name))
            .unwrap_or(&self.default_limit)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), WindowLimiterError> {
        self.default_limit.validate()?;
        for (name, limit) in &self.tiers {
            limit
                .validate()
                .map_err(|reason| WindowLimiterError::InvalidTier {
                    tier: name.clone(),
                    reason: Box::new(reason),
                })?;
        }
        Ok(())
    }
}
