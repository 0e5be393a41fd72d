// src/errors.rs

// error handling for the window limiter type

// dependencies
use thiserror::Error;

/// Error type for WindowLimiter configuration issues.
///
/// Only raised while validating a configuration; a constructed limiter
/// never fails at runtime.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowLimiterError {
    /// `max_requests` was zero.
    #[error("Max requests must be at least 1")]
    InvalidMaxRequests,

    /// The window was zero or too large to express in nanoseconds.
    #[error("Window duration must be positive and fit in u64 nanoseconds")]
    InvalidWindow,

    /// A tier limit broke one of the rules above.
    #[error("Tier '{tier}' is invalid: {reason}")]
    InvalidTier {
        tier: String,
        reason: Box<WindowLimiterError>,
    },
}
