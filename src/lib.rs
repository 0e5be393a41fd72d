// src/lib.rs

//! # Window Limiter
//!
//! A per-identity rate limiter based on a sliding window log: at most
//! `max_requests` accepted requests in any trailing `window`, tracked
//! independently for each client and safe to share across threads.
//!
//! ## Quick Example
//!
//! ```rust
//! use std::time::Duration;
//! use window_limiter::{SystemClock, WindowLimit, WindowLimiter, WindowLimiterConfig};
//!
//! let config = WindowLimiterConfig::new(5, Duration::from_secs(10))
//!     .tier("premium", WindowLimit::new(50, Duration::from_secs(10)));
//! let limiter = WindowLimiter::with_config(config, SystemClock::new()).unwrap();
//!
//! let decision = limiter.check_request("user_123");
//! if decision.allowed {
//!     println!("Request allowed, {} left", decision.remaining);
//! } else {
//!     println!("Rate limited - retry after {:?}",
//!              decision.retry_after.unwrap_or_default());
//! }
//!
//! // from a background task
//! let removed = limiter.cleanup_inactive(Duration::from_secs(300));
//! assert_eq!(removed, 0);
//! ```

// private modules
mod clock;
mod config;
mod errors;
mod record;
mod stats;
mod window_limiter;

// public API exports
pub use clock::{Clock, SystemClock};
pub use config::{WindowLimit, WindowLimiterConfig};
pub use errors::WindowLimiterError;
pub use stats::WindowStats;
pub use window_limiter::{WindowLimiter, WindowLimiterDecision};
