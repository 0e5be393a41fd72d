// src/clock.rs

// clock module definition and implementations

// dependencies
use std::time::Instant;

/// Clock trait to abstract time retrieval.
/// Implementors must be thread-safe (Send + Sync) and must never go backwards.
/// The `now` method returns the current time in nanoseconds as a u64,
/// measured from an arbitrary, implementation-defined origin.
/// Tests swap in a manually advanced clock instead of sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

/// SystemClock implementation backed by the monotonic `Instant`.
/// Returns nanoseconds elapsed since the clock was created.
/// This is the default clock used by the WindowLimiter.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // u64 nanoseconds cover ~584 years of uptime
        self.origin.elapsed().as_nanos() as u64
    }
}
