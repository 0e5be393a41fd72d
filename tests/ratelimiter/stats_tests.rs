// tests/ratelimiter/stats_tests.rs

#[cfg(test)]
mod tests {
    use crate::fixtures::test_clock::TestClock;
    use std::time::Duration;
    use window_limiter::{WindowLimiter, WindowLimiterConfig};

    fn limiter(
        max: usize,
        window_secs: u64,
        clock: &TestClock,
    ) -> WindowLimiter<String, TestClock> {
        let config = WindowLimiterConfig::new(max, Duration::from_secs(window_secs));
        WindowLimiter::with_config(config, clock.clone()).unwrap()
    }

    #[test]
    fn unknown_client_reports_zero_state() {
        let clock = TestClock::new(3.0);
        let limiter = limiter(4, 10, &clock);

        let stats = limiter.stats("nobody");
        assert_eq!(stats.requests_in_window, 0);
        assert_eq!(stats.total_requests, 0);
        assert_eq!(stats.blocked_requests, 0);
        assert_eq!(stats.limit, 4);
        assert_eq!(stats.remaining(), 4);
        assert_eq!(stats.next_available_at_nanos, None);
        assert_eq!(stats.retry_after(), None);
        assert_eq!(stats.tier, None);
    }

    #[test]
    fn stats_reflect_allowed_and_blocked() {
        let clock = TestClock::new(0.0);
        let limiter = limiter(2, 10, &clock);

        for _ in 0..5 {
            limiter.is_allowed("client1".to_string());
        }

        let stats = limiter.stats("client1");
        assert_eq!(stats.requests_in_window, 2);
        assert_eq!(stats.total_requests, 5);
        assert_eq!(stats.blocked_requests, 3);
        assert_eq!(stats.allowed_requests(), 2);
        assert_eq!(stats.remaining(), 0);
    }

    #[test]
    fn next_available_is_when_oldest_expires() {
        let clock = TestClock::new(0.0);
        let limiter = limiter(2, 10, &clock);

        limiter.is_allowed("client1".to_string()); // t=0
        clock.set_time(3.0);
        limiter.is_allowed("client1".to_string()); // t=3
        clock.set_time(4.0);

        let stats = limiter.stats("client1");
        assert_eq!(stats.next_available_at_nanos, Some(10_000_000_000));
        assert_eq!(stats.retry_after(), Some(Duration::from_secs(6)));
        assert_eq!(stats.last_seen_nanos, Some(3_000_000_000));
    }

    #[test]
    fn stats_query_does_not_consume_a_slot() {
        let clock = TestClock::new(0.0);
        let limiter = limiter(1, 10, &clock);

        for _ in 0..5 {
            let stats = limiter.stats("client1");
            assert_eq!(stats.total_requests, 0);
        }

        assert!(limiter.is_allowed("client1".to_string()));
        let stats = limiter.stats("client1");
        assert_eq!(stats.total_requests, 1);
        assert_eq!(stats.requests_in_window, 1);
    }

    #[test]
    fn stats_drop_expired_requests() {
        let clock = TestClock::new(0.0);
        let limiter = limiter(3, 2, &clock);

        limiter.is_allowed("client1".to_string());
        limiter.is_allowed("client1".to_string());
        clock.advance(1.5);
        limiter.is_allowed("client1".to_string());
        clock.advance(0.5);

        let stats = limiter.stats("client1");
        assert_eq!(stats.requests_in_window, 1);
        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.next_available_at_nanos, None);
    }

    #[test]
    fn blocked_plus_allowed_equals_total() {
        let clock = TestClock::new(0.0);
        let limiter = limiter(3, 1, &clock);
        let mut allowed = 0;

        for step in 0..50 {
            clock.set_time(step as f64 * 0.1);
            if limiter.is_allowed("client1".to_string()) {
                allowed += 1;
            }
            let stats = limiter.stats("client1");
            assert_eq!(stats.blocked_requests + allowed, stats.total_requests);
            assert!(stats.requests_in_window <= 3);
        }
    }

    #[test]
    fn blocked_request_updates_last_seen() {
        let clock = TestClock::new(0.0);
        let limiter = limiter(1, 10, &clock);

        limiter.is_allowed("client1".to_string());
        clock.set_time(7.0);
        assert!(!limiter.is_allowed("client1".to_string()));

        assert_eq!(limiter.stats("client1").last_seen_nanos, Some(7_000_000_000));
    }
}
