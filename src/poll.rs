//! Request pacing for the vehicle bus.
//!
//! Only the active screen issues requests, so a single coarse rate limiter
//! is enough to keep the bus from flooding: at most one request per 50 ms,
//! with the timestamp reset on every granted poll.

/// Minimum spacing between requests, in milliseconds.
pub const POLL_INTERVAL_MS: u64 = 50;

/// Coarse rate limiter for outgoing requests.
pub struct PollScheduler {
    last_poll_ms: Option<u64>,
}

impl PollScheduler {
    pub const fn new() -> Self { Self { last_poll_ms: None } }

    /// True at most once per [`POLL_INTERVAL_MS`]; a true result starts the
    /// next interval.
    pub fn should_poll(&mut self, now_ms: u64) -> bool {
        let due = match self.last_poll_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= POLL_INTERVAL_MS,
        };
        if due {
            self.last_poll_ms = Some(now_ms);
        }
        due
    }
}

impl Default for PollScheduler {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_polls() {
        let mut scheduler = PollScheduler::new();
        assert!(scheduler.should_poll(0));
    }

    #[test]
    fn test_blocks_within_interval() {
        let mut scheduler = PollScheduler::new();
        assert!(scheduler.should_poll(100));
        assert!(!scheduler.should_poll(100 + POLL_INTERVAL_MS - 1));
        assert!(scheduler.should_poll(100 + POLL_INTERVAL_MS));
    }

    #[test]
    fn test_never_two_grants_within_interval() {
        // Arbitrary sub-interval spacing must never yield two grants closer
        // than the configured interval.
        let steps = [0u64, 3, 7, 11, 23, 31, 49, 50, 51, 99, 101, 149, 150, 199];
        let mut scheduler = PollScheduler::new();
        let mut last_grant: Option<u64> = None;
        for &now in &steps {
            if scheduler.should_poll(now) {
                if let Some(prev) = last_grant {
                    assert!(now - prev >= POLL_INTERVAL_MS, "grants at {prev} and {now}");
                }
                last_grant = Some(now);
            }
        }
        assert!(last_grant.is_some());
    }

    #[test]
    fn test_interval_restarts_on_grant() {
        let mut scheduler = PollScheduler::new();
        assert!(scheduler.should_poll(0));
        // Denied calls must not push the next grant further out
        assert!(!scheduler.should_poll(30));
        assert!(!scheduler.should_poll(45));
        assert!(scheduler.should_poll(50));
    }
}
