//! Retry backoff controller
//!
//! Tracks the current retry delay for one crawl. The delay doubles after
//! every failed fetch and snaps back to the base interval after every
//! successful one. Once a doubled delay reaches the ceiling the controller
//! reports exhaustion and the driver gives the crawl up.
//!
//! The controller never sleeps itself; it hands the driver a
//! [`BackoffStep`] and the driver owns the suspension. That keeps the
//! delay sequence a pure function of the failure count.

use std::time::Duration;

/// One retry step: how long to sleep, and whether to give up afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffStep {
    /// Delay to sleep before the next attempt
    pub sleep: Duration,
    /// True once the doubled delay has reached the ceiling
    pub exhausted: bool,
}

/// Exponential backoff with a hard delay ceiling
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    base: Duration,
    ceiling: Duration,
    delay: Duration,
}

impl ExponentialBackoff {
    /// Create a controller starting at `base`, aborting at `ceiling`
    pub fn new(base: Duration, ceiling: Duration) -> Self {
        Self {
            base,
            ceiling,
            delay: base,
        }
    }

    /// The current delay; the driver also uses this for courtesy pacing
    /// between successful pages
    pub fn current(&self) -> Duration {
        self.delay
    }

    /// Record a failed fetch
    ///
    /// The returned step's sleep is the pre-doubling delay; the sleep is
    /// performed even when the step reports exhaustion.
    pub fn on_failure(&mut self) -> BackoffStep {
        let sleep = self.delay;
        self.delay = self.delay.saturating_mul(2);
        BackoffStep {
            sleep,
            exhausted: self.delay >= self.ceiling,
        }
    }

    /// Record a successful fetch: the delay resets to the base interval
    pub fn on_success(&mut self) {
        self.delay = self.base;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_delay_doubles_per_failure() {
        let mut backoff = ExponentialBackoff::new(secs(1), secs(600));

        assert_eq!(backoff.on_failure(), BackoffStep { sleep: secs(1), exhausted: false });
        assert_eq!(backoff.on_failure(), BackoffStep { sleep: secs(2), exhausted: false });
        assert_eq!(backoff.on_failure(), BackoffStep { sleep: secs(4), exhausted: false });
        assert_eq!(backoff.current(), secs(8));
    }

    #[test]
    fn test_success_resets_to_base() {
        let mut backoff = ExponentialBackoff::new(secs(3), secs(600));

        backoff.on_failure();
        backoff.on_failure();
        assert_eq!(backoff.current(), secs(12));

        backoff.on_success();
        assert_eq!(backoff.current(), secs(3));
    }

    #[test]
    fn test_exhaustion_at_ceiling() {
        let mut backoff = ExponentialBackoff::new(secs(200), secs(600));

        let step = backoff.on_failure(); // 200 -> 400
        assert!(!step.exhausted);

        let step = backoff.on_failure(); // 400 -> 800, past the ceiling
        assert_eq!(step.sleep, secs(400));
        assert!(step.exhausted);
    }

    #[test]
    fn test_exhaustion_is_inclusive() {
        // Doubling exactly onto the ceiling counts as exhausted.
        let mut backoff = ExponentialBackoff::new(secs(300), secs(600));

        let step = backoff.on_failure(); // 300 -> 600
        assert_eq!(step.sleep, secs(300));
        assert!(step.exhausted);
    }

    #[test]
    fn test_full_sequence_until_exhaustion() {
        // Base 1s: sleeps 1, 2, 4, ..., 512; the doubling to 1024 exhausts.
        let mut backoff = ExponentialBackoff::new(secs(1), secs(600));
        let mut sleeps = Vec::new();

        loop {
            let step = backoff.on_failure();
            sleeps.push(step.sleep.as_secs());
            if step.exhausted {
                break;
            }
        }

        assert_eq!(sleeps, vec![1, 2, 4, 8, 16, 32, 64, 128, 256, 512]);
    }
}
