//! Per-host request spacing.

use dashmap::DashMap;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Keeps requests to one host at least `min_delay` apart.
pub struct RateLimiter {
    min_delay: Duration,
    next_slot: DashMap<String, Instant>,
}

impl RateLimiter {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            next_slot: DashMap::new(),
        }
    }

    /// A limiter that never waits.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Wait for this host's next free slot and claim it. Returns how long we waited.
    pub async fn wait(&self, host: &str) -> Duration {
        if self.min_delay.is_zero() {
            return Duration::ZERO;
        }

        let now = Instant::now();
        let slot = match self.next_slot.get(host) {
            Some(next) if *next > now => *next,
            _ => now,
        };
        // Claim before sleeping so concurrent callers queue behind us.
        self.next_slot
            .insert(host.to_string(), slot + self.min_delay);

        if slot > now {
            tracing::debug!(host, wait_ms = (slot - now).as_millis() as u64, "rate limited");
            sleep_until(slot).await;
        }
        slot - now
    }
}
