use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::interval;
use crate::error::GateError;
use crate::metrics::TRACKED_BUCKETS;

pub const DEFAULT_LIMIT: u32 = 60;
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(60_000);

// Used when the transport gives us no client address
pub const UNKNOWN_ADDRESS: &str = "ip";

// Rate limit entry - tracks requests per address/key pair
#[derive(Debug, Clone, Copy)]
pub struct RateLimitEntry {
    pub count: u32,
    pub window_start: Instant,
}

impl RateLimitEntry {
    fn fresh(now: Instant) -> Self {
        Self {
            count: 1,
            window_start: now,
        }
    }

    fn expired(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.window_start) > window
    }
}

// "<address>:<key>", with "ip" standing in for an unknown address
pub fn client_identity(address: Option<&str>, presented_key: Option<&str>) -> String {
    let address = address.filter(|a| !a.is_empty()).unwrap_or(UNKNOWN_ADDRESS);
    format!("{}:{}", address, presented_key.unwrap_or_default())
}

/// Fixed-window request counter keyed by client identity.
///
/// Every hit inside a window bumps the counter, rejected ones included, and
/// the first hit after the window has run out starts a new one. Because the
/// windows are fixed, a client can push up to twice the limit through
/// around a window boundary.
pub struct AdmissionLimiter {
    buckets: DashMap<String, RateLimitEntry>,
    limit: u32,
    window: Duration,
}

impl Default for AdmissionLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, DEFAULT_WINDOW)
    }
}

impl AdmissionLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            buckets: DashMap::new(),
            limit,
            window,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn check_rate_limit(
        &self,
        address: Option<&str>,
        presented_key: Option<&str>,
    ) -> Result<(), GateError> {
        let identity = client_identity(address, presented_key);
        self.check_at(&identity, Instant::now())
    }

    /// Admission decision for `identity` at `now`.
    ///
    /// The entry guard holds the shard lock for the whole read-check-write,
    /// so concurrent hits on one identity can't both slip under the limit.
    pub fn check_at(&self, identity: &str, now: Instant) -> Result<(), GateError> {
        let mut entry = self
            .buckets
            .entry(identity.to_string())
            .or_insert_with(|| RateLimitEntry {
                count: 0,
                window_start: now,
            });

        // windows expired..? start over
        if entry.count == 0 || entry.expired(now, self.window) {
            *entry = RateLimitEntry::fresh(now);
            return Ok(());
        }

        entry.count = entry.count.saturating_add(1);
        if entry.count > self.limit {
            return Err(GateError::RateLimited);
        }
        Ok(())
    }

    // Current bucket for an identity, if any
    pub fn bucket(&self, identity: &str) -> Option<RateLimitEntry> {
        self.buckets.get(identity).map(|e| *e)
    }

    // Drop buckets whose window has run out. Returns how many went.
    pub fn sweep(&self, now: Instant) -> usize {
        let before = self.buckets.len();
        let window = self.window;
        self.buckets.retain(|_, entry| !entry.expired(now, window));
        before.saturating_sub(self.buckets.len())
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

// Bucket sweeper - keeps the map from growing forever
pub async fn bucket_sweeper(limiter: Arc<AdmissionLimiter>, every: Duration) {
    let mut interval = interval(every);

    tracing::info!(interval = ?every, "Bucket sweeper started");

    loop {
        interval.tick().await;

        // tokio's clock, so paused test time drives the sweep too
        let removed = limiter.sweep(tokio::time::Instant::now().into_std());
        TRACKED_BUCKETS.set(limiter.len() as f64);
        if removed > 0 {
            tracing::debug!(removed, remaining = limiter.len(), "Swept expired buckets");
        }
    }
}
