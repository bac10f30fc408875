use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::RouteKey;

// ─── Public types ────────────────────────────────────────────────

/// Thread-safe request metrics registry.
/// The middleware calls `record()`, the `/metrics` handler calls `snapshot()`.
pub struct MetricsRegistry {
    started: Instant,
    inner: Mutex<Inner>,
}

/// Running totals for one (method, route, status) series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteStats {
    pub count: u64,
    /// Sum of whole milliseconds across every request in the series
    pub duration_ms_sum: u64,
    /// Requests in the series with status >= 400
    pub errors: u64,
}

impl RouteStats {
    /// Mean duration in hundredths of a millisecond. The divisor never drops below 1.
    pub fn avg_duration_centis(&self) -> u64 {
        hundredths(self.duration_ms_sum, self.count)
    }
}

/// Read-only copy of the registry taken under a single lock.
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub uptime: Duration,
    pub total_requests: u64,
    pub total_errors: u64,
    /// Per-route series in first-seen order
    pub routes: Vec<(RouteKey, RouteStats)>,
}

impl MetricsSnapshot {
    /// Share of requests that ended with status >= 400, in hundredths of a
    /// percent. `None` until the first request has been observed.
    pub fn error_rate_centis(&self) -> Option<u64> {
        if self.total_requests == 0 {
            return None;
        }
        Some(hundredths(self.total_errors * 100, self.total_requests))
    }

    /// Uptime in seconds at millisecond resolution.
    pub fn uptime_secs(&self) -> f64 {
        self.uptime.as_millis() as f64 / 1000.0
    }
}

/// `numer / denom` in hundredths, rounding exact ties up (0.125 -> 13).
fn hundredths(numer: u64, denom: u64) -> u64 {
    let denom = u128::from(denom.max(1));
    ((u128::from(numer) * 200 + denom) / (2 * denom)) as u64
}

// ─── Internal state ──────────────────────────────────────────────

#[derive(Default)]
struct Inner {
    total_requests: u64,
    total_errors: u64,

    // Series live in a Vec so rendering follows first-seen order;
    // `index` maps each key to its slot.
    routes: Vec<(RouteKey, RouteStats)>,
    index: HashMap<RouteKey, usize>,
}

// ─── MetricsRegistry impl ────────────────────────────────────────

impl MetricsRegistry {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Record one completed request. Called once per response by the middleware.
    pub fn record(&self, key: RouteKey, elapsed_ms: u64) {
        self.inner.lock().record(key, elapsed_ms);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let inner = self.inner.lock();
        MetricsSnapshot {
            uptime: self.started.elapsed(),
            total_requests: inner.total_requests,
            total_errors: inner.total_errors,
            routes: inner.routes.clone(),
        }
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Inner impl ──────────────────────────────────────────────────

impl Inner {
    fn record(&mut self, key: RouteKey, elapsed_ms: u64) {
        let is_error = key.is_error();

        // ── Process-wide counters ───────────────────────────────
        self.total_requests += 1;
        if is_error {
            self.total_errors += 1;
        }

        // ── Per-route series ────────────────────────────────────
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.routes.len();
                self.index.insert(key.clone(), slot);
                self.routes.push((key, RouteStats::default()));
                slot
            }
        };

        let stats = &mut self.routes[slot].1;
        stats.count += 1;
        stats.duration_ms_sum += elapsed_ms;
        if is_error {
            stats.errors += 1;
        }
    }
}
