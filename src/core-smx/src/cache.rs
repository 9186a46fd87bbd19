//! Time-bounded cache for a rendered document.

use std::time::{Duration, Instant};

/// Holds the last rendered output of a document for at most `ttl`.
///
/// A zero `ttl` disables caching entirely.
#[derive(Debug, Clone, Default)]
pub struct RenderCache {
    ttl: Duration,
    output: Option<String>,
    cached_at: Option<Instant>,
}

impl RenderCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            output: None,
            cached_at: None,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// True iff caching is enabled, a value is stored, and it has not outlived the ttl.
    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Instant::now())
    }

    fn is_fresh_at(&self, now: Instant) -> bool {
        match (&self.output, self.cached_at) {
            // An expiry past the clock's range never expires.
            (Some(_), Some(cached_at)) if !self.ttl.is_zero() => cached_at
                .checked_add(self.ttl)
                .is_none_or(|expiry| now <= expiry),
            _ => false,
        }
    }

    /// The cached output, if still fresh.
    pub fn get(&self) -> Option<&str> {
        if self.is_fresh() { self.output.as_deref() } else { None }
    }

    /// Stores freshly rendered output. Does nothing when caching is disabled.
    pub fn store(&mut self, output: &str) {
        if self.ttl.is_zero() {
            return;
        }
        self.output = Some(output.to_string());
        self.cached_at = Some(Instant::now());
    }

    pub fn clear(&mut self) {
        self.output = None;
        self.cached_at = None;
    }
}
