//! Countdown of outstanding file writes for one partitioned sitemap set.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::errors::{Result, SitemapError};

/// Invoked once, after every write has reported.
pub type CompletionHook = Box<dyn FnOnce(&Result<()>) + Send>;

/// Tracks outstanding writes and fires the completion hook exactly once, when the
/// last of them reports.
///
/// Writes carry their logical position (`order`); when several fail, the failure with the
/// lowest position is the one reported.
pub struct PendingWrites {
    remaining: AtomicUsize,
    failures: Mutex<Vec<(usize, SitemapError)>>,
    hook: Mutex<Option<CompletionHook>>,
}

impl PendingWrites {
    pub fn new(total: usize, hook: Option<CompletionHook>) -> Self {
        Self {
            remaining: AtomicUsize::new(total),
            failures: Mutex::new(Vec::new()),
            hook: Mutex::new(hook),
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }

    /// Records the outcome of one write.
    ///
    /// Returns the overall outcome to the caller that completed the final write, `None` to all others.
    pub fn complete(&self, order: usize, outcome: Result<()>) -> Option<Result<()>> {
        if let Err(error) = outcome {
            tracing::error!("Write #{} failed: {}", order, error);
            self.failures
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((order, error));
        }

        let previous = self
            .remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
        match previous {
            Ok(1) => {
                let overall = self.take_overall();
                if let Some(hook) = self.hook.lock().unwrap_or_else(PoisonError::into_inner).take() {
                    hook(&overall);
                }
                Some(overall)
            }
            Ok(_) => None,
            Err(_) => {
                tracing::warn!("Write #{} reported after all writes had completed", order);
                None
            }
        }
    }

    fn take_overall(&self) -> Result<()> {
        let mut failures = std::mem::take(&mut *self.failures.lock().unwrap_or_else(PoisonError::into_inner));
        if failures.len() > 1 {
            tracing::error!("{} writes failed, reporting the first", failures.len());
        }
        failures.sort_by_key(|(order, _)| *order);
        match failures.into_iter().next() {
            Some((_, error)) => Err(error),
            None => Ok(()),
        }
    }
}
