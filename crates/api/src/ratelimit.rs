//! In-memory fixed-window rate limiter for the public booking path.
//!
//! Counters live in process memory: restarting the server resets all
//! windows, and multi-instance deployments each count independently.
//! That is an accepted trade-off for the abuse pattern this guards
//! against (scripted booking spam from a single origin).

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use salonflow_core::error::CoreError;

/// Entries older than this many windows are swept during checks.
const SWEEP_THRESHOLD: usize = 1024;

#[derive(Debug)]
struct WindowEntry {
    count: u32,
    window_start: Instant,
}

/// Fixed-window counter keyed by caller identity (client IP).
///
/// Each key gets `max_attempts` hits per `window`; the window resets
/// wholesale rather than sliding.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    max_attempts: u32,
    window: Duration,
    entries: Mutex<HashMap<String, WindowEntry>>,
}

impl FixedWindowLimiter {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Register one attempt for `key`.
    ///
    /// Returns `Ok(())` when the attempt is within budget, otherwise
    /// `CoreError::RateLimited` with the seconds remaining in the
    /// current window.
    pub fn check(&self, key: &str) -> Result<(), CoreError> {
        let now = Instant::now();
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CoreError::Internal("rate limiter lock poisoned".into()))?;

        if entries.len() > SWEEP_THRESHOLD {
            let window = self.window;
            entries.retain(|_, e| now.duration_since(e.window_start) < window);
        }

        let entry = entries.entry(key.to_string()).or_insert(WindowEntry {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start) >= self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count >= self.max_attempts {
            let elapsed = now.duration_since(entry.window_start);
            let retry_after_secs = self.window.saturating_sub(elapsed).as_secs().max(1);
            return Err(CoreError::RateLimited { retry_after_secs });
        }

        entry.count += 1;
        Ok(())
    }

    /// Attempts left for `key` in its current window.
    pub fn remaining(&self, key: &str) -> u32 {
        let entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(_) => return 0,
        };
        match entries.get(key) {
            Some(e) if Instant::now().duration_since(e.window_start) < self.window => {
                self.max_attempts.saturating_sub(e.count)
            }
            _ => self.max_attempts,
        }
    }

    /// Drop the counter for `key`, reopening its budget immediately.
    pub fn reset(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}
