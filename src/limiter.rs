// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sliding window attempt limiter for contact submissions.
//!
//! Each identifier keeps the timestamps of its accepted attempts. Expired
//! timestamps are pruned lazily whenever that identifier is checked; nothing
//! sweeps the map in the background.

use crate::clock::{Clock, MonotonicClock};
use crate::config::RateLimitConfig;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Attempt is allowed and has been recorded
    Allowed {
        /// Attempts left in the current window
        remaining: u32,
        /// Time until the oldest recorded attempt leaves the window
        reset_in: Duration,
    },
    /// Attempt is rejected and was not recorded
    Limited {
        /// Time until an attempt would be accepted again
        retry_after: Duration,
    },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed { .. })
    }
}

/// Thread-safe, in-memory sliding window limiter.
///
/// Checks for the same identifier are serialized on the map shard lock, so
/// concurrent callers can never push an identifier past `max_attempts`.
pub struct RateLimiter {
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
    attempts: DashMap<String, Vec<u64>>,
}

impl RateLimiter {
    /// Create a new rate limiter backed by the monotonic process clock.
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, Arc::new(MonotonicClock::new()))
    }

    /// Create a rate limiter reading time from `clock`.
    pub fn with_clock(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            attempts: DashMap::new(),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Record an attempt for `identifier` if its window has room.
    pub fn is_allowed(&self, identifier: &str) -> bool {
        self.check(identifier).is_allowed()
    }

    /// Check and record an attempt for `identifier`.
    ///
    /// Every call prunes the identifier's expired attempts. A rejected call
    /// is not counted as an attempt.
    pub fn check(&self, identifier: &str) -> RateLimitResult {
        let now = self.clock.now_ms();
        let max = self.config.max_attempts as usize;

        match self.attempts.entry(identifier.to_owned()) {
            Entry::Occupied(mut entry) => {
                let attempts = entry.get_mut();
                attempts.retain(|&t| self.in_window(t, now));

                if attempts.len() >= max {
                    let retry_after = self.until_oldest_expires(attempts, now);
                    if attempts.is_empty() {
                        entry.remove();
                    }
                    debug!(identifier, ?retry_after, "Attempt limit reached");
                    return RateLimitResult::Limited { retry_after };
                }

                attempts.push(now);
                RateLimitResult::Allowed {
                    remaining: (max - attempts.len()) as u32,
                    reset_in: self.until_oldest_expires(attempts, now),
                }
            }
            Entry::Vacant(entry) => {
                if max == 0 {
                    debug!(identifier, "Attempts disabled");
                    return RateLimitResult::Limited {
                        retry_after: self.config.window_duration(),
                    };
                }

                entry.insert(vec![now]);
                RateLimitResult::Allowed {
                    remaining: (max - 1) as u32,
                    reset_in: self.config.window_duration(),
                }
            }
        }
    }

    /// Attempts left for `identifier` in the current window. Does not record
    /// an attempt or modify stored state.
    pub fn remaining_attempts(&self, identifier: &str) -> u32 {
        let now = self.clock.now_ms();
        let used = self
            .attempts
            .get(identifier)
            .map(|attempts| attempts.iter().filter(|&&t| self.in_window(t, now)).count())
            .unwrap_or(0);

        (self.config.max_attempts as usize).saturating_sub(used) as u32
    }

    /// Number of identifiers with stored attempts, expired or not.
    pub fn tracked_identifiers(&self) -> usize {
        self.attempts.len()
    }

    // A clock that steps backwards yields an elapsed time of zero, which
    // keeps the entry rather than panicking.
    fn in_window(&self, timestamp: u64, now: u64) -> bool {
        now.saturating_sub(timestamp) < self.config.window_ms
    }

    fn until_oldest_expires(&self, attempts: &[u64], now: u64) -> Duration {
        let remaining_ms = attempts
            .iter()
            .min()
            .map(|&oldest| {
                self.config
                    .window_ms
                    .saturating_sub(now.saturating_sub(oldest))
            })
            .unwrap_or(self.config.window_ms);

        Duration::from_millis(remaining_ms)
    }
}
