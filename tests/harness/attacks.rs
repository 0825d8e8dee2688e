// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Abuse patterns for security testing.

/// What each simulated request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Well-formed submission
    Valid,
    /// Submission with a malformed email address
    InvalidEmail,
    /// Well-formed fields with markup and script fragments in the text
    Injection,
}

/// Attack pattern configuration.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// Total number of submissions to send
    pub total_requests: usize,
    /// Simulated milliseconds between submissions
    pub interval_ms: u64,
    /// Number of distinct client identifiers to rotate through
    pub unique_clients: usize,
    /// Submission content
    pub payload: Payload,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            total_requests: 100,
            interval_ms: 100,
            unique_clients: 1,
            payload: Payload::Valid,
        }
    }
}

/// Predefined attack patterns.
impl AttackConfig {
    /// Single client flood - one browser hammering the form.
    pub fn single_client_flood() -> Self {
        Self {
            total_requests: 200,
            interval_ms: 100,
            ..Default::default()
        }
    }

    /// Distributed flood - many spoofed identifiers, ten submissions each.
    pub fn distributed_flood() -> Self {
        Self {
            total_requests: 1000,
            interval_ms: 10,
            unique_clients: 100,
            ..Default::default()
        }
    }

    /// Slow drip - one submission per window slot, never over the limit.
    pub fn slow_drip(window_ms: u64, max_attempts: u32) -> Self {
        Self {
            total_requests: 20,
            interval_ms: window_ms / u64::from(max_attempts.max(1)),
            ..Default::default()
        }
    }

    /// Invalid field spam - garbage that should never reach the limiter.
    pub fn invalid_field_spam() -> Self {
        Self {
            total_requests: 50,
            interval_ms: 50,
            payload: Payload::InvalidEmail,
            ..Default::default()
        }
    }

    /// Injection flood - script fragments from many clients.
    pub fn injection_flood() -> Self {
        Self {
            total_requests: 200,
            interval_ms: 10,
            unique_clients: 200,
            payload: Payload::Injection,
        }
    }

    /// Simulated duration of the attack in milliseconds.
    pub fn simulated_duration_ms(&self) -> u64 {
        self.total_requests as u64 * self.interval_ms
    }
}

/// Expected outcomes for different attack types.
pub struct AttackExpectations {
    /// Maximum number of submissions that may be admitted
    pub max_allowed: usize,
    /// Description of expected behavior
    pub description: &'static str,
}

impl AttackConfig {
    /// Get expected outcomes for this attack pattern, assuming the whole
    /// attack fits inside one window.
    pub fn expectations(&self, max_attempts: u32) -> AttackExpectations {
        match self.payload {
            Payload::InvalidEmail => AttackExpectations {
                max_allowed: 0,
                description: "All submissions should fail validation",
            },
            Payload::Valid | Payload::Injection => AttackExpectations {
                max_allowed: (self.unique_clients * max_attempts as usize).min(self.total_requests),
                description: "Each client is capped at max_attempts per window",
            },
        }
    }
}
