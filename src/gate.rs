// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Submission gate: sanitize, validate, then rate limit.
//!
//! Submissions that fail validation never reach the limiter, so a typo in
//! an email address does not cost the visitor one of their attempts.

use crate::config::Config;
use crate::limiter::{RateLimitResult, RateLimiter};
use crate::submission::ContactSubmission;
use crate::validator::{ContactValidator, ValidationResult};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Rejected submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("Submission failed validation: {0}")]
    Invalid(ValidationResult),

    #[error("Too many submissions, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },
}

/// Submission that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admitted {
    /// Sanitized submission
    pub submission: ContactSubmission,
    /// Attempts left for the submitting client
    pub remaining: u32,
}

/// Composes the sanitizer, validator and limiter in front of delivery.
pub struct SubmissionGate {
    limiter: RateLimiter,
    validator: ContactValidator,
}

impl SubmissionGate {
    pub fn new(limiter: RateLimiter, validator: ContactValidator) -> Self {
        Self { limiter, validator }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            RateLimiter::new(config.rate_limit.clone()),
            ContactValidator::new(config.validation.clone()),
        )
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Run `raw` through the gate on behalf of `identifier`.
    pub fn admit(&self, identifier: &str, raw: &ContactSubmission) -> Result<Admitted, GateError> {
        let submission = raw.sanitized();

        let validation = self.validator.validate(&submission);
        if !validation.is_valid() {
            info!(
                target: "security",
                identifier,
                errors = %validation,
                "Submission failed validation"
            );
            return Err(GateError::Invalid(validation));
        }

        match self.limiter.check(identifier) {
            RateLimitResult::Allowed { remaining, .. } => {
                debug!(identifier, remaining, "Submission admitted");
                Ok(Admitted {
                    submission,
                    remaining,
                })
            }
            RateLimitResult::Limited { retry_after } => {
                warn!(
                    target: "security",
                    identifier,
                    retry_after_secs = retry_after.as_secs(),
                    "Submission rate limited"
                );
                Err(GateError::RateLimited { retry_after })
            }
        }
    }

    /// Attempts left for `identifier`, without recording one.
    pub fn remaining_attempts(&self, identifier: &str) -> u32 {
        self.limiter.remaining_attempts(identifier)
    }
}
