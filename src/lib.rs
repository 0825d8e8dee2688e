// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Guard
//!
//! This crate gates website contact form submissions before they are
//! forwarded to an email provider:
//!
//! - Free-text sanitization (angle brackets, `javascript:`, inline handlers)
//! - Email and phone shape validation
//! - Per-client sliding window rate limiting (5 per 15 minutes default)
//! - Contact email composition behind a pluggable mailer

pub mod clock;
pub mod config;
pub mod gate;
pub mod handlers;
pub mod identity;
pub mod limiter;
pub mod mail;
pub mod metrics;
pub mod sanitize;
pub mod submission;
pub mod validator;

pub use config::Config;
pub use gate::{Admitted, GateError, SubmissionGate};
pub use limiter::{RateLimitResult, RateLimiter};
pub use sanitize::sanitize;
pub use submission::ContactSubmission;
pub use validator::{validate_email, validate_phone, ContactValidator, ValidationResult};
