// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Contact form field validation.
//!
//! Implements the checks applied before a submission is rate limited:
//! - Email shape (RFC 5322 style local part, label-based domain)
//! - Phone shape (Romanian national and international formats)
//! - Required fields, length limits and budget choices
//! - Data processing consent

use crate::config::ValidationConfig;
use crate::submission::ContactSubmission;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

const PHONE_MIN_LENGTH: usize = 8;
const PHONE_MAX_LENGTH: usize = 13;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    )
    .unwrap();
    static ref PHONE_SEPARATORS: Regex = Regex::new(r"[\s\-()]").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^(?:\+40|40|\+4|4|0)?[0-9]{8,9}$").unwrap();
}

/// Check that `email` looks like a deliverable address.
pub fn validate_email(email: &str) -> bool {
    email.len() <= EMAIL_MAX_LENGTH && EMAIL_RE.is_match(email)
}

/// Check that `phone` looks like a phone number once spaces, hyphens and
/// parentheses are removed.
///
/// Accepts `+40722123456`, `0722123456` and `722123456` style numbers.
pub fn validate_phone(phone: &str) -> bool {
    let cleaned = PHONE_SEPARATORS.replace_all(phone, "");
    (PHONE_MIN_LENGTH..=PHONE_MAX_LENGTH).contains(&cleaned.len()) && PHONE_RE.is_match(&cleaned)
}

/// Contact form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Phone,
    Budget,
    Message,
    Consent,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Budget => "budget",
            Self::Message => "message",
            Self::Consent => "consent",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("This field is required")]
    Missing,

    #[error("Must be at most {max} characters")]
    TooLong { max: usize },

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid phone number")]
    InvalidPhone,

    #[error("Unknown budget option: {0}")]
    UnknownBudget(String),

    #[error("Consent to data processing is required")]
    ConsentRequired,
}

/// Per-field validation outcome. Empty when the submission is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<Field, ValidationError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: Field) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    pub fn errors(&self) -> &BTreeMap<Field, ValidationError> {
        &self.errors
    }

    /// Field name to user-facing message.
    pub fn messages(&self) -> BTreeMap<&'static str, String> {
        self.errors
            .iter()
            .map(|(field, err)| (field.as_str(), err.to_string()))
            .collect()
    }

    fn reject(&mut self, field: Field, err: ValidationError) {
        debug!(field = %field, error = %err, "Field rejected");
        self.errors.insert(field, err);
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, err) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, err)?;
            first = false;
        }
        Ok(())
    }
}

/// Contact submission validator.
pub struct ContactValidator {
    config: ValidationConfig,
}

impl ContactValidator {
    /// Create a new validator with the given configuration.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate every field of `submission`, collecting all failures.
    pub fn validate(&self, submission: &ContactSubmission) -> ValidationResult {
        let mut result = ValidationResult::default();

        if let Some(err) = self.check_text(&submission.name, self.config.max_name_len) {
            result.reject(Field::Name, err);
        }

        if submission.email.is_empty() {
            result.reject(Field::Email, ValidationError::Missing);
        } else if !validate_email(&submission.email) {
            result.reject(Field::Email, ValidationError::InvalidEmail);
        }

        if let Some(phone) = submission.phone.as_deref() {
            if !validate_phone(phone) {
                result.reject(Field::Phone, ValidationError::InvalidPhone);
            }
        }

        if let Some(budget) = submission.budget.as_deref() {
            if !self.config.allowed_budgets.iter().any(|b| b == budget) {
                result.reject(Field::Budget, ValidationError::UnknownBudget(budget.to_string()));
            }
        }

        if let Some(err) = self.check_text(&submission.message, self.config.max_message_len) {
            result.reject(Field::Message, err);
        }

        if !submission.gdpr_consent {
            result.reject(Field::Consent, ValidationError::ConsentRequired);
        }

        result
    }

    fn check_text(&self, value: &str, max: usize) -> Option<ValidationError> {
        if value.trim().is_empty() {
            Some(ValidationError::Missing)
        } else if value.chars().count() > max {
            Some(ValidationError::TooLong { max })
        } else {
            None
        }
    }
}
