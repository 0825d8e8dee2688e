// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact form payload.

use crate::sanitize::sanitize;
use serde::{Deserialize, Serialize};

/// A contact form submission as posted by the website.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default)]
    pub message: String,
    /// Consent to processing of the submitted personal data
    #[serde(default, alias = "gdprConsent")]
    pub gdpr_consent: bool,
}

impl ContactSubmission {
    /// Sanitize every free-text field. Optional fields that end up empty are
    /// dropped.
    pub fn sanitized(&self) -> Self {
        Self {
            name: sanitize(&self.name),
            email: sanitize(&self.email),
            phone: sanitize_optional(self.phone.as_deref()),
            budget: sanitize_optional(self.budget.as_deref()),
            message: sanitize(&self.message),
            gdpr_consent: self.gdpr_consent,
        }
    }
}

fn sanitize_optional(value: Option<&str>) -> Option<String> {
    value.map(sanitize).filter(|v| !v.is_empty())
}
