// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test data generators for abuse simulation.

use super::attacks::Payload;
use contact_guard::ContactSubmission;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref REMOVED_PATTERN: Regex = Regex::new(r"(?i-u)[<>]|javascript:|on\w+=").unwrap();
}

/// Generate a pool of client identifiers shaped like User-Agent + Host.
pub fn generate_identifiers(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("Mozilla/5.0 (bot {})-example.ro", i))
        .collect()
}

/// A submission for request number `index`.
pub fn submission(payload: Payload, index: usize) -> ContactSubmission {
    let base = ContactSubmission {
        name: format!("Visitor {}", index),
        email: format!("visitor{}@example.com", index),
        phone: Some("0722 123 456".to_string()),
        budget: Some("sub-5000".to_string()),
        message: "Hello, I would like an offer.".to_string(),
        gdpr_consent: true,
    };

    match payload {
        Payload::Valid => base,
        Payload::InvalidEmail => {
            let emails = generate_malformed_emails();
            ContactSubmission {
                email: emails[index % emails.len()].to_string(),
                ..base
            }
        }
        Payload::Injection => {
            let payloads = generate_injection_payloads();
            let fragment = payloads[index % payloads.len()];
            ContactSubmission {
                name: format!("Visitor {}", fragment),
                message: format!("Hi {} there", fragment),
                ..base
            }
        }
    }
}

/// Markup and script fragments a denylist should defuse.
pub fn generate_injection_payloads() -> Vec<&'static str> {
    vec![
        "<script>alert(1)</script>",
        "<img src=x onerror=alert(1)>",
        "javascript:alert(document.cookie)",
        "JaVaScRiPt:alert(1)",
        "<a href=\"javascript:void(0)\" onclick=steal()>x</a>",
        "<svg onload=alert(1)>",
        "<body ONLOAD=alert(1)>",
        "\" onmouseover=alert(1) x=\"",
        "<iframe src=javascript:alert(1)>",
    ]
}

/// Email values the validator must reject.
pub fn generate_malformed_emails() -> Vec<&'static str> {
    vec![
        "not-an-email",
        "@example.com",
        "user@",
        "user@@example.com",
        "user@-example.com",
        "user@example..com",
        "user name@example.com",
        "user@exa_mple.com",
    ]
}

/// Phone values the validator must reject.
pub fn generate_malformed_phones() -> Vec<&'static str> {
    vec![
        "123",
        "phone",
        "+1 (555) 123-4567-890",
        "0722.123.456",
        "+40 722 123 456 789",
        "07221234567890",
    ]
}

/// True if `text` still contains a fragment the sanitizer removes.
pub fn contains_removed_pattern(text: &str) -> bool {
    REMOVED_PATTERN.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_identifiers() {
        let ids = generate_identifiers(256);
        assert_eq!(ids.len(), 256);
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 256);
    }

    #[test]
    fn test_contains_removed_pattern() {
        assert!(contains_removed_pattern("<b>"));
        assert!(contains_removed_pattern("JAVASCRIPT:x"));
        assert!(contains_removed_pattern("a onClick=b"));
        assert!(contains_removed_pattern("x ON_load9=y"));
        assert!(!contains_removed_pattern("on="));
        assert!(!contains_removed_pattern("online = yes"));
        assert!(!contains_removed_pattern("Hello there"));
    }
}
