// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus metrics for submission outcomes.

use prometheus::{Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

/// Final outcome of a submission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Accepted,
    Invalid,
    RateLimited,
    MailFailed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Invalid => "invalid",
            Self::RateLimited => "rate_limited",
            Self::MailFailed => "mail_failed",
        }
    }
}

/// Service metrics, registered on a private registry.
pub struct Metrics {
    registry: Registry,
    submissions: IntCounterVec,
    tracked_identifiers: IntGauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let submissions = IntCounterVec::new(
            Opts::new("contact_submissions_total", "Contact submissions by outcome"),
            &["outcome"],
        )?;
        let tracked_identifiers = IntGauge::new(
            "contact_tracked_identifiers",
            "Identifiers currently held by the attempt limiter",
        )?;

        registry.register(Box::new(submissions.clone()))?;
        registry.register(Box::new(tracked_identifiers.clone()))?;

        Ok(Self {
            registry,
            submissions,
            tracked_identifiers,
        })
    }

    pub fn record(&self, outcome: Outcome) {
        self.submissions.with_label_values(&[outcome.as_str()]).inc();
    }

    pub fn submissions(&self, outcome: Outcome) -> u64 {
        self.submissions.with_label_values(&[outcome.as_str()]).get()
    }

    pub fn set_tracked_identifiers(&self, count: usize) {
        self.tracked_identifiers.set(count as i64);
    }

    /// Text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
