// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact email composition and the delivery seam.
//!
//! Actual delivery belongs to an external provider. The bundled
//! [`LogMailer`] records the prepared message through `tracing`.

use crate::config::MailConfig;
use crate::submission::ContactSubmission;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use tracing::info;

/// Mail delivery error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MailError {
    #[error("No recipients configured")]
    NoRecipients,

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// A prepared contact email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    pub reply_to: String,
}

impl ContactEmail {
    /// Compose the notification for an admitted submission.
    pub fn compose(submission: &ContactSubmission, config: &MailConfig, sent_at: DateTime<Utc>) -> Self {
        let phone = submission.phone.as_deref().unwrap_or("Not provided");
        let budget = submission.budget.as_deref().unwrap_or("Not specified");

        let text = format!(
            "New message from the website:\n\
             \n\
             Name: {}\n\
             Email: {}\n\
             Phone: {}\n\
             Budget: {}\n\
             \n\
             Message:\n\
             {}\n\
             \n\
             ---\n\
             Sent at {}",
            submission.name,
            submission.email,
            phone,
            budget,
            submission.message,
            sent_at.format("%Y-%m-%d %H:%M:%S UTC"),
        );

        Self {
            from: config.from.clone(),
            to: config.to.clone(),
            subject: format!("New website message - {}", submission.name),
            text,
            reply_to: submission.email.clone(),
        }
    }
}

/// Future returned by [`Mailer::deliver`].
pub type DeliveryFuture<'a> = Pin<Box<dyn Future<Output = Result<(), MailError>> + Send + 'a>>;

/// Delivers composed contact emails.
///
/// Delivery is awaited by the request handler, so providers that talk to a
/// remote API must not block the calling thread.
pub trait Mailer: Send + Sync {
    fn deliver<'a>(&'a self, email: &'a ContactEmail) -> DeliveryFuture<'a>;
}

/// Mailer that only logs the prepared email.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn deliver<'a>(&'a self, email: &'a ContactEmail) -> DeliveryFuture<'a> {
        Box::pin(async move {
            if email.to.is_empty() {
                return Err(MailError::NoRecipients);
            }

            info!(
                from = %email.from,
                to = ?email.to,
                subject = %email.subject,
                reply_to = %email.reply_to,
                body_len = email.text.len(),
                "Contact email prepared"
            );
            Ok(())
        })
    }
}
