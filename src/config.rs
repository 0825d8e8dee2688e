// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the contact guard service.
//!
//! Defaults match the contact form this service fronts: five submissions
//! per fifteen minutes per client.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration for the contact guard service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Field validation configuration
    #[serde(default)]
    pub validation: ValidationConfig,

    /// How rate-limit identifiers are derived from a request
    #[serde(default)]
    pub identifier: IdentifierSource,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Outgoing mail envelope
    #[serde(default)]
    pub mail: MailConfig,
}

/// Sliding window limits for submission attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Accepted attempts per identifier inside one window (default: 5)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Trailing window length in milliseconds (default: 900000)
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

/// Validation limits for contact form fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum name length in characters (default: 100)
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,

    /// Maximum message length in characters (default: 5000)
    #[serde(default = "default_max_message_len")]
    pub max_message_len: usize,

    /// Accepted budget choices
    #[serde(default = "default_budgets")]
    pub allowed_budgets: Vec<String>,
}

/// Source of the rate-limit identifier.
///
/// `ClientMetadata` is client-supplied and spoofable. It slows down casual
/// abuse and is not an authentication boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierSource {
    /// User-Agent and Host headers
    #[default]
    ClientMetadata,
    /// Remote socket address
    PeerAddress,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

/// Envelope used for composed contact emails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_mail_from")]
    pub from: String,

    #[serde(default = "default_mail_to")]
    pub to: Vec<String>,
}

/// Configuration loading error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_attempts() -> u32 {
    5
}

fn default_window_ms() -> u64 {
    15 * 60 * 1000
}

fn default_max_name_len() -> usize {
    100
}

fn default_max_message_len() -> usize {
    5000
}

fn default_budgets() -> Vec<String> {
    ["sub-5000", "5000-10000", "10000-25000", "peste-25000"]
        .iter()
        .map(|b| b.to_string())
        .collect()
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

fn default_mail_from() -> String {
    "Website Contact <contact@localhost>".to_string()
}

fn default_mail_to() -> Vec<String> {
    vec!["contact@localhost".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            rate_limit: RateLimitConfig::default(),
            validation: ValidationConfig::default(),
            identifier: IdentifierSource::default(),
            metrics: MetricsConfig::default(),
            mail: MailConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            window_ms: default_window_ms(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_name_len: default_max_name_len(),
            max_message_len: default_max_message_len(),
            allowed_budgets: default_budgets(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from: default_mail_from(),
            to: default_mail_to(),
        }
    }
}

impl RateLimitConfig {
    /// Get the rate window duration
    pub fn window_duration(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a key lookup, falling back to defaults for
    /// unset keys.
    ///
    /// Recognised keys: `BIND_ADDR`, `MAX_ATTEMPTS`, `WINDOW_MS`,
    /// `IDENTIFIER_SOURCE` (`client` or `peer`), `METRICS_ENABLED`,
    /// `MAIL_FROM`, `MAIL_TO` (comma separated).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(value) = lookup("MAX_ATTEMPTS") {
            config.rate_limit.max_attempts = parse_value("MAX_ATTEMPTS", value)?;
        }
        if let Some(value) = lookup("WINDOW_MS") {
            config.rate_limit.window_ms = parse_value("WINDOW_MS", value)?;
        }
        if let Some(value) = lookup("IDENTIFIER_SOURCE") {
            config.identifier = match value.trim().to_lowercase().as_str() {
                "client" | "client_metadata" => IdentifierSource::ClientMetadata,
                "peer" | "peer_address" => IdentifierSource::PeerAddress,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "IDENTIFIER_SOURCE",
                        value,
                    })
                }
            };
        }
        if let Some(value) = lookup("METRICS_ENABLED") {
            config.metrics.enabled = parse_value("METRICS_ENABLED", value)?;
        }
        if let Some(from) = lookup("MAIL_FROM") {
            config.mail.from = from;
        }
        if let Some(to) = lookup("MAIL_TO") {
            config.mail.to = to
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }

        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}
