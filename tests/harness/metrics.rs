// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Metrics collection for abuse simulation results.

use std::collections::HashMap;
use std::time::Duration;

/// Collects metrics during an abuse simulation.
#[derive(Debug, Default)]
pub struct AttackMetrics {
    /// Count of submissions by outcome
    outcomes: HashMap<Outcome, usize>,
    /// Admitted submissions by client
    allowed_per_client: HashMap<String, usize>,
    /// Count of submissions by client
    requests_per_client: HashMap<String, usize>,
    /// Latency samples (microseconds)
    latencies: Vec<u64>,
}

/// Possible outcomes for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Allowed,
    RateLimited,
    InvalidFields,
}

impl AttackMetrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submission outcome.
    pub fn record(&mut self, outcome: Outcome, client: &str, latency: Duration) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        *self.requests_per_client.entry(client.to_string()).or_insert(0) += 1;
        if outcome == Outcome::Allowed {
            *self.allowed_per_client.entry(client.to_string()).or_insert(0) += 1;
        }
        self.latencies.push(latency.as_micros() as u64);
    }

    /// Get total submission count.
    pub fn total_requests(&self) -> usize {
        self.outcomes.values().sum()
    }

    /// Get count for a specific outcome.
    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Highest number of admitted submissions for any one client.
    pub fn max_allowed_per_client(&self) -> usize {
        self.allowed_per_client.values().copied().max().unwrap_or(0)
    }

    /// Get block rate (ratio of blocked to total).
    pub fn block_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            return 0.0;
        }
        let allowed = self.count(Outcome::Allowed);
        (total - allowed) as f64 / total as f64
    }

    /// Get median latency in microseconds.
    pub fn median_latency_us(&self) -> u64 {
        if self.latencies.is_empty() {
            return 0;
        }
        let mut sorted = self.latencies.clone();
        sorted.sort_unstable();
        sorted[sorted.len() / 2]
    }

    /// Generate a summary report.
    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            total_requests: self.total_requests(),
            allowed: self.count(Outcome::Allowed),
            rate_limited: self.count(Outcome::RateLimited),
            validation_failed: self.count(Outcome::InvalidFields),
            block_rate: self.block_rate(),
            median_latency_us: self.median_latency_us(),
            unique_clients: self.requests_per_client.len(),
            max_allowed_per_client: self.max_allowed_per_client(),
        }
    }
}

/// Summary report of abuse metrics.
#[derive(Debug, Clone)]
pub struct MetricsReport {
    pub total_requests: usize,
    pub allowed: usize,
    pub rate_limited: usize,
    pub validation_failed: usize,
    pub block_rate: f64,
    pub median_latency_us: u64,
    pub unique_clients: usize,
    pub max_allowed_per_client: usize,
}

impl std::fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Abuse Metrics Report ===")?;
        writeln!(f, "Total Requests:    {}", self.total_requests)?;
        writeln!(f)?;
        writeln!(f, "--- Outcomes ---")?;
        writeln!(f, "Allowed:           {}", self.allowed)?;
        writeln!(f, "Rate Limited:      {}", self.rate_limited)?;
        writeln!(f, "Validation Failed: {}", self.validation_failed)?;
        writeln!(f, "Block Rate:        {:.1}%", self.block_rate * 100.0)?;
        writeln!(f)?;
        writeln!(f, "--- Distribution ---")?;
        writeln!(f, "Unique Clients:    {}", self.unique_clients)?;
        writeln!(f, "Max Per Client:    {}", self.max_allowed_per_client)?;
        writeln!(f, "Median Latency:    {} us", self.median_latency_us)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collection() {
        let mut metrics = AttackMetrics::new();

        metrics.record(Outcome::Allowed, "a", Duration::from_micros(100));
        metrics.record(Outcome::Allowed, "a", Duration::from_micros(150));
        metrics.record(Outcome::RateLimited, "a", Duration::from_micros(50));
        metrics.record(Outcome::Allowed, "b", Duration::from_micros(80));

        assert_eq!(metrics.total_requests(), 4);
        assert_eq!(metrics.count(Outcome::Allowed), 3);
        assert_eq!(metrics.max_allowed_per_client(), 2);
        assert_eq!(metrics.report().unique_clients, 2);
    }

    #[test]
    fn test_block_rate() {
        let mut metrics = AttackMetrics::new();
        for _ in 0..3 {
            metrics.record(Outcome::Allowed, "a", Duration::ZERO);
        }
        for _ in 0..7 {
            metrics.record(Outcome::RateLimited, "a", Duration::ZERO);
        }

        assert!((metrics.block_rate() - 0.7).abs() < 0.01);
    }
}
