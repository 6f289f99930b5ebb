//! Process-wide performance counters.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ados_task::Crew;

/// Counters for dispatches and completions, kept for the process lifetime.
/// Resetting requires constructing a fresh orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub tasks_completed: u64,
    pub tasks_failed: u64,
    pub crew_utilization: BTreeMap<Crew, u64>,
    pub start_time: DateTime<Utc>,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMetrics {
    pub fn new() -> Self {
        Self {
            tasks_completed: 0,
            tasks_failed: 0,
            crew_utilization: BTreeMap::new(),
            start_time: Utc::now(),
        }
    }

    /// Count a successful dispatch against a crew.
    pub fn record_dispatch(&mut self, crew: Crew) {
        *self.crew_utilization.entry(crew).or_insert(0) += 1;
    }

    pub fn record_completion(&mut self, success: bool) {
        if success {
            self.tasks_completed += 1;
        } else {
            self.tasks_failed += 1;
        }
    }

    /// Fraction of finished tasks that failed; zero while nothing finished.
    pub fn failure_rate(&self) -> f64 {
        let total = self.tasks_completed + self.tasks_failed;
        self.tasks_failed as f64 / total.max(1) as f64
    }

    pub fn uptime(&self) -> chrono::Duration {
        Utc::now() - self.start_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utilization_counts() {
        let mut metrics = PerformanceMetrics::new();
        metrics.record_dispatch(Crew::Backend);
        metrics.record_dispatch(Crew::Backend);
        metrics.record_dispatch(Crew::Quality);

        assert_eq!(metrics.crew_utilization.get(&Crew::Backend), Some(&2));
        assert_eq!(metrics.crew_utilization.get(&Crew::Quality), Some(&1));
    }

    #[test]
    fn test_failure_rate() {
        let mut metrics = PerformanceMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        metrics.record_completion(true);
        metrics.record_completion(true);
        metrics.record_completion(true);
        metrics.record_completion(false);
        assert_eq!(metrics.failure_rate(), 0.25);
    }

    #[test]
    fn test_uptime_is_non_negative() {
        let metrics = PerformanceMetrics::new();
        assert!(metrics.uptime().num_milliseconds() >= 0);
    }
}
