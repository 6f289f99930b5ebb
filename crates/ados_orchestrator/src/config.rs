//! Orchestrator tuning knobs.

use serde::{Deserialize, Serialize};

/// Thresholds and deltas driving health derivation and health checks.
///
/// Defaults reproduce the stock ADOS behavior; callers embedding the
/// orchestrator can deserialize an override from their own config layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Load above which a crew is considered busy (exclusive).
    pub busy_threshold: u32,
    /// Load above which a crew is considered overloaded (exclusive).
    pub overload_threshold: u32,
    /// Flat load decrement applied when a crew completes a task.
    pub completion_decrement: u32,
    /// Queue length above which the health check raises a warning.
    pub queue_warning_length: usize,
    /// Failure rate above which the health check reports critical.
    pub failure_rate_critical: f64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            busy_threshold: 50,
            overload_threshold: 80,
            completion_decrement: 10,
            queue_warning_length: 50,
            failure_rate_critical: 0.1,
        }
    }
}
