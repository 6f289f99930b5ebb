//! Aggregated system status snapshots.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ados_task::Crew;

use crate::health::{CrewHealth, CrewStatus};
use crate::metrics::PerformanceMetrics;

/// Overall system condition derived from the crew statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SystemStatus {
    Operational,
    Degraded,
    Stressed,
    Mixed,
}

impl SystemStatus {
    /// Any unavailable crew degrades the system; otherwise any overloaded
    /// crew stresses it; all ready/active crews mean operational.
    pub fn derive<'a>(statuses: impl IntoIterator<Item = &'a CrewStatus>) -> SystemStatus {
        let statuses: Vec<&CrewStatus> = statuses.into_iter().collect();

        if statuses.iter().any(|s| **s == CrewStatus::Unavailable) {
            SystemStatus::Degraded
        } else if statuses.iter().any(|s| **s == CrewStatus::Overloaded) {
            SystemStatus::Stressed
        } else if statuses
            .iter()
            .all(|s| matches!(s, CrewStatus::Ready | CrewStatus::Active))
        {
            SystemStatus::Operational
        } else {
            SystemStatus::Mixed
        }
    }
}

/// Read-only snapshot of the whole orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemOverview {
    pub crew_health: BTreeMap<Crew, CrewHealth>,
    pub performance_metrics: PerformanceMetrics,
    pub task_queue_length: usize,
    /// Crews currently carrying load.
    pub active_tasks: usize,
    pub system_status: SystemStatus,
    pub uptime_seconds: i64,
    pub total_crews: usize,
}

/// Health check verdict.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

/// Result of a comprehensive health check, including the issues found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub issues: Vec<String>,
    pub overview: SystemOverview,
}
