//! Dispatch results and the static crew fallback table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ados_task::{Crew, Priority};

use crate::health::CrewHealth;
use crate::queue::QueuedTask;

/// Terminal status of a dispatch attempt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStatus {
    Dispatched,
    Queued,
}

/// Successful placement of a task on a crew.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchResult {
    pub task: String,
    pub assigned_crew: Crew,
    pub priority: Priority,
    pub status: DispatchStatus,
    pub timestamp: DateTime<Utc>,
    /// Crew health after the load increment.
    pub crew_health: CrewHealth,
}

/// What a dispatch call resolved to. There is no silent no-op: every call
/// either places the task or queues it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DispatchOutcome {
    Dispatched(DispatchResult),
    Queued(QueuedTask),
}

impl DispatchOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, DispatchOutcome::Dispatched(_))
    }

    pub fn assigned_crew(&self) -> Option<Crew> {
        match self {
            DispatchOutcome::Dispatched(result) => Some(result.assigned_crew),
            DispatchOutcome::Queued(_) => None,
        }
    }
}

/// Alternate crews tried when the primary target cannot take work.
///
/// One hop only: the first healthy alternate receives the task; an
/// unhealthy alternate never cascades into its own alternates.
pub fn alternates(crew: Crew) -> &'static [Crew] {
    match crew {
        Crew::Orchestrator => &[Crew::Backend, Crew::Quality],
        _ => &[Crew::Orchestrator],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_crew_has_an_alternate() {
        for crew in Crew::ALL {
            let alts = alternates(crew);
            assert!(!alts.is_empty());
            assert!(!alts.contains(&crew), "{} lists itself as alternate", crew);
        }
    }

    #[test]
    fn test_orchestrator_falls_back_to_workers() {
        assert_eq!(
            alternates(Crew::Orchestrator),
            &[Crew::Backend, Crew::Quality]
        );
        assert_eq!(alternates(Crew::Backend), &[Crew::Orchestrator]);
    }
}
