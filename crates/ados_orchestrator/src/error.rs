//! Error types for the orchestrator module.

use thiserror::Error;

/// Result type alias for orchestrator operations.
pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

/// Errors that can occur during orchestration.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Unknown crew: {0}")]
    UnknownCrew(String),

    #[error(transparent)]
    Task(#[from] ados_task::TaskError),
}
