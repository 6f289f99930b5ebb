//! Error types for the task module.

use thiserror::Error;

/// Result type alias for task operations.
pub type TaskResult<T> = Result<T, TaskError>;

/// Errors that can occur during task analysis and decomposition.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Unknown crew: {0}")]
    UnknownCrew(String),

    #[error("Unknown priority: {0}")]
    UnknownPriority(String),

    #[error("Subtask {subtask} references unknown dependency: {dependency}")]
    UnknownDependency { subtask: String, dependency: String },

    #[error("Dependency cycle detected involving subtask: {0}")]
    DependencyCycle(String),
}
