//! # ados_task
//!
//! Task analysis and decomposition for ADOS.
//!
//! This crate is the pure, stateless half of the orchestration core: it
//! turns a free-text task description into a structured plan of subtasks
//! with crew assignments, priorities, dependencies, and an execution order.
//! Nothing here mutates shared state or performs I/O, so every function can
//! be called from any thread without synchronization.
//!
//! # Architecture
//!
//! - **Crews**: named pools of work capacity with static keyword tables
//! - **Classifier**: keyword-overlap scoring from text to a crew
//! - **Decomposer**: complexity-tiered subtask templates
//! - **Graph**: dependency ordering and cycle detection
//! - **Validator**: structural checks and quality scoring for plans
//!
//! # Example
//!
//! ```rust,ignore
//! use ados_task::{classifier, decomposer};
//!
//! let crew = classifier::classify("Create an API endpoint");
//! let plan = decomposer::decompose("Create an API endpoint")?;
//! assert_eq!(plan.subtasks[0].crew, crew);
//! ```

pub mod classifier;
pub mod crew;
pub mod decomposer;
pub mod error;
pub mod graph;
pub mod models;
pub mod validator;

// Re-export main types for convenience
pub use classifier::{classify, crew_scores, involved_crews};
pub use crew::Crew;
pub use decomposer::{analyze_complexity, decompose, primary_action};
pub use error::{TaskError, TaskResult};
pub use graph::{dependency_graph, execution_order, has_cycle};
pub use models::{
    Action, Complexity, ComplexityAnalysis, ComplexityFactors, DurationEstimate, Effort, Priority,
    SubTask, TaskPlan,
};
pub use validator::{PlanValidator, ValidationReport};
