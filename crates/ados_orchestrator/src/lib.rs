//! ADOS orchestration service: crew-aware task dispatch.
//!
//! Routes incoming task descriptions to the best-matching crew, tracking a
//! synthetic load per crew so that overloaded or unavailable crews are
//! skipped in favor of an alternate or the wait queue. Decomposition of
//! large tasks into subtask plans is delegated to [`ados_task`].
//!
//! The entry point is [`Orchestrator`], a cloneable handle over shared
//! state behind an async `RwLock`.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod health;
pub mod metrics;
pub mod orchestrator;
pub mod overview;
pub mod queue;

pub use config::OrchestratorConfig;
pub use dispatch::{DispatchOutcome, DispatchResult, DispatchStatus};
pub use error::{OrchestratorError, OrchestratorResult};
pub use health::{CrewHealth, CrewStatus};
pub use metrics::PerformanceMetrics;
pub use orchestrator::Orchestrator;
pub use overview::{HealthReport, HealthStatus, SystemOverview, SystemStatus};
pub use queue::{QueueStatus, QueuedTask};
