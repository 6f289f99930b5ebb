//! The orchestrator service: a single owner for crew health, the wait
//! queue, and performance counters.
//!
//! All mutable state lives behind one `RwLock`, so compound sequences such
//! as load-increment plus utilization-count never interleave between
//! concurrent callers. Classification and decomposition stay pure and run
//! without the lock.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use ados_task::{classifier, decomposer, Crew, Priority, TaskPlan};

use crate::config::OrchestratorConfig;
use crate::dispatch::{alternates, DispatchOutcome, DispatchResult, DispatchStatus};
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::health::{CrewHealth, CrewStatus, HealthBoard};
use crate::metrics::PerformanceMetrics;
use crate::overview::{HealthReport, HealthStatus, SystemOverview, SystemStatus};
use crate::queue::{QueueStatus, QueuedTask, TaskQueue};

struct OrchestratorState {
    config: OrchestratorConfig,
    health: HealthBoard,
    queue: TaskQueue,
    metrics: PerformanceMetrics,
}

impl OrchestratorState {
    fn dispatch(&mut self, description: &str, priority: Priority) -> DispatchOutcome {
        let target = classifier::classify(description);
        debug!(
            "Dispatching task with priority {} to crew '{}': {}",
            priority, target, description
        );

        let health = self.health.monitor(target, &self.config);
        if !matches!(
            health.status,
            CrewStatus::Overloaded | CrewStatus::Unavailable
        ) {
            return DispatchOutcome::Dispatched(self.place(description, target, priority));
        }

        // Primary crew cannot take work: one hop through the fallback table.
        for &alternate in alternates(target) {
            let alternate_health = self.health.monitor(alternate, &self.config);
            if alternate_health.status.is_dispatchable() {
                info!("Redirecting task from '{}' to '{}'", target, alternate);
                return DispatchOutcome::Dispatched(self.place(description, alternate, priority));
            }
        }

        warn!("Crew '{}' unavailable, task queued", target);
        let queued = QueuedTask::new(description, target, priority);
        self.queue.push(queued.clone());
        DispatchOutcome::Queued(queued)
    }

    /// Place a task on a crew. Only called after routing succeeds, so the
    /// load increment and utilization count always happen together.
    fn place(&mut self, description: &str, crew: Crew, priority: Priority) -> DispatchResult {
        self.health.record_dispatch(crew, priority);
        self.metrics.record_dispatch(crew);
        let crew_health = self.health.monitor(crew, &self.config);

        info!("Task dispatched to crew '{}' successfully", crew);
        DispatchResult {
            task: description.to_string(),
            assigned_crew: crew,
            priority,
            status: DispatchStatus::Dispatched,
            timestamp: Utc::now(),
            crew_health,
        }
    }

    fn process_queue(&mut self) -> Vec<DispatchResult> {
        self.queue.sort_by_priority();

        let mut processed = Vec::new();
        let candidates: Vec<QueuedTask> = self.queue.items().to_vec();

        for item in candidates {
            let health = self.health.monitor(item.target_crew, &self.config);
            if !health.status.is_dispatchable() {
                continue;
            }

            self.queue.remove(item.id);
            match self.dispatch(&item.task, item.priority) {
                DispatchOutcome::Dispatched(result) => processed.push(result),
                // Re-queued under a fresh entry; picked up by a later drain.
                DispatchOutcome::Queued(_) => {}
            }
        }

        if !processed.is_empty() {
            info!("Queue drain dispatched {} task(s)", processed.len());
        }
        processed
    }

    fn complete(&mut self, crew: Crew, success: bool) {
        self.health.record_completion(crew, &self.config);
        self.metrics.record_completion(success);
        debug!("Task completed by crew '{}' (success: {})", crew, success);
    }

    fn overview(&mut self) -> SystemOverview {
        let crew_health = self.health.monitor_all(&self.config);
        let system_status = SystemStatus::derive(crew_health.values().map(|h| &h.status));

        SystemOverview {
            task_queue_length: self.queue.len(),
            active_tasks: self.health.active_crews(),
            system_status,
            uptime_seconds: self.metrics.uptime().num_seconds(),
            total_crews: Crew::ALL.len(),
            performance_metrics: self.metrics.clone(),
            crew_health,
        }
    }

    fn health_check(&mut self) -> HealthReport {
        let overview = self.overview();
        let mut status = HealthStatus::Healthy;
        let mut issues = Vec::new();

        if overview.task_queue_length > self.config.queue_warning_length {
            issues.push("Task queue is getting large".to_string());
            status = HealthStatus::Warning;
        }

        if overview
            .crew_health
            .values()
            .any(|h| h.status == CrewStatus::Overloaded)
        {
            issues.push("Some crews are overloaded".to_string());
            status = HealthStatus::Warning;
        }

        if self.metrics.failure_rate() > self.config.failure_rate_critical {
            issues.push("High task failure rate".to_string());
            status = HealthStatus::Critical;
        }

        HealthReport {
            status,
            timestamp: Utc::now(),
            issues,
            overview,
        }
    }
}

/// Handle to the orchestration service. One instance per process; clones
/// share the same underlying state.
#[derive(Clone)]
pub struct Orchestrator {
    state: Arc<RwLock<OrchestratorState>>,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::with_config(OrchestratorConfig::default())
    }

    pub fn with_config(config: OrchestratorConfig) -> Self {
        info!("Initializing orchestrator with {} crews", Crew::ALL.len());
        Self {
            state: Arc::new(RwLock::new(OrchestratorState {
                config,
                health: HealthBoard::new(),
                queue: TaskQueue::new(),
                metrics: PerformanceMetrics::new(),
            })),
        }
    }

    /// Decompose a task description into a subtask plan.
    ///
    /// Pure passthrough to [`ados_task::decompose`]; takes no lock.
    pub fn decompose(&self, description: &str) -> OrchestratorResult<TaskPlan> {
        Ok(decomposer::decompose(description)?)
    }

    /// Route a task to the best crew, falling back to an alternate or the
    /// wait queue when the target cannot take work.
    pub async fn dispatch(&self, description: &str, priority: Priority) -> DispatchOutcome {
        self.state.write().await.dispatch(description, priority)
    }

    /// Record a task completion for a crew.
    pub async fn complete(&self, crew: Crew, success: bool) {
        self.state.write().await.complete(crew, success);
    }

    /// Record a task completion for a crew referenced by name.
    pub async fn complete_by_name(&self, name: &str, success: bool) -> OrchestratorResult<()> {
        let crew: Crew = name
            .parse()
            .map_err(|_| OrchestratorError::UnknownCrew(name.to_string()))?;
        self.complete(crew, success).await;
        Ok(())
    }

    /// Drain the wait queue: re-dispatch queued tasks whose target crew
    /// has freed up, highest priority first. Intended to be called
    /// periodically by an external poller.
    pub async fn process_queue(&self) -> Vec<DispatchResult> {
        self.state.write().await.process_queue()
    }

    /// Health snapshot for one crew.
    pub async fn crew_health(&self, crew: Crew) -> CrewHealth {
        let mut state = self.state.write().await;
        let config = state.config.clone();
        state.health.monitor(crew, &config)
    }

    /// Health snapshot for a crew referenced by name. Unknown names get a
    /// structured `Unknown` snapshot rather than an error.
    pub async fn crew_health_by_name(&self, name: &str) -> CrewHealth {
        match name.parse::<Crew>() {
            Ok(crew) => self.crew_health(crew).await,
            Err(_) => CrewHealth::unknown(name),
        }
    }

    /// Mark a crew available or unavailable (external signal).
    pub async fn set_crew_available(&self, crew: Crew, available: bool) {
        if !available {
            warn!("Crew '{}' marked unavailable", crew);
        }
        self.state.write().await.health.set_available(crew, available);
    }

    /// Composition of the wait queue.
    pub async fn queue_status(&self) -> QueueStatus {
        self.state.read().await.queue.status()
    }

    /// Comprehensive snapshot of crews, counters, and queue.
    pub async fn overview(&self) -> SystemOverview {
        self.state.write().await.overview()
    }

    /// Health check with issue detection.
    pub async fn health_check(&self) -> HealthReport {
        self.state.write().await.health_check()
    }
}
