//! End-to-end tests for the orchestration service: dispatch routing,
//! fallback, queue draining, and system reporting.

use ados_orchestrator::{
    CrewStatus, HealthStatus, Orchestrator, SystemStatus,
};
use ados_task::{Crew, Priority};

/// Push a crew to load 90 (overloaded) with three critical dispatches.
async fn overload(orchestrator: &Orchestrator, description: &str, expected: Crew) {
    for _ in 0..3 {
        let outcome = orchestrator.dispatch(description, Priority::Critical).await;
        assert_eq!(outcome.assigned_crew(), Some(expected));
    }
    let health = orchestrator.crew_health(expected).await;
    assert_eq!(health.load, 90);
    assert_eq!(health.status, CrewStatus::Overloaded);
}

#[tokio::test]
async fn test_dispatch_routes_by_keyword() {
    let orchestrator = Orchestrator::new();

    let cases = [
        ("Create an API endpoint", Crew::Backend),
        ("Fix the login page styling", Crew::Frontend),
        ("Add token encryption to the auth flow", Crew::Security),
        ("Increase test coverage for the parser", Crew::Quality),
        ("Deploy the service to kubernetes", Crew::Deployment),
        ("Sync invoices with the external webhook", Crew::Integration),
        ("Organize next steps", Crew::Orchestrator),
    ];

    for (description, expected) in cases {
        let outcome = orchestrator.dispatch(description, Priority::Medium).await;
        assert_eq!(
            outcome.assigned_crew(),
            Some(expected),
            "wrong crew for: {description}"
        );
    }
}

#[tokio::test]
async fn test_dispatch_result_carries_post_dispatch_health() {
    let orchestrator = Orchestrator::new();

    let outcome = orchestrator
        .dispatch("Create an API endpoint", Priority::Critical)
        .await;

    let result = match outcome {
        ados_orchestrator::DispatchOutcome::Dispatched(result) => result,
        other => panic!("expected dispatch, got {other:?}"),
    };
    assert_eq!(result.assigned_crew, Crew::Backend);
    assert_eq!(result.crew_health.load, 30);
    assert_eq!(result.crew_health.status, CrewStatus::Ready);
}

#[tokio::test]
async fn test_queueing_when_target_and_alternate_are_saturated() {
    let orchestrator = Orchestrator::new();

    overload(&orchestrator, "Create an API endpoint", Crew::Backend).await;
    overload(&orchestrator, "Coordinate and plan the rollout", Crew::Orchestrator).await;

    // Backend and its only alternate are both overloaded now.
    let outcome = orchestrator
        .dispatch("Create an API endpoint", Priority::High)
        .await;
    assert!(!outcome.is_dispatched());

    let status = orchestrator.queue_status().await;
    assert_eq!(status.total_queued, 1);
    assert_eq!(status.by_crew.get(&Crew::Backend), Some(&1));
    assert_eq!(status.by_priority.get(&Priority::High), Some(&1));
    assert!(status.oldest_task.is_some());

    // Draining while the crew is still saturated is a no-op.
    assert!(orchestrator.process_queue().await.is_empty());
    assert_eq!(orchestrator.queue_status().await.total_queued, 1);

    // Four completions bring backend back to 50, which is ready again.
    for _ in 0..4 {
        orchestrator.complete(Crew::Backend, true).await;
    }
    assert_eq!(
        orchestrator.crew_health(Crew::Backend).await.status,
        CrewStatus::Ready
    );

    let processed = orchestrator.process_queue().await;
    assert_eq!(processed.len(), 1);
    assert_eq!(processed[0].assigned_crew, Crew::Backend);
    assert!(orchestrator.queue_status().await.total_queued == 0);
    assert_eq!(orchestrator.crew_health(Crew::Backend).await.load, 70);
}

#[tokio::test]
async fn test_queue_drains_highest_priority_first() {
    let orchestrator = Orchestrator::new();

    overload(&orchestrator, "Create an API endpoint", Crew::Backend).await;
    overload(&orchestrator, "Coordinate and plan the rollout", Crew::Orchestrator).await;

    for priority in [Priority::Low, Priority::Critical, Priority::Medium] {
        let outcome = orchestrator
            .dispatch("Create an API endpoint", priority)
            .await;
        assert!(!outcome.is_dispatched());
    }
    assert_eq!(orchestrator.queue_status().await.total_queued, 3);

    for _ in 0..4 {
        orchestrator.complete(Crew::Backend, true).await;
    }

    // Backend sits at 50. The critical task dispatches first and pushes
    // the load to 80, leaving backend busy, so the remaining two stay
    // queued until more capacity frees up.
    let processed = orchestrator.process_queue().await;
    assert_eq!(processed.len(), 1);
    assert_eq!(processed[0].priority, Priority::Critical);
    assert_eq!(orchestrator.queue_status().await.total_queued, 2);
    assert_eq!(orchestrator.crew_health(Crew::Backend).await.load, 80);

    for _ in 0..7 {
        orchestrator.complete(Crew::Backend, true).await;
    }

    let processed = orchestrator.process_queue().await;
    assert_eq!(processed.len(), 2);
    assert_eq!(processed[0].priority, Priority::Medium);
    assert_eq!(processed[1].priority, Priority::Low);
}

#[tokio::test]
async fn test_unavailable_crew_falls_back_then_recovers() {
    let orchestrator = Orchestrator::new();

    orchestrator.set_crew_available(Crew::Frontend, false).await;
    let health = orchestrator.crew_health(Crew::Frontend).await;
    assert_eq!(health.status, CrewStatus::Unavailable);
    // The error payload is reserved for unknown crew names.
    assert!(health.error.is_none());

    let outcome = orchestrator
        .dispatch("Restyle the settings page", Priority::Medium)
        .await;
    assert_eq!(outcome.assigned_crew(), Some(Crew::Orchestrator));

    orchestrator.set_crew_available(Crew::Frontend, true).await;
    let outcome = orchestrator
        .dispatch("Restyle the settings page", Priority::Medium)
        .await;
    assert_eq!(outcome.assigned_crew(), Some(Crew::Frontend));
}

#[tokio::test]
async fn test_overview_reflects_dispatch_activity() {
    let orchestrator = Orchestrator::new();

    let overview = orchestrator.overview().await;
    assert_eq!(overview.system_status, SystemStatus::Operational);
    assert_eq!(overview.total_crews, 7);
    assert_eq!(overview.active_tasks, 0);
    assert_eq!(overview.task_queue_length, 0);

    orchestrator
        .dispatch("Create an API endpoint", Priority::High)
        .await;
    orchestrator.complete(Crew::Backend, true).await;
    orchestrator.complete(Crew::Security, false).await;

    let overview = orchestrator.overview().await;
    assert_eq!(overview.active_tasks, 1);
    assert_eq!(overview.performance_metrics.tasks_completed, 1);
    assert_eq!(overview.performance_metrics.tasks_failed, 1);
    assert_eq!(
        overview.performance_metrics.crew_utilization.get(&Crew::Backend),
        Some(&1)
    );
    assert_eq!(overview.crew_health.len(), 7);
}

#[tokio::test]
async fn test_overview_status_degrades_with_crew_state() {
    let orchestrator = Orchestrator::new();

    overload(&orchestrator, "Create an API endpoint", Crew::Backend).await;
    assert_eq!(
        orchestrator.overview().await.system_status,
        SystemStatus::Stressed
    );

    orchestrator.set_crew_available(Crew::Quality, false).await;
    assert_eq!(
        orchestrator.overview().await.system_status,
        SystemStatus::Degraded
    );
}

#[tokio::test]
async fn test_health_check_reports_issues() {
    let orchestrator = Orchestrator::new();

    let report = orchestrator.health_check().await;
    assert_eq!(report.status, HealthStatus::Healthy);
    assert!(report.issues.is_empty());

    overload(&orchestrator, "Create an API endpoint", Crew::Backend).await;
    let report = orchestrator.health_check().await;
    assert_eq!(report.status, HealthStatus::Warning);
    assert!(report
        .issues
        .iter()
        .any(|issue| issue.contains("overloaded")));

    // One failure out of one completion trips the failure-rate gate.
    orchestrator.complete(Crew::Backend, false).await;
    let report = orchestrator.health_check().await;
    assert_eq!(report.status, HealthStatus::Critical);
    assert!(report
        .issues
        .iter()
        .any(|issue| issue.contains("failure rate")));
}
