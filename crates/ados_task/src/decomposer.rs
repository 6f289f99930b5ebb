//! Task decomposition: complexity analysis, action detection, and the
//! per-tier subtask templates.
//!
//! Decomposition is deterministic: the same description always produces a
//! structurally identical plan (same ids, titles, crews, dependencies).

use std::collections::BTreeMap;

use chrono::Utc;
use regex::Regex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::classifier::{crew_scores, involved_crews};
use crate::crew::Crew;
use crate::error::TaskResult;
use crate::graph;
use crate::models::{
    Action, Complexity, ComplexityAnalysis, ComplexityFactors, DurationEstimate, Effort, Priority,
    SubTask, TaskPlan,
};

/// Complexity adjective keywords per tier, checked in tier order.
const COMPLEXITY_KEYWORDS: [(Complexity, &[&str]); 4] = [
    (
        Complexity::Simple,
        &["simple", "basic", "straightforward", "easy", "quick"],
    ),
    (
        Complexity::Moderate,
        &["moderate", "standard", "normal", "medium", "regular"],
    ),
    (
        Complexity::Complex,
        &["complex", "advanced", "sophisticated", "intricate", "detailed"],
    ),
    (
        Complexity::High,
        &["high", "very", "extremely", "highly", "massive", "comprehensive"],
    ),
];

const INTEGRATION_FACTOR_KEYWORDS: [&str; 5] =
    ["integrate", "connect", "sync", "third-party", "external"];
const SECURITY_FACTOR_KEYWORDS: [&str; 4] = ["security", "auth", "permission", "encryption"];
const PERFORMANCE_FACTOR_KEYWORDS: [&str; 4] = ["performance", "speed", "optimization", "scale"];
const UI_FACTOR_KEYWORDS: [&str; 5] = ["ui", "interface", "component", "page", "view"];
const DATA_FACTOR_KEYWORDS: [&str; 5] = ["data", "database", "model", "schema", "query"];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Analyze the complexity of a task description.
///
/// The base score comes from the strongest adjective-keyword tier (ties
/// break by tier order, no hits default to moderate); each true boolean
/// factor adds one point; the total maps to a tier via fixed thresholds.
pub fn analyze_complexity(description: &str) -> ComplexityAnalysis {
    let text = description.to_lowercase();

    let mut keyword_matches = BTreeMap::new();
    let mut max_level = None;
    let mut max_hits = 0;
    for (level, keywords) in COMPLEXITY_KEYWORDS {
        let hits = keywords.iter().filter(|k| text.contains(*k)).count();
        if hits > 0 {
            keyword_matches.insert(level, hits);
            if hits > max_hits {
                max_level = Some(level);
                max_hits = hits;
            }
        }
    }
    let base_level = max_level.unwrap_or(Complexity::Moderate);

    let matched_crews = crew_scores(&text)
        .into_iter()
        .filter(|(_, score)| *score > 0)
        .count();

    let factors = ComplexityFactors {
        multiple_crews: matched_crews > 1,
        integration_required: contains_any(&text, &INTEGRATION_FACTOR_KEYWORDS),
        security_concerns: contains_any(&text, &SECURITY_FACTOR_KEYWORDS),
        performance_critical: contains_any(&text, &PERFORMANCE_FACTOR_KEYWORDS),
        ui_components: contains_any(&text, &UI_FACTOR_KEYWORDS),
        data_processing: contains_any(&text, &DATA_FACTOR_KEYWORDS),
    };

    let score = base_level.base_score() + factors.count();

    ComplexityAnalysis {
        level: Complexity::from_score(score),
        score,
        factors,
        keyword_matches,
    }
}

/// Detect the primary action verb; defaults to [`Action::Create`].
pub fn primary_action(description: &str) -> Action {
    let text = description.to_lowercase();
    for action in Action::ALL {
        // Patterns are static alternation lists; compilation cannot fail.
        let re = Regex::new(action.pattern()).expect("invalid action pattern");
        if re.is_match(&text) {
            return action;
        }
    }
    Action::Create
}

/// Decompose a free-text task description into an ordered plan of subtasks.
///
/// Never backtracks or repairs: a cycle in a generated template is a
/// template-authoring bug and is surfaced as an error.
pub fn decompose(description: &str) -> TaskResult<TaskPlan> {
    debug!("Decomposing task: {}", description);

    let complexity = analyze_complexity(description);
    let action = primary_action(description);
    let crews = involved_crews(description);

    let subtasks = match complexity.level {
        Complexity::Simple => simple_subtasks(description, action, &crews),
        Complexity::Moderate => moderate_subtasks(description, &crews),
        Complexity::Complex => complex_subtasks(description, &crews),
        Complexity::High => high_subtasks(description, &crews),
    };

    let execution_order = graph::execution_order(&subtasks)?;
    let dependency_graph = graph::dependency_graph(&subtasks);

    let mut crew_distribution = BTreeMap::new();
    for task in &subtasks {
        *crew_distribution.entry(task.crew).or_insert(0) += 1;
    }

    let total_hours: f64 = subtasks.iter().map(|t| t.estimated_effort.hours()).sum();
    let estimated_duration = DurationEstimate::from_total_hours(total_hours);

    info!(
        "Task decomposed into {} subtasks ({} complexity, {})",
        subtasks.len(),
        complexity.level,
        estimated_duration
    );

    Ok(TaskPlan {
        id: Uuid::new_v4(),
        original_task: description.to_string(),
        subtasks,
        execution_order,
        estimated_duration,
        complexity,
        crew_distribution,
        dependency_graph,
        created_at: Utc::now(),
    })
}

fn subtask_id(n: usize) -> String {
    format!("subtask_{}", n)
}

fn criteria(items: &[&str]) -> Vec<String> {
    items.iter().map(|c| c.to_string()).collect()
}

fn tags(items: &[&str]) -> Vec<String> {
    items.iter().map(|t| t.to_string()).collect()
}

/// Simple tier: one subtask for the first involved crew.
fn simple_subtasks(description: &str, action: Action, crews: &[Crew]) -> Vec<SubTask> {
    let main_crew = crews.first().copied().unwrap_or(Crew::Orchestrator);

    vec![SubTask {
        id: subtask_id(1),
        title: format!("{} implementation", action.title()),
        description: description.to_string(),
        crew: main_crew,
        priority: Priority::Medium,
        estimated_effort: Effort::Hours1To2,
        dependencies: Vec::new(),
        acceptance_criteria: criteria(&[
            "Implementation completed successfully",
            "Basic functionality working",
            "No critical errors",
        ]),
        complexity: Complexity::Simple,
        tags: tags(&["main", action.as_str()]),
    }]
}

/// Moderate tier: planning, up to three per-crew implementations, and an
/// integration subtask when more than one crew is involved.
fn moderate_subtasks(description: &str, crews: &[Crew]) -> Vec<SubTask> {
    let mut subtasks = vec![SubTask {
        id: subtask_id(1),
        title: "Planning and analysis".to_string(),
        description: format!("Analyze requirements and plan implementation for: {}", description),
        crew: Crew::Orchestrator,
        priority: Priority::High,
        estimated_effort: Effort::Hours1To2,
        dependencies: Vec::new(),
        acceptance_criteria: criteria(&[
            "Requirements analyzed",
            "Implementation plan created",
            "Dependencies identified",
        ]),
        complexity: Complexity::Simple,
        tags: tags(&["planning", "analysis"]),
    }];

    let mut implementation_ids = Vec::new();
    for &crew in crews.iter().take(3) {
        let id = subtask_id(subtasks.len() + 1);
        implementation_ids.push(id.clone());
        subtasks.push(SubTask {
            id,
            title: format!("{} implementation", crew.title()),
            description: format!("Implement {}-specific components for: {}", crew, description),
            crew,
            priority: Priority::Medium,
            estimated_effort: Effort::Hours4To8,
            dependencies: vec![subtask_id(1)],
            acceptance_criteria: criteria(&[
                &format!("{} components implemented", crew.title()),
                "Integration points defined",
                "Basic testing completed",
            ]),
            complexity: Complexity::Moderate,
            tags: tags(&["implementation", crew.as_str()]),
        });
    }

    if crews.len() > 1 {
        subtasks.push(SubTask {
            id: subtask_id(subtasks.len() + 1),
            title: "Integration and testing".to_string(),
            description: "Integrate components and test complete solution".to_string(),
            crew: Crew::Quality,
            priority: Priority::High,
            estimated_effort: Effort::Hours2To4,
            dependencies: implementation_ids,
            acceptance_criteria: criteria(&[
                "All components integrated",
                "End-to-end testing completed",
                "Quality checks passed",
            ]),
            complexity: Complexity::Moderate,
            tags: tags(&["integration", "testing"]),
        });
    }

    subtasks
}

/// Complex tier: discovery, architecture, up to four per-crew phases,
/// system integration, and deployment.
fn complex_subtasks(description: &str, crews: &[Crew]) -> Vec<SubTask> {
    let mut subtasks = vec![
        SubTask {
            id: subtask_id(1),
            title: "Discovery and requirements analysis".to_string(),
            description: format!("Comprehensive analysis of requirements for: {}", description),
            crew: Crew::Orchestrator,
            priority: Priority::High,
            estimated_effort: Effort::Hours4To8,
            dependencies: Vec::new(),
            acceptance_criteria: criteria(&[
                "Detailed requirements documented",
                "Technical specifications created",
                "Risk analysis completed",
                "Resource requirements identified",
            ]),
            complexity: Complexity::Moderate,
            tags: tags(&["discovery", "requirements"]),
        },
        SubTask {
            id: subtask_id(2),
            title: "Architecture design".to_string(),
            description: format!("Design system architecture for: {}", description),
            crew: Crew::Orchestrator,
            priority: Priority::High,
            estimated_effort: Effort::Days1To2,
            dependencies: vec![subtask_id(1)],
            acceptance_criteria: criteria(&[
                "System architecture designed",
                "Component interfaces defined",
                "Database schema planned",
                "API specifications created",
            ]),
            complexity: Complexity::Complex,
            tags: tags(&["architecture", "design"]),
        },
    ];

    let mut implementation_ids = Vec::new();
    for &crew in crews.iter().take(4) {
        let id = subtask_id(subtasks.len() + 1);
        implementation_ids.push(id.clone());
        subtasks.push(SubTask {
            id,
            title: format!("{} implementation", crew.title()),
            description: format!("Implement {}-specific features for: {}", crew, description),
            crew,
            priority: Priority::Medium,
            estimated_effort: Effort::Days1To2,
            dependencies: vec![subtask_id(2)],
            acceptance_criteria: criteria(&[
                &format!("{} features implemented", crew.title()),
                "Unit tests written",
                "Documentation updated",
                "Code review completed",
            ]),
            complexity: Complexity::Complex,
            tags: tags(&["implementation", crew.as_str()]),
        });
    }

    let integration_id = subtask_id(subtasks.len() + 1);
    subtasks.push(SubTask {
        id: integration_id.clone(),
        title: "System integration".to_string(),
        description: "Integrate all components and perform system testing".to_string(),
        crew: Crew::Integration,
        priority: Priority::High,
        estimated_effort: Effort::Days3To5,
        dependencies: implementation_ids,
        acceptance_criteria: criteria(&[
            "All systems integrated",
            "Integration tests passed",
            "Performance benchmarks met",
            "Security validation completed",
        ]),
        complexity: Complexity::Complex,
        tags: tags(&["integration", "testing"]),
    });

    subtasks.push(SubTask {
        id: subtask_id(subtasks.len() + 1),
        title: "Deployment and monitoring".to_string(),
        description: "Deploy solution and setup monitoring".to_string(),
        crew: Crew::Deployment,
        priority: Priority::Medium,
        estimated_effort: Effort::Days1To2,
        dependencies: vec![integration_id],
        acceptance_criteria: criteria(&[
            "Solution deployed successfully",
            "Monitoring configured",
            "Health checks implemented",
            "Documentation completed",
        ]),
        complexity: Complexity::Moderate,
        tags: tags(&["deployment", "monitoring"]),
    });

    subtasks
}

/// High tier: research, architecture, prototype, up to five per-crew
/// phases, integration, and production deployment.
fn high_subtasks(description: &str, crews: &[Crew]) -> Vec<SubTask> {
    let mut subtasks = vec![
        SubTask {
            id: subtask_id(1),
            title: "Research and feasibility analysis".to_string(),
            description: format!(
                "Research best practices and analyze feasibility for: {}",
                description
            ),
            crew: Crew::Orchestrator,
            priority: Priority::High,
            estimated_effort: Effort::Days1To2,
            dependencies: Vec::new(),
            acceptance_criteria: criteria(&[
                "Market research completed",
                "Technical feasibility confirmed",
                "Best practices documented",
                "Risk mitigation strategies defined",
            ]),
            complexity: Complexity::Complex,
            tags: tags(&["research", "feasibility"]),
        },
        SubTask {
            id: subtask_id(2),
            title: "System architecture and design".to_string(),
            description: format!("Design comprehensive system architecture for: {}", description),
            crew: Crew::Orchestrator,
            priority: Priority::High,
            estimated_effort: Effort::Days3To5,
            dependencies: vec![subtask_id(1)],
            acceptance_criteria: criteria(&[
                "Detailed architecture documented",
                "Scalability considerations addressed",
                "Security architecture defined",
                "Performance requirements specified",
            ]),
            complexity: Complexity::High,
            tags: tags(&["architecture", "design"]),
        },
        SubTask {
            id: subtask_id(3),
            title: "Prototype development".to_string(),
            description: format!("Build prototype to validate concepts for: {}", description),
            crew: Crew::Backend,
            priority: Priority::Medium,
            estimated_effort: Effort::Weeks1To2,
            dependencies: vec![subtask_id(2)],
            acceptance_criteria: criteria(&[
                "Working prototype created",
                "Key concepts validated",
                "Performance benchmarks established",
                "User feedback collected",
            ]),
            complexity: Complexity::High,
            tags: tags(&["prototype", "validation"]),
        },
    ];

    let mut implementation_ids = Vec::new();
    for &crew in crews.iter().take(5) {
        let id = subtask_id(subtasks.len() + 1);
        implementation_ids.push(id.clone());
        subtasks.push(SubTask {
            id,
            title: format!("{} full implementation", crew.title()),
            description: format!(
                "Complete implementation of {}-specific features for: {}",
                crew, description
            ),
            crew,
            priority: Priority::Medium,
            estimated_effort: Effort::Weeks1To2,
            dependencies: vec![subtask_id(3)],
            acceptance_criteria: criteria(&[
                &format!("{} features fully implemented", crew.title()),
                "Comprehensive testing completed",
                "Performance optimized",
                "Security review passed",
                "Documentation complete",
            ]),
            complexity: Complexity::High,
            tags: tags(&["implementation", crew.as_str()]),
        });
    }

    let integration_id = subtask_id(subtasks.len() + 1);
    subtasks.push(SubTask {
        id: integration_id.clone(),
        title: "System integration and testing".to_string(),
        description: "Comprehensive integration and testing of all components".to_string(),
        crew: Crew::Integration,
        priority: Priority::High,
        estimated_effort: Effort::Weeks1To2,
        dependencies: implementation_ids,
        acceptance_criteria: criteria(&[
            "All systems integrated",
            "End-to-end testing completed",
            "Load testing passed",
            "Security testing completed",
            "User acceptance testing passed",
        ]),
        complexity: Complexity::High,
        tags: tags(&["integration", "testing"]),
    });

    subtasks.push(SubTask {
        id: subtask_id(subtasks.len() + 1),
        title: "Production deployment".to_string(),
        description: "Deploy to production with monitoring and support".to_string(),
        crew: Crew::Deployment,
        priority: Priority::High,
        estimated_effort: Effort::Days3To5,
        dependencies: vec![integration_id],
        acceptance_criteria: criteria(&[
            "Production deployment completed",
            "Monitoring and alerting configured",
            "Disaster recovery tested",
            "Documentation finalized",
            "Team training completed",
        ]),
        complexity: Complexity::Complex,
        tags: tags(&["deployment", "production"]),
    });

    subtasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{dependency_graph, has_cycle};

    #[test]
    fn test_simple_decomposition() {
        let plan = decompose("Create an API endpoint").unwrap();

        assert_eq!(plan.complexity.level, Complexity::Simple);
        assert_eq!(plan.subtasks.len(), 1);
        assert_eq!(plan.subtasks[0].crew, Crew::Backend);
        assert_eq!(plan.subtasks[0].title, "Create implementation");
        assert_eq!(plan.execution_order, vec!["subtask_1"]);
        assert_eq!(plan.estimated_duration, DurationEstimate::OneDay);
    }

    #[test]
    fn test_empty_description_still_produces_a_plan() {
        let plan = decompose("").unwrap();

        assert_eq!(plan.subtasks.len(), 1);
        assert_eq!(plan.subtasks[0].crew, Crew::Orchestrator);
        assert!(plan.subtasks[0].tags.contains(&"create".to_string()));
    }

    #[test]
    fn test_moderate_decomposition_phases() {
        // Backend ("api", "endpoint") + security ("auth" via
        // "authentication", "token") crews plus the appended orchestrator;
        // base moderate + multiple_crews + security_concerns = 4.
        let plan = decompose("Set up an api endpoint with authentication tokens").unwrap();

        assert_eq!(plan.complexity.level, Complexity::Moderate);
        assert_eq!(plan.subtasks.len(), 5);
        assert_eq!(plan.subtasks[0].crew, Crew::Orchestrator);
        assert_eq!(plan.subtasks[0].title, "Planning and analysis");

        let integration = plan.subtasks.last().unwrap();
        assert_eq!(integration.crew, Crew::Quality);
        assert_eq!(
            integration.dependencies,
            vec!["subtask_2", "subtask_3", "subtask_4"]
        );

        for implementation in &plan.subtasks[1..4] {
            assert_eq!(implementation.dependencies, vec!["subtask_1"]);
        }
    }

    #[test]
    fn test_complex_decomposition_phases() {
        // "advanced" gives a complex base of 3; multiple_crews, ui and data
        // factors raise the total to 6.
        let plan = decompose("Create an advanced api with database and ui").unwrap();

        assert_eq!(plan.complexity.level, Complexity::Complex);

        let titles: Vec<&str> = plan.subtasks.iter().map(|t| t.title.as_str()).collect();
        assert!(titles.contains(&"Discovery and requirements analysis"));
        assert!(titles.contains(&"Architecture design"));
        assert!(titles.contains(&"System integration"));
        assert!(titles.contains(&"Deployment and monitoring"));

        let deployment = plan.subtasks.last().unwrap();
        assert_eq!(deployment.crew, Crew::Deployment);
        let integration = &plan.subtasks[plan.subtasks.len() - 2];
        assert_eq!(deployment.dependencies, vec![integration.id.clone()]);
    }

    #[test]
    fn test_high_decomposition_phases() {
        let description =
            "Create a comprehensive platform with api database ui security and deployment pipeline";
        let plan = decompose(description).unwrap();

        assert_eq!(plan.complexity.level, Complexity::High);

        let titles: Vec<&str> = plan.subtasks.iter().map(|t| t.title.as_str()).collect();
        assert!(titles.contains(&"Research and feasibility analysis"));
        assert!(titles.contains(&"Prototype development"));
        assert!(titles.contains(&"Production deployment"));

        // Five implementation phases at most, wired to the prototype.
        let implementations: Vec<&SubTask> = plan
            .subtasks
            .iter()
            .filter(|t| t.title.ends_with("full implementation"))
            .collect();
        assert_eq!(implementations.len(), 5);
        for implementation in &implementations {
            assert_eq!(implementation.dependencies, vec!["subtask_3"]);
        }
        assert_eq!(plan.estimated_duration, DurationEstimate::TwoPlusMonths);
    }

    #[test]
    fn test_every_tier_is_acyclic_and_fully_ordered() {
        let descriptions = [
            "Create an API endpoint",
            "Set up an api endpoint with authentication tokens",
            "Create an advanced api with database and ui",
            "Create a comprehensive platform with api database ui security and deployment pipeline",
        ];

        for description in descriptions {
            let plan = decompose(description).unwrap();
            assert!(
                !has_cycle(&dependency_graph(&plan.subtasks)),
                "cycle in plan for {:?}",
                description
            );
            assert_eq!(plan.execution_order.len(), plan.subtasks.len());
        }
    }

    #[test]
    fn test_decomposition_is_deterministic() {
        let first = decompose("Set up an api endpoint with authentication tokens").unwrap();
        let second = decompose("Set up an api endpoint with authentication tokens").unwrap();

        assert_eq!(first.subtasks, second.subtasks);
        assert_eq!(first.execution_order, second.execution_order);
        assert_eq!(first.estimated_duration, second.estimated_duration);
        assert_eq!(first.crew_distribution, second.crew_distribution);
    }

    #[test]
    fn test_primary_action_detection() {
        assert_eq!(primary_action("build a service"), Action::Create);
        assert_eq!(primary_action("update the config"), Action::Modify);
        assert_eq!(primary_action("verify the results"), Action::Test);
        assert_eq!(primary_action("nothing matches here"), Action::Create);
    }

    #[test]
    fn test_every_action_pattern_compiles() {
        for action in Action::ALL {
            assert!(Regex::new(action.pattern()).is_ok(), "{:?}", action);
        }
    }

    #[test]
    fn test_complexity_analysis_factors() {
        let analysis = analyze_complexity("integrate an external api with the database");

        assert!(analysis.factors.integration_required);
        assert!(analysis.factors.data_processing);
        assert!(!analysis.factors.security_concerns);
        // Base moderate (2) + integration + data + multiple_crews
        // (backend and integration keywords both hit).
        assert!(analysis.factors.multiple_crews);
        assert_eq!(analysis.score, 5);
        assert_eq!(analysis.level, Complexity::Complex);
    }

    #[test]
    fn test_complexity_keyword_base() {
        let analysis = analyze_complexity("a simple quick fix");
        assert_eq!(analysis.keyword_matches.get(&Complexity::Simple), Some(&2));
        // Base 1 plus the ui factor: "ui" matches inside "quick" because
        // factor checks are substring based.
        assert!(analysis.factors.ui_components);
        assert_eq!(analysis.score, 2);
        assert_eq!(analysis.level, Complexity::Simple);
    }
}
