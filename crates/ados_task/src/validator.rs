//! Plan validation utilities.

use std::collections::HashSet;

use crate::graph::has_cycle;
use crate::models::TaskPlan;

/// Validation result with details and a quality score.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub score: u32,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            score: 0,
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Validator for decomposed task plans.
pub struct PlanValidator;

impl PlanValidator {
    /// Validate a plan's structure and score its quality.
    pub fn validate(plan: &TaskPlan) -> ValidationReport {
        let mut report = ValidationReport::new();

        if plan.subtasks.is_empty() {
            report.add_error("No subtasks generated");
            return report;
        }

        let ids: HashSet<&str> = plan.subtasks.iter().map(|t| t.id.as_str()).collect();
        for task in &plan.subtasks {
            for dep in &task.dependencies {
                if !ids.contains(dep.as_str()) {
                    report.add_error(format!(
                        "Subtask {} has invalid dependency: {}",
                        task.id, dep
                    ));
                }
            }
        }

        if has_cycle(&plan.dependency_graph) {
            report.add_error("Dependency cycle detected");
        }

        if plan.execution_order.len() != plan.subtasks.len() {
            report.add_error(format!(
                "Execution order covers {} of {} subtasks",
                plan.execution_order.len(),
                plan.subtasks.len()
            ));
        }

        report.score = Self::quality_score(plan);
        report
    }

    /// Quality score: detail completeness plus crew spread and ordering.
    fn quality_score(plan: &TaskPlan) -> u32 {
        let mut score = 0;

        for task in &plan.subtasks {
            if !task.title.is_empty() && !task.description.is_empty() {
                score += 10;
            }
            if !task.acceptance_criteria.is_empty() {
                score += 15;
            }
            // Every subtask carries an effort estimate by construction.
            score += 10;
        }

        if plan.crew_distribution.len() > 1 {
            score += 20;
        }

        if plan.execution_order.len() == plan.subtasks.len() {
            score += 15;
        }

        score
    }
}
