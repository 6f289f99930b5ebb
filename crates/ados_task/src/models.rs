//! Data models for task decomposition.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crew::Crew;
use crate::error::TaskError;

/// Task priority levels.
///
/// Declaration order doubles as queue ordering: critical drains first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Load added to a crew when a task of this priority is dispatched.
    pub fn weight(&self) -> u32 {
        match self {
            Priority::Critical => 30,
            Priority::High => 20,
            Priority::Medium => 10,
            Priority::Low => 5,
        }
    }

    /// Queue drain rank; lower drains first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Priority::Critical),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(TaskError::UnknownPriority(other.to_string())),
        }
    }
}

/// Complexity tiers; each tier selects a subtask generation template.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
    High,
}

impl Complexity {
    /// Base contribution to the total complexity score.
    pub fn base_score(&self) -> u32 {
        match self {
            Complexity::Simple => 1,
            Complexity::Moderate => 2,
            Complexity::Complex => 3,
            Complexity::High => 4,
        }
    }

    /// Map a total complexity score to a tier.
    pub fn from_score(score: u32) -> Complexity {
        match score {
            0..=2 => Complexity::Simple,
            3..=4 => Complexity::Moderate,
            5..=6 => Complexity::Complex,
            _ => Complexity::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
            Complexity::High => "high",
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse effort buckets assigned by the subtask templates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    Hours1To2,
    Hours2To4,
    Hours4To8,
    Days1To2,
    Days3To5,
    Weeks1To2,
}

impl Effort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Effort::Hours1To2 => "1-2 hours",
            Effort::Hours2To4 => "2-4 hours",
            Effort::Hours4To8 => "4-8 hours",
            Effort::Days1To2 => "1-2 days",
            Effort::Days3To5 => "3-5 days",
            Effort::Weeks1To2 => "1-2 weeks",
        }
    }

    /// Nominal hours used for total duration estimation.
    pub fn hours(&self) -> f64 {
        match self {
            Effort::Hours1To2 => 1.5,
            Effort::Hours2To4 => 3.0,
            Effort::Hours4To8 => 6.0,
            Effort::Days1To2 => 16.0,
            Effort::Days3To5 => 32.0,
            Effort::Weeks1To2 => 80.0,
        }
    }
}

impl std::fmt::Display for Effort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse total duration estimate for a whole plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DurationEstimate {
    OneDay,
    OneWeek,
    OneMonth,
    TwoPlusMonths,
}

impl DurationEstimate {
    /// Bucket a summed effort-hour total.
    pub fn from_total_hours(hours: f64) -> DurationEstimate {
        if hours <= 8.0 {
            DurationEstimate::OneDay
        } else if hours <= 40.0 {
            DurationEstimate::OneWeek
        } else if hours <= 160.0 {
            DurationEstimate::OneMonth
        } else {
            DurationEstimate::TwoPlusMonths
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationEstimate::OneDay => "1 day",
            DurationEstimate::OneWeek => "1 week",
            DurationEstimate::OneMonth => "1 month",
            DurationEstimate::TwoPlusMonths => "2+ months",
        }
    }
}

impl std::fmt::Display for DurationEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Primary verb detected in a task description.
///
/// Detection checks patterns in declaration order; first match wins.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Modify,
    Test,
    Deploy,
    Integrate,
    Analyze,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Create,
        Action::Modify,
        Action::Test,
        Action::Deploy,
        Action::Integrate,
        Action::Analyze,
    ];

    /// Regex matched against the lowercased description.
    pub fn pattern(&self) -> &'static str {
        match self {
            Action::Create => r"create|build|develop|implement|generate|construct",
            Action::Modify => r"modify|update|change|alter|enhance|improve",
            Action::Test => r"test|verify|validate|check|ensure",
            Action::Deploy => r"deploy|release|publish|launch|deliver",
            Action::Integrate => r"integrate|connect|sync|link|merge",
            Action::Analyze => r"analyze|review|audit|assess|evaluate",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Modify => "modify",
            Action::Test => "test",
            Action::Deploy => "deploy",
            Action::Integrate => "integrate",
            Action::Analyze => "analyze",
        }
    }

    /// Capitalized name for subtask titles.
    pub fn title(&self) -> &'static str {
        match self {
            Action::Create => "Create",
            Action::Modify => "Modify",
            Action::Test => "Test",
            Action::Deploy => "Deploy",
            Action::Integrate => "Integrate",
            Action::Analyze => "Analyze",
        }
    }
}

/// One unit of decomposed work.
///
/// Ids are positional (`subtask_1`, `subtask_2`, ...) so that decomposing
/// the same description twice yields structurally identical plans.
/// Dependencies reference ids within the same plan only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubTask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub crew: Crew,
    pub priority: Priority,
    pub estimated_effort: Effort,
    pub dependencies: Vec<String>,
    pub acceptance_criteria: Vec<String>,
    pub complexity: Complexity,
    pub tags: Vec<String>,
}

/// The six boolean complexity factors, each worth one score point.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComplexityFactors {
    pub multiple_crews: bool,
    pub integration_required: bool,
    pub security_concerns: bool,
    pub performance_critical: bool,
    pub ui_components: bool,
    pub data_processing: bool,
}

impl ComplexityFactors {
    pub fn count(&self) -> u32 {
        [
            self.multiple_crews,
            self.integration_required,
            self.security_concerns,
            self.performance_critical,
            self.ui_components,
            self.data_processing,
        ]
        .iter()
        .filter(|f| **f)
        .count() as u32
    }
}

/// Result of the complexity analysis step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplexityAnalysis {
    pub level: Complexity,
    pub score: u32,
    pub factors: ComplexityFactors,
    /// Per-tier adjective keyword hit counts (only tiers with hits).
    pub keyword_matches: BTreeMap<Complexity, usize>,
}

/// A decomposed task plan. Immutable once produced; consumers copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPlan {
    pub id: Uuid,
    pub original_task: String,
    pub subtasks: Vec<SubTask>,
    pub execution_order: Vec<String>,
    pub estimated_duration: DurationEstimate,
    pub complexity: ComplexityAnalysis,
    pub crew_distribution: BTreeMap<Crew, usize>,
    pub dependency_graph: BTreeMap<String, Vec<String>>,
    pub created_at: DateTime<Utc>,
}
