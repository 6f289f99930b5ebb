//! Crew identifiers and the static crew keyword table.
//!
//! Crews are the named pools of work capacity that subtasks are routed to.
//! The keyword table is plain data so that routing can be unit-tested
//! independently of the classification algorithm.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TaskError;

/// Specialized crew identifiers.
///
/// Declaration order matters: the classifier breaks score ties by picking
/// the first crew in this order that reaches the maximum score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Crew {
    Backend,
    Security,
    Quality,
    Deployment,
    Frontend,
    Integration,
    Orchestrator,
}

impl Crew {
    /// All crews in classifier tie-break order.
    pub const ALL: [Crew; 7] = [
        Crew::Backend,
        Crew::Security,
        Crew::Quality,
        Crew::Deployment,
        Crew::Frontend,
        Crew::Integration,
        Crew::Orchestrator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Crew::Backend => "backend",
            Crew::Security => "security",
            Crew::Quality => "quality",
            Crew::Deployment => "deployment",
            Crew::Frontend => "frontend",
            Crew::Integration => "integration",
            Crew::Orchestrator => "orchestrator",
        }
    }

    /// Capitalized name for subtask titles.
    pub fn title(&self) -> &'static str {
        match self {
            Crew::Backend => "Backend",
            Crew::Security => "Security",
            Crew::Quality => "Quality",
            Crew::Deployment => "Deployment",
            Crew::Frontend => "Frontend",
            Crew::Integration => "Integration",
            Crew::Orchestrator => "Orchestrator",
        }
    }

    /// Keywords that route free-text descriptions to this crew.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Crew::Backend => &[
                "api", "backend", "database", "server", "endpoint", "model", "schema", "service",
            ],
            Crew::Security => &[
                "security",
                "auth",
                "permission",
                "encryption",
                "vulnerability",
                "token",
            ],
            Crew::Quality => &[
                "test",
                "testing",
                "validation",
                "quality",
                "lint",
                "review",
                "coverage",
            ],
            Crew::Deployment => &[
                "deploy",
                "deployment",
                "infrastructure",
                "docker",
                "kubernetes",
                "ci/cd",
            ],
            Crew::Frontend => &[
                "ui",
                "frontend",
                "interface",
                "component",
                "page",
                "view",
                "css",
                "styling",
            ],
            Crew::Integration => &[
                "integration",
                "third-party",
                "external",
                "webhook",
                "sync",
                "pipeline",
            ],
            Crew::Orchestrator => &[
                "orchestrate",
                "coordinate",
                "manage",
                "plan",
                "decompose",
                "complex",
            ],
        }
    }
}

impl std::fmt::Display for Crew {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Crew {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "backend" => Ok(Crew::Backend),
            "security" => Ok(Crew::Security),
            "quality" => Ok(Crew::Quality),
            "deployment" => Ok(Crew::Deployment),
            "frontend" => Ok(Crew::Frontend),
            "integration" => Ok(Crew::Integration),
            "orchestrator" => Ok(Crew::Orchestrator),
            other => Err(TaskError::UnknownCrew(other.to_string())),
        }
    }
}
