//! Crew health tracking.
//!
//! Each crew carries a synthetic load counter: dispatching adds a
//! priority-weighted amount, completion subtracts a flat decrement floored
//! at zero. Status is a pure function of load, with an availability
//! override for crews reported down by an external signal.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ados_task::{Crew, Priority};

use crate::config::OrchestratorConfig;

/// Crew status derived from load and availability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CrewStatus {
    Ready,
    Active,
    Busy,
    Overloaded,
    Unavailable,
    Unknown,
}

impl CrewStatus {
    /// Whether a crew in this status accepts new work during re-routing
    /// and queue draining.
    pub fn is_dispatchable(&self) -> bool {
        matches!(self, CrewStatus::Ready | CrewStatus::Active)
    }
}

impl std::fmt::Display for CrewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CrewStatus::Ready => "ready",
            CrewStatus::Active => "active",
            CrewStatus::Busy => "busy",
            CrewStatus::Overloaded => "overloaded",
            CrewStatus::Unavailable => "unavailable",
            CrewStatus::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Map a load value to a status.
///
/// Boundaries are exclusive: load 50 is still ready, load 80 still busy.
pub fn status_for_load(load: u32, config: &OrchestratorConfig) -> CrewStatus {
    if load > config.overload_threshold {
        CrewStatus::Overloaded
    } else if load > config.busy_threshold {
        CrewStatus::Busy
    } else {
        CrewStatus::Ready
    }
}

/// Health snapshot for one crew.
///
/// `crew` is a plain name so that lookups for unknown crews can be
/// answered with a structured `Unknown` payload instead of an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewHealth {
    pub crew: String,
    pub status: CrewStatus,
    pub load: u32,
    pub last_check: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl CrewHealth {
    /// Snapshot for a crew name that does not exist.
    pub fn unknown(name: &str) -> Self {
        Self {
            crew: name.to_string(),
            status: CrewStatus::Unknown,
            load: 0,
            last_check: None,
            error: Some(format!("Crew '{}' not found", name)),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct CrewEntry {
    load: u32,
    unavailable: bool,
    last_check: Option<DateTime<Utc>>,
}

/// Per-crew load and availability state for all crews.
#[derive(Debug, Clone)]
pub struct HealthBoard {
    entries: BTreeMap<Crew, CrewEntry>,
}

impl Default for HealthBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthBoard {
    /// Create a board with every crew at load 0 and available.
    pub fn new() -> Self {
        Self {
            entries: Crew::ALL
                .iter()
                .map(|&crew| (crew, CrewEntry::default()))
                .collect(),
        }
    }

    fn entry(&self, crew: Crew) -> &CrewEntry {
        // Every crew is seeded in `new`, so the entry always exists.
        &self.entries[&crew]
    }

    /// Check a crew's health, stamping its last-check timestamp.
    pub fn monitor(&mut self, crew: Crew, config: &OrchestratorConfig) -> CrewHealth {
        let now = Utc::now();
        let entry = self.entries.entry(crew).or_default();
        entry.last_check = Some(now);

        let status = if entry.unavailable {
            CrewStatus::Unavailable
        } else {
            status_for_load(entry.load, config)
        };

        CrewHealth {
            crew: crew.to_string(),
            status,
            load: entry.load,
            last_check: Some(now),
            error: None,
        }
    }

    /// Health snapshot for every crew.
    pub fn monitor_all(&mut self, config: &OrchestratorConfig) -> BTreeMap<Crew, CrewHealth> {
        Crew::ALL
            .iter()
            .map(|&crew| (crew, self.monitor(crew, config)))
            .collect()
    }

    /// Record a dispatch: load grows by the priority weight.
    pub fn record_dispatch(&mut self, crew: Crew, priority: Priority) {
        self.entries.entry(crew).or_default().load += priority.weight();
    }

    /// Record a completion: load shrinks by the flat decrement, floored
    /// at zero.
    pub fn record_completion(&mut self, crew: Crew, config: &OrchestratorConfig) {
        let entry = self.entries.entry(crew).or_default();
        entry.load = entry.load.saturating_sub(config.completion_decrement);
    }

    /// External availability signal for a crew.
    pub fn set_available(&mut self, crew: Crew, available: bool) {
        self.entries.entry(crew).or_default().unavailable = !available;
    }

    /// Override a crew's load directly (external telemetry or tests).
    pub fn set_load(&mut self, crew: Crew, load: u32) {
        self.entries.entry(crew).or_default().load = load;
    }

    pub fn load(&self, crew: Crew) -> u32 {
        self.entry(crew).load
    }

    /// Number of crews currently carrying load.
    pub fn active_crews(&self) -> usize {
        self.entries.values().filter(|e| e.load > 0).count()
    }
}
