//! Priority-ordered wait queue for tasks that could not be placed.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ados_task::{Crew, Priority};

/// A task waiting for its target crew to free up.
///
/// Created when dispatch finds no healthy crew; destroyed when a drain
/// pass successfully re-dispatches it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuedTask {
    pub id: Uuid,
    pub task: String,
    pub target_crew: Crew,
    pub priority: Priority,
    pub queued_at: DateTime<Utc>,
}

impl QueuedTask {
    pub fn new(task: impl Into<String>, target_crew: Crew, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4(),
            task: task.into(),
            target_crew,
            priority,
            queued_at: Utc::now(),
        }
    }
}

/// Snapshot of the queue's composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueStatus {
    pub total_queued: usize,
    pub by_priority: BTreeMap<Priority, usize>,
    pub by_crew: BTreeMap<Crew, usize>,
    pub oldest_task: Option<DateTime<Utc>>,
}

/// FIFO queue with stable priority ordering at drain time.
#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    items: Vec<QueuedTask>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: QueuedTask) {
        self.items.push(task);
    }

    /// Stable sort by priority: critical drains first, equal priorities
    /// keep arrival order.
    pub fn sort_by_priority(&mut self) {
        self.items.sort_by_key(|task| task.priority.rank());
    }

    pub fn items(&self) -> &[QueuedTask] {
        &self.items
    }

    pub fn remove(&mut self, id: Uuid) -> Option<QueuedTask> {
        let pos = self.items.iter().position(|task| task.id == id)?;
        Some(self.items.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Composition snapshot: totals per priority and per crew, plus the
    /// oldest enqueue timestamp.
    pub fn status(&self) -> QueueStatus {
        let mut by_priority = BTreeMap::new();
        let mut by_crew = BTreeMap::new();

        for task in &self.items {
            *by_priority.entry(task.priority).or_insert(0) += 1;
            *by_crew.entry(task.target_crew).or_insert(0) += 1;
        }

        QueueStatus {
            total_queued: self.items.len(),
            by_priority,
            by_crew,
            oldest_task: self.items.iter().map(|task| task.queued_at).min(),
        }
    }
}
