//! Dependency graph construction, cycle detection, and execution ordering.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{TaskError, TaskResult};
use crate::models::SubTask;

/// Build the subtask-id -> dependency-ids adjacency map.
pub fn dependency_graph(subtasks: &[SubTask]) -> BTreeMap<String, Vec<String>> {
    subtasks
        .iter()
        .map(|task| (task.id.clone(), task.dependencies.clone()))
        .collect()
}

/// Check whether the dependency graph contains a cycle.
///
/// Pure boolean check; cycles are never broken, only flagged. Callers must
/// surface a detected cycle as a validation failure.
pub fn has_cycle(graph: &BTreeMap<String, Vec<String>>) -> bool {
    cycle_node(graph).is_some()
}

/// Find a node participating in a cycle, if any.
fn cycle_node(graph: &BTreeMap<String, Vec<String>>) -> Option<String> {
    fn dfs<'a>(
        node: &'a str,
        graph: &'a BTreeMap<String, Vec<String>>,
        visited: &mut HashSet<&'a str>,
        stack: &mut HashSet<&'a str>,
    ) -> Option<&'a str> {
        visited.insert(node);
        stack.insert(node);

        if let Some(deps) = graph.get(node) {
            for dep in deps {
                if !visited.contains(dep.as_str()) {
                    if let Some(found) = dfs(dep, graph, visited, stack) {
                        return Some(found);
                    }
                } else if stack.contains(dep.as_str()) {
                    return Some(dep);
                }
            }
        }

        stack.remove(node);
        None
    }

    let mut visited = HashSet::new();
    let mut stack = HashSet::new();

    for node in graph.keys() {
        if !visited.contains(node.as_str()) {
            if let Some(found) = dfs(node, graph, &mut visited, &mut stack) {
                return Some(found.to_string());
            }
        }
    }

    None
}

/// Topologically sort subtasks into an execution order.
///
/// DFS-based: subtasks without dependencies are visited first in original
/// list order, and every dependency is appended before its dependent. The
/// result always contains every subtask id exactly once.
///
/// Fails on dependencies referencing ids outside the list and on cycles.
pub fn execution_order(subtasks: &[SubTask]) -> TaskResult<Vec<String>> {
    let index: HashMap<&str, &SubTask> =
        subtasks.iter().map(|task| (task.id.as_str(), task)).collect();

    for task in subtasks {
        for dep in &task.dependencies {
            if !index.contains_key(dep.as_str()) {
                return Err(TaskError::UnknownDependency {
                    subtask: task.id.clone(),
                    dependency: dep.clone(),
                });
            }
        }
    }

    if let Some(node) = cycle_node(&dependency_graph(subtasks)) {
        return Err(TaskError::DependencyCycle(node));
    }

    fn visit(
        id: &str,
        index: &HashMap<&str, &SubTask>,
        visited: &mut HashSet<String>,
        order: &mut Vec<String>,
    ) {
        if visited.contains(id) {
            return;
        }
        visited.insert(id.to_string());

        if let Some(task) = index.get(id) {
            for dep in &task.dependencies {
                visit(dep, index, visited, order);
            }
            order.push(id.to_string());
        }
    }

    let mut visited = HashSet::new();
    let mut order = Vec::with_capacity(subtasks.len());

    for task in subtasks {
        if task.dependencies.is_empty() {
            visit(&task.id, &index, &mut visited, &mut order);
        }
    }
    for task in subtasks {
        if !visited.contains(&task.id) {
            visit(&task.id, &index, &mut visited, &mut order);
        }
    }

    Ok(order)
}
