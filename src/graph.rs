//! Optional checks over the dependency graph.
//!
//! The timeline controller emits dependency edges without validating them.
//! Hosts that want to refuse self-loops, duplicates or cycles call
//! [`validate_edge`] before accepting one.
//!
//! Edges point from a dependency to its dependent: if `B.dependencies`
//! contains `A`, the edge is `A -> B`.

use std::collections::{HashMap, HashSet};

use crate::model::Task;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EdgeError {
    #[error("task '{0}' cannot depend on itself")]
    SelfDependency(String),

    #[error("unknown task '{0}'")]
    UnknownTask(String),

    #[error("'{task}' already depends on '{depends_on}'")]
    Duplicate { task: String, depends_on: String },

    #[error("dependency cycle: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}

/// Check whether `task_id` may take on `depends_on` as a dependency.
pub fn validate_edge(tasks: &[Task], task_id: &str, depends_on: &str) -> Result<(), EdgeError> {
    if task_id == depends_on {
        return Err(EdgeError::SelfDependency(task_id.to_string()));
    }
    let task = tasks
        .iter()
        .find(|t| t.id == task_id)
        .ok_or_else(|| EdgeError::UnknownTask(task_id.to_string()))?;
    if !tasks.iter().any(|t| t.id == depends_on) {
        return Err(EdgeError::UnknownTask(depends_on.to_string()));
    }
    if task.depends_on(depends_on) {
        return Err(EdgeError::Duplicate {
            task: task_id.to_string(),
            depends_on: depends_on.to_string(),
        });
    }
    if let Some(path) = dependency_path(tasks, depends_on, task_id) {
        let mut cycle = path;
        cycle.push(depends_on.to_string());
        return Err(EdgeError::Cycle(cycle));
    }
    Ok(())
}

/// Whether making `task_id` depend on `depends_on` would close a cycle.
pub fn would_create_cycle(tasks: &[Task], task_id: &str, depends_on: &str) -> bool {
    task_id == depends_on || dependency_path(tasks, depends_on, task_id).is_some()
}

/// Walk dependencies from `from` looking for `target`. Returns the chain
/// `from, ..., target` if `from` transitively depends on `target`.
fn dependency_path(tasks: &[Task], from: &str, target: &str) -> Option<Vec<String>> {
    let deps = dependency_map(tasks);
    let mut visited = HashSet::new();
    let mut parent: HashMap<&str, &str> = HashMap::new();
    let mut stack = vec![from];

    while let Some(current) = stack.pop() {
        if current == target {
            let mut path = vec![current.to_string()];
            let mut node = current;
            while let Some(&prev) = parent.get(node) {
                path.push(prev.to_string());
                node = prev;
            }
            path.reverse();
            return Some(path);
        }
        if !visited.insert(current) {
            continue;
        }
        for &next in deps.get(current).into_iter().flatten() {
            if !visited.contains(next) {
                parent.entry(next).or_insert(current);
                stack.push(next);
            }
        }
    }
    None
}

fn dependency_map(tasks: &[Task]) -> HashMap<&str, Vec<&str>> {
    tasks
        .iter()
        .map(|t| {
            let deps = t.dependencies.iter().map(String::as_str).collect();
            (t.id.as_str(), deps)
        })
        .collect()
}

/// Dependencies that point at tasks not in `tasks`, as `(task, missing)`.
pub fn dangling_references(tasks: &[Task]) -> Vec<(String, String)> {
    let known: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    let known = &known;
    tasks
        .iter()
        .flat_map(move |t| {
            t.dependencies
                .iter()
                .filter(move |d| !known.contains(d.as_str()))
                .map(move |d| (t.id.clone(), d.clone()))
        })
        .collect()
}

/// Order tasks so every task comes after the tasks it depends on. Dangling
/// references are ignored. Ties keep the input order.
pub fn topological_order(tasks: &[Task]) -> Result<Vec<String>, EdgeError> {
    let index: HashMap<&str, usize> = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id.as_str(), i))
        .collect();
    let mut remaining: Vec<usize> = tasks
        .iter()
        .map(|t| {
            t.dependencies
                .iter()
                .filter(|d| index.contains_key(d.as_str()))
                .collect::<HashSet<_>>()
                .len()
        })
        .collect();
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];
    for (i, t) in tasks.iter().enumerate() {
        let unique: HashSet<&str> = t.dependencies.iter().map(String::as_str).collect();
        for dep in unique {
            if let Some(&d) = index.get(dep) {
                dependents[d].push(i);
            }
        }
    }

    let mut ready: Vec<usize> = (0..tasks.len()).filter(|&i| remaining[i] == 0).rev().collect();
    let mut order = Vec::with_capacity(tasks.len());
    while let Some(i) = ready.pop() {
        order.push(tasks[i].id.clone());
        for &dependent in &dependents[i] {
            remaining[dependent] -= 1;
            if remaining[dependent] == 0 {
                ready.push(dependent);
            }
        }
        // Pop the lowest index next so ties keep input order.
        ready.sort_unstable_by(|a, b| b.cmp(a));
    }

    if order.len() < tasks.len() {
        return Err(EdgeError::Cycle(find_cycle(tasks).unwrap_or_default()));
    }
    Ok(order)
}

/// Some cycle among the tasks, as `a, b, ..., a`, if one exists.
pub fn find_cycle(tasks: &[Task]) -> Option<Vec<String>> {
    let deps = dependency_map(tasks);
    for task in tasks {
        for dep in &task.dependencies {
            if dep == &task.id {
                return Some(vec![task.id.clone(), task.id.clone()]);
            }
            if !deps.contains_key(dep.as_str()) {
                continue;
            }
            if let Some(mut path) = dependency_path(tasks, dep, &task.id) {
                path.insert(0, task.id.clone());
                return Some(path);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task(id: &str, deps: &[&str]) -> Task {
        let mut t = Task::new(id, id, NaiveDate::from_ymd_opt(2025, 11, 20).unwrap());
        t.dependencies = deps.iter().map(|d| d.to_string()).collect();
        t
    }

    #[test]
    fn rejects_self_unknown_and_duplicate() {
        let tasks = vec![task("A", &[]), task("B", &["A"])];
        assert_eq!(
            validate_edge(&tasks, "A", "A"),
            Err(EdgeError::SelfDependency("A".into()))
        );
        assert_eq!(
            validate_edge(&tasks, "A", "Z"),
            Err(EdgeError::UnknownTask("Z".into()))
        );
        assert!(matches!(
            validate_edge(&tasks, "B", "A"),
            Err(EdgeError::Duplicate { .. })
        ));
    }

    #[test]
    fn rejects_edge_that_closes_a_cycle() {
        // C depends on B, B depends on A. A depending on C closes the loop.
        let tasks = vec![task("A", &[]), task("B", &["A"]), task("C", &["B"])];
        assert!(would_create_cycle(&tasks, "A", "C"));
        assert_eq!(
            validate_edge(&tasks, "A", "C"),
            Err(EdgeError::Cycle(vec![
                "C".into(),
                "B".into(),
                "A".into(),
                "C".into()
            ]))
        );
        assert!(validate_edge(&tasks, "C", "A").is_ok());
    }

    #[test]
    fn finds_existing_cycles() {
        let tasks = vec![task("A", &["C"]), task("B", &["A"]), task("C", &["B"])];
        let cycle = find_cycle(&tasks).unwrap();
        assert_eq!(cycle.first(), cycle.last());
        assert_eq!(cycle.len(), 4);
        assert!(find_cycle(&[task("A", &[]), task("B", &["A"])]).is_none());
    }

    #[test]
    fn topological_order_respects_dependencies() {
        let tasks = vec![
            task("C", &["B"]),
            task("B", &["A", "GONE"]),
            task("A", &[]),
            task("D", &[]),
        ];
        let order = topological_order(&tasks).unwrap();
        let pos = |id: &str| order.iter().position(|o| o == id).unwrap();
        assert!(pos("A") < pos("B"));
        assert!(pos("B") < pos("C"));
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn topological_order_reports_cycles() {
        let tasks = vec![task("A", &["B"]), task("B", &["A"])];
        assert!(matches!(topological_order(&tasks), Err(EdgeError::Cycle(_))));
    }

    #[test]
    fn lists_dangling_references() {
        let tasks = vec![task("A", &["X"]), task("B", &["A", "Y"])];
        assert_eq!(
            dangling_references(&tasks),
            [("A".to_string(), "X".to_string()), ("B".to_string(), "Y".to_string())]
        );
    }
}
