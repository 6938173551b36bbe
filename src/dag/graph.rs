// src/dag/graph.rs

use std::collections::HashMap;

use crate::config::model::ConfigFile;

/// Internal node structure: stores immediate deps and dependents.
#[derive(Debug, Clone)]
struct DagNode {
    /// Direct dependencies: steps that must succeed before this one runs.
    deps: Vec<String>,
    /// Direct dependents: steps that list this one in their `after`.
    dependents: Vec<String>,
}

/// In-memory DAG keyed by step name.
///
/// Intentionally lightweight; acyclicity is already proven in
/// `config::validate`, so this only keeps adjacency information for
/// scheduling and diagnostics.
#[derive(Debug, Clone)]
pub struct DagGraph {
    nodes: HashMap<String, DagNode>,
}

impl DagGraph {
    /// Build a DAG from a validated [`ConfigFile`].
    ///
    /// Assumes that all `after` references are valid and there are no
    /// cycles.
    pub fn from_config(cfg: &ConfigFile) -> Self {
        let mut nodes: HashMap<String, DagNode> = HashMap::new();

        for (name, step) in cfg.step.iter() {
            nodes.insert(
                name.clone(),
                DagNode {
                    deps: step.after.clone(),
                    dependents: Vec::new(),
                },
            );
        }

        // Invert the dependency edges to populate dependents.
        let edges: Vec<(String, String)> = cfg
            .step
            .iter()
            .flat_map(|(name, step)| {
                step.after.iter().map(|dep| (dep.clone(), name.clone()))
            })
            .collect();

        for (dep, dependent) in edges {
            if let Some(dep_node) = nodes.get_mut(&dep) {
                dep_node.dependents.push(dependent);
            }
        }

        Self { nodes }
    }

    /// Return all step names.
    pub fn steps(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(|s| s.as_str())
    }

    /// Immediate dependencies of a step (the steps listed in its `after`).
    pub fn dependencies_of(&self, name: &str) -> &[String] {
        self.nodes
            .get(name)
            .map(|n| n.deps.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate dependents of a step (steps that list this one in their
    /// `after`).
    pub fn dependents_of(&self, name: &str) -> &[String] {
        self.nodes
            .get(name)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }
}
