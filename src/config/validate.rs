// src/config/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, RundagError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::RundagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(
            raw.settings,
            raw.toolchain,
            raw.step,
        ))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_steps(cfg)?;
    validate_settings(cfg)?;
    validate_step_fields(cfg)?;
    validate_step_dependencies(cfg)?;
    validate_dag(cfg)?;
    Ok(())
}

fn ensure_has_steps(cfg: &RawConfigFile) -> Result<()> {
    if cfg.step.is_empty() {
        return Err(RundagError::ConfigError(
            "config must contain at least one [step.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_settings(cfg: &RawConfigFile) -> Result<()> {
    if cfg.settings.default_group.trim().is_empty() {
        return Err(RundagError::ConfigError(
            "[settings].default_group must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_step_fields(cfg: &RawConfigFile) -> Result<()> {
    // `requires` is deliberately NOT checked against [toolchain] here: the
    // toolchain may be populated by the host environment after load, so a
    // missing entry is an execution-time failure, not a config error.
    for (name, step) in cfg.step.iter() {
        if step.requires.trim().is_empty() {
            return Err(RundagError::ConfigError(format!(
                "step '{}' has an empty `requires` field",
                name
            )));
        }
        if let Some(group) = &step.group {
            if group.trim().is_empty() {
                return Err(RundagError::ConfigError(format!(
                    "step '{}' has an empty `group` field",
                    name
                )));
            }
        }
    }
    Ok(())
}

fn validate_step_dependencies(cfg: &RawConfigFile) -> Result<()> {
    for (name, step) in cfg.step.iter() {
        for dep in step.after.iter() {
            if !cfg.step.contains_key(dep) {
                return Err(RundagError::ConfigError(format!(
                    "step '{}' has unknown dependency '{}' in `after`",
                    name, dep
                )));
            }
            if dep == name {
                return Err(RundagError::ConfigError(format!(
                    "step '{}' cannot depend on itself in `after`",
                    name
                )));
            }
        }
    }
    Ok(())
}

fn validate_dag(cfg: &RawConfigFile) -> Result<()> {
    // Build a simple petgraph graph from the steps and their dependencies.
    //
    // Edge direction: dep -> step
    // For:
    //   [step.b]
    //   after = ["a"]
    // we add edge a -> b.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in cfg.step.keys() {
        graph.add_node(name.as_str());
    }

    for (name, step) in cfg.step.iter() {
        for dep in step.after.iter() {
            graph.add_edge(dep.as_str(), name.as_str(), ());
        }
    }

    // A topological sort will fail if there is a cycle.
    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => {
            let node = cycle.node_id();
            Err(RundagError::DagCycle(format!(
                "cycle detected in step DAG involving step '{}'",
                node
            )))
        }
    }
}
