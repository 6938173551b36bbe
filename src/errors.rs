// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RundagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Cycle detected in step DAG: {0}")]
    DagCycle(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Lifecycle violation: `execute` before `configure`, a second
    /// `configure`, or `execute` on an already-executed node.
    #[error("Node '{0}' not configured for this call: {1}")]
    NotConfigured(String, String),

    /// The toolchain entry a node's action requires is absent.
    #[error("Node '{node}' requires tool '{tool}', which is not present in [toolchain]")]
    MissingTool { node: String, tool: String },

    /// The run finished with at least one failed node.
    #[error("Run failed; failed nodes: {}", .0.join(", "))]
    RunFailed(Vec<String>),

    /// The run was stopped by a shutdown request before it finished.
    #[error("Run interrupted before completion")]
    Interrupted,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RundagError>;
