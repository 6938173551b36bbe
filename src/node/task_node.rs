// src/node/task_node.rs

//! One step in the build graph.
//!
//! A `TaskNode` is created at graph-construction time, configured exactly
//! once during the setup phase, and executed at most once by the scheduler
//! after all of its dependencies have completed successfully. The node
//! itself performs no ordering; it only enforces its own lifecycle.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::engine::NodeName;
use crate::errors::{Result, RundagError};
use crate::node::sink::LogSink;
use crate::node::toolchain::ToolchainConfig;

/// Configuration blob bound to a node before execution.
///
/// Read-only from the node's point of view: `execute` may resolve values
/// out of it but never mutates it.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Shared toolchain lookup.
    pub toolchain: Arc<ToolchainConfig>,
    /// Name of the toolchain entry the node's action resolves.
    pub requires: String,
}

/// Node lifecycle: `Unconfigured -> Configured -> Executed`, terminal.
///
/// Any call out of this order fails with [`RundagError::NotConfigured`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Unconfigured,
    Configured,
    Executed,
}

/// A single build step with its dependency edges and bound configuration.
#[derive(Debug)]
pub struct TaskNode {
    name: NodeName,
    group: String,
    deps: BTreeSet<NodeName>,
    config: Option<NodeConfig>,
    state: NodeState,
}

impl TaskNode {
    /// Create an unconfigured node. `configure` must be called before
    /// `execute`.
    pub fn new(name: impl Into<NodeName>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            deps: BTreeSet::new(),
            config: None,
            state: NodeState::Unconfigured,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Dependencies recorded at configure time.
    ///
    /// Empty before `configure`; immutable afterwards.
    pub fn dependencies(&self) -> &BTreeSet<NodeName> {
        &self.deps
    }

    /// Record upstream dependencies and bind configuration.
    ///
    /// Must be called exactly once, before any call to `execute`. A second
    /// call fails and leaves the first configuration in place.
    pub fn configure(
        &mut self,
        dependencies: BTreeSet<NodeName>,
        config: NodeConfig,
    ) -> Result<()> {
        if self.state != NodeState::Unconfigured {
            return Err(RundagError::NotConfigured(
                self.name.clone(),
                "configure called more than once".to_string(),
            ));
        }

        debug!(
            node = %self.name,
            deps = ?dependencies,
            requires = %config.requires,
            "node configured"
        );

        self.deps = dependencies;
        self.config = Some(config);
        self.state = NodeState::Configured;
        Ok(())
    }

    /// Run the node's action using the bound configuration.
    ///
    /// Resolves the required toolchain entry and emits one diagnostic line
    /// to `sink`. A missing entry is an error, never a printable
    /// placeholder. Neither `dependencies` nor the bound config are
    /// mutated; on success the node transitions to `Executed` and any
    /// further call is a lifecycle error.
    pub fn execute(&mut self, sink: &mut dyn LogSink) -> Result<()> {
        match self.state {
            NodeState::Unconfigured => {
                return Err(RundagError::NotConfigured(
                    self.name.clone(),
                    "execute called before configure".to_string(),
                ));
            }
            NodeState::Executed => {
                return Err(RundagError::NotConfigured(
                    self.name.clone(),
                    "execute called on an already-executed node".to_string(),
                ));
            }
            NodeState::Configured => {}
        }

        let config = self.config.as_ref().ok_or_else(|| {
            RundagError::NotConfigured(
                self.name.clone(),
                "configured node has no bound config".to_string(),
            )
        })?;

        let tool_path = config
            .toolchain
            .tool_path(&config.requires)
            .ok_or_else(|| RundagError::MissingTool {
                node: self.name.clone(),
                tool: config.requires.clone(),
            })?;

        sink.emit(&format!("hello world: {tool_path}"));

        debug!(node = %self.name, tool = %config.requires, path = %tool_path, "node executed");

        self.state = NodeState::Executed;
        Ok(())
    }
}
