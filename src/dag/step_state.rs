// src/dag/step_state.rs

//! Step metadata and per-run state.

use crate::config::model::StepConfig;
use crate::engine::NodeName;

/// Per-run state of a step (internal to the scheduler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunState {
    /// Waiting on dependencies.
    Pending,
    /// Dispatched to the executor and currently running.
    Running,
    /// Completed successfully.
    Succeeded,
    /// Failed, or was blocked by a failed dependency.
    Failed,
}

/// Public, read-only view of a step's per-run state.
///
/// Exposed for tests and diagnostics without leaking the internal
/// `RunState` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRunState {
    /// The run has not started yet (or the step is unknown to it).
    NotStarted,
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl From<Option<RunState>> for NodeRunState {
    fn from(state: Option<RunState>) -> Self {
        match state {
            None => NodeRunState::NotStarted,
            Some(RunState::Pending) => NodeRunState::Pending,
            Some(RunState::Running) => NodeRunState::Running,
            Some(RunState::Succeeded) => NodeRunState::Succeeded,
            Some(RunState::Failed) => NodeRunState::Failed,
        }
    }
}

/// Static step information derived from config, plus per-run state.
#[derive(Debug, Clone)]
pub(crate) struct StepInfo {
    pub name: NodeName,
    pub group: String,
    pub requires: String,
    /// Direct dependencies for this step (names in `after = [...]`).
    pub deps: Vec<NodeName>,

    /// Per-run state (`None` until the run starts).
    pub run_state: Option<RunState>,
}

impl StepInfo {
    pub fn from_config(
        name: NodeName,
        cfg: &StepConfig,
        deps: Vec<NodeName>,
        default_group: &str,
    ) -> Self {
        Self {
            name,
            group: cfg.effective_group(default_group),
            requires: cfg.requires.clone(),
            deps,
            run_state: None,
        }
    }
}

/// Description of a step that the scheduler wants the executor to run now.
#[derive(Debug, Clone)]
pub struct ScheduledNode {
    pub name: NodeName,
    pub group: String,
    pub requires: String,
}

impl ScheduledNode {
    pub(crate) fn from_step_info(info: &StepInfo) -> Self {
        Self {
            name: info.name.clone(),
            group: info.group.clone(),
            requires: info.requires.clone(),
        }
    }
}
