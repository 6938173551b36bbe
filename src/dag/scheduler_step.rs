// src/dag/scheduler_step.rs

//! Step-by-step execution result types for the scheduler.

use crate::dag::step_state::ScheduledNode;
use crate::engine::NodeName;

/// Structured result of a single scheduler "step".
///
/// This is useful for tests that want to manually step the DAG and make
/// assertions about what changed.
#[derive(Debug, Clone)]
pub struct SchedulerStep {
    /// Steps that became ready to run as a result of this step.
    pub newly_scheduled: Vec<ScheduledNode>,
    /// Steps that were newly marked as failed in this step (including the
    /// step that failed and any dependents).
    pub newly_failed: Vec<NodeName>,
    /// Whether this step caused the run to finish (i.e. the scheduler is
    /// now done).
    pub run_finished: bool,
}

impl SchedulerStep {
    pub(crate) fn empty() -> Self {
        Self {
            newly_scheduled: Vec::new(),
            newly_failed: Vec::new(),
            run_finished: false,
        }
    }
}
