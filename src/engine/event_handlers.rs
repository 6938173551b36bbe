// src/engine/event_handlers.rs

//! Event handling logic for the core runtime.

use crate::dag::{ScheduledNode, Scheduler};
use crate::engine::{NodeName, NodeOutcome, RuntimeOptions};

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone)]
pub enum CoreCommand {
    /// Send these nodes to the executor.
    DispatchNodes(Vec<ScheduledNode>),
    /// Request that the process exits.
    RequestExit,
}

/// Decision returned by the core after handling a single `RuntimeEvent`.
#[derive(Debug, Clone)]
pub struct CoreStep {
    /// Commands the IO shell should execute (dispatch nodes, exit).
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

/// Handle the run-start event: seed the scheduler and dispatch the roots.
///
/// A run over a validated, non-empty DAG always has at least one root, so
/// this normally dispatches work. Should the run somehow finish
/// immediately, the shell is told to exit.
pub fn handle_run_started(scheduler: &mut Scheduler) -> CoreStep {
    let step = scheduler.start_run();

    let mut commands = Vec::new();
    if !step.newly_scheduled.is_empty() {
        commands.push(CoreCommand::DispatchNodes(step.newly_scheduled));
    }

    if step.run_finished {
        commands.push(CoreCommand::RequestExit);
        return CoreStep {
            commands,
            keep_running: false,
        };
    }

    CoreStep {
        commands,
        keep_running: true,
    }
}

/// Handle a node completion event.
///
/// Newly failed node names are appended to `failed` so the runtime can
/// report them when the run ends. With `fail_fast`, the first failure stops
/// the loop without dispatching further nodes.
pub fn handle_node_completion(
    scheduler: &mut Scheduler,
    options: &RuntimeOptions,
    failed: &mut Vec<NodeName>,
    node: NodeName,
    outcome: NodeOutcome,
) -> CoreStep {
    let step = scheduler.handle_completion(&node, outcome);

    failed.extend(step.newly_failed.iter().cloned());

    let mut commands = Vec::new();
    let mut keep_running = true;

    if step.run_finished {
        keep_running = false;
        commands.push(CoreCommand::RequestExit);
    } else if options.fail_fast && !step.newly_failed.is_empty() {
        keep_running = false;
        commands.push(CoreCommand::RequestExit);
    } else if !step.newly_scheduled.is_empty() {
        commands.push(CoreCommand::DispatchNodes(step.newly_scheduled));
    }

    CoreStep {
        commands,
        keep_running,
    }
}
