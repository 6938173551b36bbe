// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! This module contains a synchronous, deterministic "core runtime" that
//! consumes [`RuntimeEvent`]s and produces:
//! - an updated core state
//! - a list of "commands" describing what the IO shell should do next
//!
//! The async/IO-heavy shell (`engine::runtime::Runtime`) is responsible for:
//! - reading events from channels
//! - sending `ScheduledNode`s to the executor
//! - handling Ctrl+C / shutdown
//!
//! The core can be unit tested without any Tokio, channels, or processes.

use crate::dag::Scheduler;
use crate::engine::event_handlers::{handle_node_completion, handle_run_started, CoreStep};
use crate::engine::{NodeName, RuntimeEvent, RuntimeOptions};

/// Pure core runtime state.
///
/// This owns:
/// - the DAG scheduler
/// - runtime options (e.g. `fail_fast`)
/// - the record of failed nodes for final reporting
///
/// It has **no** channels, no Tokio types, and does not perform any IO.
#[derive(Debug)]
pub struct CoreRuntime {
    scheduler: Scheduler,
    options: RuntimeOptions,
    failed: Vec<NodeName>,
    interrupted: bool,
}

impl CoreRuntime {
    pub fn new(scheduler: Scheduler, options: RuntimeOptions) -> Self {
        Self {
            scheduler,
            options,
            failed: Vec::new(),
            interrupted: false,
        }
    }

    /// Whether every step reached a terminal state (for tests).
    pub fn is_finished(&self) -> bool {
        self.scheduler.is_finished()
    }

    /// Nodes that failed during the run, in completion order.
    pub fn failed_nodes(&self) -> &[NodeName] {
        &self.failed
    }

    /// Whether a shutdown request stopped the run early.
    pub fn was_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Handle a single runtime event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        match event {
            RuntimeEvent::RunStarted => handle_run_started(&mut self.scheduler),
            RuntimeEvent::NodeCompleted { node, outcome } => handle_node_completion(
                &mut self.scheduler,
                &self.options,
                &mut self.failed,
                node,
                outcome,
            ),
            RuntimeEvent::ShutdownRequested => {
                self.interrupted = true;
                CoreStep {
                    commands: Vec::new(),
                    keep_running: false,
                }
            }
        }
    }
}
