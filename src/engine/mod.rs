// src/engine/mod.rs

//! Orchestration engine for rundag.
//!
//! This module ties together:
//! - the DAG scheduler
//! - the main runtime event loop that reacts to:
//!   - the run-start signal
//!   - node completion events
//!   - shutdown signals
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

/// Canonical node name type used throughout the engine.
pub type NodeName = String;

/// Outcome of a node execution for the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeOutcome {
    Success,
    Failed,
}

/// Runtime options used by both the core and the async shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeOptions {
    /// If true, stop dispatching new nodes after the first failure.
    pub fail_fast: bool,
}

/// Events flowing into the runtime from the host and the executor.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// Start the build run: seed the scheduler and dispatch the DAG roots.
    RunStarted,
    /// A node finished executing with a concrete outcome.
    NodeCompleted {
        node: NodeName,
        outcome: NodeOutcome,
    },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod core;
pub mod event_handlers;
pub mod runtime;

pub use self::core::CoreRuntime;
pub use event_handlers::{CoreCommand, CoreStep};
pub use runtime::Runtime;
