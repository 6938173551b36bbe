// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The runtime talks to an `ExecutorBackend` instead of a raw mpsc sender.
//! This makes it easy to swap in a fake executor in tests while keeping the
//! production executor implementation in [`executor_loop`].
//!
//! - `LocalExecutorBackend` is the default implementation used by `rundag`.
//!   It wraps the executor loop and forwards scheduled nodes over an mpsc
//!   channel.
//! - Tests can provide their own `ExecutorBackend` that, for example,
//!   records which nodes were dispatched and directly emits `NodeCompleted`
//!   events.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;

use crate::dag::ScheduledNode;
use crate::engine::{NodeName, RuntimeEvent};
use crate::errors::{Error, Result};
use crate::node::{LogSink, TaskNode};

use super::executor_loop::spawn_executor;

/// Trait abstracting how scheduled nodes are executed.
///
/// Production code uses [`LocalExecutorBackend`]; tests can provide their
/// own implementation that doesn't touch real nodes.
pub trait ExecutorBackend: Send {
    /// Dispatch the given nodes for execution.
    ///
    /// The implementation is free to:
    /// - drive real `TaskNode`s (production)
    /// - simulate completion and emit `RuntimeEvent`s (tests)
    fn dispatch_ready_nodes(
        &mut self,
        nodes: Vec<ScheduledNode>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Local in-process executor backend used in production.
///
/// Internally, this wraps the executor loop in [`spawn_executor`]. The
/// runtime calls `dispatch_ready_nodes`, which forwards the nodes to the
/// background loop via an mpsc channel.
pub struct LocalExecutorBackend {
    tx: mpsc::Sender<ScheduledNode>,
}

impl LocalExecutorBackend {
    /// Create a new local executor backend, handing it ownership of the
    /// configured node registry and the build-log sink, wired to the given
    /// runtime event sender.
    ///
    /// This spawns the background executor loop immediately.
    pub fn new(
        nodes: BTreeMap<NodeName, TaskNode>,
        sink: Box<dyn LogSink>,
        runtime_tx: mpsc::Sender<RuntimeEvent>,
    ) -> Self {
        let tx = spawn_executor(nodes, sink, runtime_tx);
        Self { tx }
    }
}

impl ExecutorBackend for LocalExecutorBackend {
    fn dispatch_ready_nodes(
        &mut self,
        nodes: Vec<ScheduledNode>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        // Clone the sender so the future doesn't borrow `self` across `await`.
        let tx = self.tx.clone();

        Box::pin(async move {
            for node in nodes {
                tx.send(node).await.map_err(Error::from)?;
            }
            Ok(())
        })
    }
}
