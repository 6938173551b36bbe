// src/exec/executor_loop.rs

use std::collections::BTreeMap;

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::dag::ScheduledNode;
use crate::engine::{NodeName, NodeOutcome, RuntimeEvent};
use crate::node::{LogSink, TaskNode};

/// Spawn the background executor loop.
///
/// The returned `mpsc::Sender<ScheduledNode>` is what the runtime's backend
/// uses to hand over ready nodes. The loop owns the configured node registry
/// and the build-log sink; node actions are in-process, so dispatched nodes
/// execute one at a time in arrival order.
pub fn spawn_executor(
    nodes: BTreeMap<NodeName, TaskNode>,
    sink: Box<dyn LogSink>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> mpsc::Sender<ScheduledNode> {
    let (tx, mut rx) = mpsc::channel::<ScheduledNode>(32);

    tokio::spawn(async move {
        let mut nodes = nodes;
        let mut sink = sink;

        info!("executor loop started");
        while let Some(scheduled) = rx.recv().await {
            let outcome = execute_node(&mut nodes, sink.as_mut(), &scheduled);

            let sent = runtime_tx
                .send(RuntimeEvent::NodeCompleted {
                    node: scheduled.name.clone(),
                    outcome,
                })
                .await;

            if sent.is_err() {
                warn!("runtime event channel closed; stopping executor loop");
                break;
            }
        }
        info!("executor loop finished (channel closed)");
    });

    tx
}

/// Execute one dispatched node against the registry.
///
/// All errors are converted into a `Failed` outcome for the scheduler; they
/// are also logged via `tracing::error!`, never swallowed.
fn execute_node(
    nodes: &mut BTreeMap<NodeName, TaskNode>,
    sink: &mut dyn LogSink,
    scheduled: &ScheduledNode,
) -> NodeOutcome {
    info!(
        node = %scheduled.name,
        group = %scheduled.group,
        requires = %scheduled.requires,
        "executing node"
    );

    let node = match nodes.get_mut(&scheduled.name) {
        Some(n) => n,
        None => {
            error!(
                node = %scheduled.name,
                "scheduled node not present in registry"
            );
            return NodeOutcome::Failed;
        }
    };

    match node.execute(sink) {
        Ok(()) => {
            info!(node = %scheduled.name, "node executed successfully");
            NodeOutcome::Success
        }
        Err(err) => {
            error!(node = %scheduled.name, error = %err, "node execution error");
            NodeOutcome::Failed
        }
    }
}
