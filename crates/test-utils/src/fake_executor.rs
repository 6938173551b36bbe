use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use rundag::dag::ScheduledNode;
use rundag::engine::{NodeOutcome, RuntimeEvent};
use rundag::errors::Result;
use rundag::exec::ExecutorBackend;

/// A fake executor that:
/// - records which nodes were "run"
/// - immediately reports `NodeCompleted` for each dispatched node, with
///   `Failed` for nodes listed in `failing` and `Success` otherwise.
pub struct FakeExecutor {
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    executed: Arc<Mutex<Vec<String>>>,
    failing: HashSet<String>,
}

impl FakeExecutor {
    pub fn new(
        runtime_tx: mpsc::Sender<RuntimeEvent>,
        executed: Arc<Mutex<Vec<String>>>,
    ) -> Self {
        Self {
            runtime_tx,
            executed,
            failing: HashSet::new(),
        }
    }

    /// Nodes whose completion should be reported as failed.
    pub fn with_failures<I: IntoIterator<Item = String>>(mut self, nodes: I) -> Self {
        self.failing = nodes.into_iter().collect();
        self
    }
}

impl ExecutorBackend for FakeExecutor {
    fn dispatch_ready_nodes(
        &mut self,
        nodes: Vec<ScheduledNode>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let tx = self.runtime_tx.clone();
        let executed = Arc::clone(&self.executed);
        let failing = self.failing.clone();

        Box::pin(async move {
            for n in nodes {
                {
                    let mut guard = executed.lock().unwrap();
                    guard.push(n.name.clone());
                }

                let outcome = if failing.contains(&n.name) {
                    NodeOutcome::Failed
                } else {
                    NodeOutcome::Success
                };

                tx.send(RuntimeEvent::NodeCompleted {
                    node: n.name.clone(),
                    outcome,
                })
                .await
                .map_err(anyhow::Error::from)?;
            }
            Ok(())
        })
    }
}
