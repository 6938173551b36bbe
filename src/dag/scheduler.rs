// src/dag/scheduler.rs

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::config::model::ConfigFile;
use crate::dag::graph::DagGraph;
use crate::dag::scheduler_step::SchedulerStep;
use crate::dag::step_state::{NodeRunState, RunState, ScheduledNode, StepInfo};
use crate::engine::{NodeName, NodeOutcome};

/// Scheduler holds the immutable DAG plus mutable per-run state.
///
/// It is the external ordering authority the nodes themselves know nothing
/// about. It is responsible for:
/// - deciding when a step is "ready" to run (all deps succeeded)
/// - marking steps as succeeded/failed
/// - scheduling dependents when appropriate
/// - failing dependents when a step fails
///
/// A scheduler performs exactly one run: `start_run` seeds it, and
/// `handle_completion` drives it until every step is terminal. This matches
/// the tool's run-once build semantics; it guarantees each step is
/// dispatched at most once and only after its dependencies completed
/// successfully.
#[derive(Debug)]
pub struct Scheduler {
    graph: DagGraph,
    steps: HashMap<NodeName, StepInfo>,
    started: bool,
}

impl Scheduler {
    /// Construct a scheduler from a validated [`ConfigFile`].
    pub fn from_config(cfg: &ConfigFile) -> Self {
        let graph = DagGraph::from_config(cfg);
        let default_group = cfg.settings.default_group.as_str();

        let mut steps = HashMap::new();

        for (name, sc) in cfg.step.iter() {
            let deps = graph
                .dependencies_of(name)
                .iter()
                .cloned()
                .collect::<Vec<_>>();
            let info = StepInfo::from_config(name.clone(), sc, deps, default_group);
            steps.insert(name.clone(), info);
        }

        Self {
            graph,
            steps,
            started: false,
        }
    }

    /// Whether the run has started and every step reached a terminal state.
    pub fn is_finished(&self) -> bool {
        self.started && self.all_steps_terminal()
    }

    /// Read-only view of the given step's run state.
    pub fn run_state_of(&self, step: &str) -> Option<NodeRunState> {
        let info = self.steps.get(step)?;
        Some(info.run_state.into())
    }

    /// Whether the dependencies of `step` are satisfied for this run.
    ///
    /// Returns `None` if the step is unknown.
    pub fn deps_satisfied(&self, step: &str) -> Option<bool> {
        let info = self.steps.get(step)?;
        Some(self.deps_satisfied_for_info(info))
    }

    /// All step names known to this scheduler.
    pub fn step_names(&self) -> impl Iterator<Item = &str> {
        self.graph.steps()
    }

    /// Start the run: every step becomes `Pending`, and steps without
    /// dependencies are immediately scheduled.
    ///
    /// Calling this twice is a no-op for a scheduler that already started.
    pub fn start_run(&mut self) -> SchedulerStep {
        if self.started {
            warn!("start_run called on a scheduler that already started; ignoring");
            return SchedulerStep::empty();
        }

        self.started = true;

        for info in self.steps.values_mut() {
            info.run_state = Some(RunState::Pending);
        }

        info!(steps = self.steps.len(), "scheduler: starting run");

        let newly_scheduled = self.collect_new_ready_steps();

        SchedulerStep {
            newly_scheduled,
            newly_failed: Vec::new(),
            run_finished: self.is_finished(),
        }
    }

    /// Record the outcome of a dispatched step.
    ///
    /// On success, dependents whose dependencies are now all satisfied are
    /// scheduled. On failure, the step and all of its transitive dependents
    /// still in the run are marked failed.
    pub fn handle_completion(&mut self, step: &str, outcome: NodeOutcome) -> SchedulerStep {
        if !self.started {
            warn!(
                step = %step,
                "handle_completion called before start_run; ignoring"
            );
            return SchedulerStep::empty();
        }

        let mut newly_scheduled = Vec::new();
        let mut newly_failed = Vec::new();

        match self.steps.get_mut(step) {
            Some(info) => match outcome {
                NodeOutcome::Success => {
                    info.run_state = Some(RunState::Succeeded);
                    debug!(step = %info.name, "step completed successfully");
                    newly_scheduled.extend(self.collect_new_ready_steps());
                }
                NodeOutcome::Failed => {
                    info.run_state = Some(RunState::Failed);
                    warn!(
                        step = %info.name,
                        "step failed; failing dependents"
                    );
                    newly_failed.push(info.name.clone());
                    newly_failed.extend(self.mark_dependents_failed(step));
                }
            },
            None => {
                warn!(step = %step, "completion for unknown step; ignoring");
            }
        }

        SchedulerStep {
            newly_scheduled,
            newly_failed,
            run_finished: self.is_finished(),
        }
    }

    /// Collect steps that are `Pending` with all dependencies satisfied,
    /// mark them `Running`, and return them as `ScheduledNode`s.
    fn collect_new_ready_steps(&mut self) -> Vec<ScheduledNode> {
        // Decide first, then mutate to avoid borrowing issues.
        let candidates: Vec<NodeName> = self
            .steps
            .values()
            .filter_map(|info| {
                if matches!(info.run_state, Some(RunState::Pending))
                    && self.deps_satisfied_for_info(info)
                {
                    Some(info.name.clone())
                } else {
                    None
                }
            })
            .collect();

        let mut ready = Vec::new();

        for name in candidates {
            if let Some(info) = self.steps.get_mut(&name) {
                info!(
                    step = %info.name,
                    group = %info.group,
                    "dependencies satisfied; scheduling step"
                );

                info.run_state = Some(RunState::Running);
                ready.push(ScheduledNode::from_step_info(info));
            }
        }

        ready
    }

    /// Mark all transitive dependents of a failed step as `Failed`.
    ///
    /// Returns the steps that were newly marked as failed (excluding the
    /// root step; the caller adds that separately).
    fn mark_dependents_failed(&mut self, failed_step: &str) -> Vec<NodeName> {
        let mut stack: Vec<NodeName> = self
            .graph
            .dependents_of(failed_step)
            .iter()
            .cloned()
            .collect();

        let mut newly_failed = Vec::new();

        while let Some(name) = stack.pop() {
            if let Some(info) = self.steps.get_mut(&name) {
                match info.run_state {
                    Some(RunState::Pending) | Some(RunState::Running) => {
                        info.run_state = Some(RunState::Failed);
                        debug!(
                            step = %info.name,
                            "marking dependent as failed due to upstream failure"
                        );
                        newly_failed.push(info.name.clone());
                        stack.extend(self.graph.dependents_of(&name).iter().cloned());
                    }
                    Some(RunState::Succeeded) | Some(RunState::Failed) | None => {
                        // Already terminal or not yet part of the run.
                    }
                }
            }
        }

        newly_failed
    }

    fn deps_satisfied_for_info(&self, info: &StepInfo) -> bool {
        for dep_name in &info.deps {
            let dep = match self.steps.get(dep_name) {
                Some(d) => d,
                None => {
                    warn!(
                        step = %info.name,
                        dep = %dep_name,
                        "dependency missing from steps map"
                    );
                    return false;
                }
            };

            if dep.run_state != Some(RunState::Succeeded) {
                return false;
            }
        }

        true
    }

    fn all_steps_terminal(&self) -> bool {
        !self.steps.values().any(|info| {
            matches!(
                info.run_state,
                None | Some(RunState::Pending) | Some(RunState::Running)
            )
        })
    }
}
