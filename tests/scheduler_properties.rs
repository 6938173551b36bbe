// tests/scheduler_properties.rs

//! Property tests for the scheduler: every run terminates, every step is
//! dispatched at most once, and never before its dependencies succeeded.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use rundag::config::ConfigFile;
use rundag::dag::Scheduler;
use rundag::engine::NodeOutcome;
use rundag_test_utils::builders::{ConfigFileBuilder, StepConfigBuilder};

/// Strategy to generate a valid DAG configuration.
///
/// Acyclicity is guaranteed by construction: step N may only depend on
/// steps 0..N-1.
fn dag_config_strategy(max_steps: usize) -> impl Strategy<Value = ConfigFile> {
    (1..=max_steps).prop_flat_map(|num_steps| {
        let deps_strat = proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..num_steps),
            num_steps,
        );

        deps_strat.prop_map(move |raw_deps| {
            let mut builder = ConfigFileBuilder::new().with_tool("adb", "/usr/bin/adb");
            for (i, potential_deps) in raw_deps.into_iter().enumerate() {
                let name = format!("step_{}", i);
                let mut step_builder = StepConfigBuilder::new("adb");

                // Sanitize dependencies: only allow deps < i.
                let mut valid_deps = HashSet::new();
                for dep_idx in potential_deps {
                    if i > 0 {
                        valid_deps.insert(dep_idx % i);
                    }
                }

                for dep_idx in valid_deps {
                    step_builder = step_builder.after(&format!("step_{}", dep_idx));
                }
                builder = builder.with_step(&name, step_builder.build());
            }
            builder.build()
        })
    })
}

proptest! {
    #[test]
    fn every_run_terminates_with_all_steps_terminal(
        cfg in dag_config_strategy(10),
        failing_indices in proptest::collection::vec(0..10usize, 0..5),
    ) {
        let deps_by_name: HashMap<String, Vec<String>> = cfg
            .step
            .iter()
            .map(|(name, step)| (name.clone(), step.after.clone()))
            .collect();

        let mut scheduler = Scheduler::from_config(&cfg);
        let step_names: Vec<String> =
            scheduler.step_names().map(|s| s.to_string()).collect();

        let failing: HashSet<String> = failing_indices
            .iter()
            .filter(|&&i| i < step_names.len())
            .map(|&i| step_names[i].clone())
            .collect();

        let mut dispatched: HashSet<String> = HashSet::new();
        let mut succeeded: HashSet<String> = HashSet::new();

        // Queue of steps currently "executing".
        let mut executing: Vec<String> = Vec::new();

        let start = scheduler.start_run();
        for scheduled in start.newly_scheduled {
            prop_assert!(
                dispatched.insert(scheduled.name.clone()),
                "step {} dispatched twice",
                scheduled.name
            );
            executing.push(scheduled.name);
        }

        let mut steps_taken = 0;
        let max_steps = 1000;

        while !executing.is_empty() && steps_taken < max_steps {
            steps_taken += 1;

            let name = executing.remove(0);
            let outcome = if failing.contains(&name) {
                NodeOutcome::Failed
            } else {
                succeeded.insert(name.clone());
                NodeOutcome::Success
            };

            let result = scheduler.handle_completion(&name, outcome);

            for scheduled in result.newly_scheduled {
                prop_assert!(
                    dispatched.insert(scheduled.name.clone()),
                    "step {} dispatched twice",
                    scheduled.name
                );

                // A step is only dispatched once all of its dependencies
                // have succeeded.
                for dep in &deps_by_name[&scheduled.name] {
                    prop_assert!(
                        succeeded.contains(dep),
                        "step {} dispatched before dependency {} succeeded",
                        scheduled.name,
                        dep
                    );
                }

                executing.push(scheduled.name);
            }
        }

        prop_assert!(steps_taken < max_steps, "simulation did not terminate");

        // Once nothing is executing, the run must be over: every step is
        // either succeeded or (transitively) failed.
        prop_assert!(scheduler.is_finished());
        for name in &step_names {
            let state = scheduler.run_state_of(name).unwrap();
            prop_assert!(
                matches!(
                    state,
                    rundag::dag::NodeRunState::Succeeded | rundag::dag::NodeRunState::Failed
                ),
                "step {} ended in non-terminal state {:?}",
                name,
                state
            );
        }
    }
}
