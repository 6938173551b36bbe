// tests/failure_propagation.rs

mod common;
use crate::common::builders::{ConfigFileBuilder, StepConfigBuilder};
use crate::common::init_tracing;

use std::error::Error;

use rundag::config::ConfigFile;
use rundag::dag::{NodeRunState, Scheduler};
use rundag::engine::NodeOutcome;

type TestResult = Result<(), Box<dyn Error>>;

/// Diamond: a feeds b and c; d needs both.
fn diamond() -> ConfigFile {
    ConfigFileBuilder::new()
        .with_tool("adb", "/usr/bin/adb")
        .with_step("a", StepConfigBuilder::new("adb").build())
        .with_step("b", StepConfigBuilder::new("adb").after("a").build())
        .with_step("c", StepConfigBuilder::new("adb").after("a").build())
        .with_step("d", StepConfigBuilder::new("adb").after("b").after("c").build())
        .build()
}

#[test]
fn failed_step_fails_transitive_dependents_but_not_siblings() -> TestResult {
    init_tracing();

    let mut scheduler = Scheduler::from_config(&diamond());

    scheduler.start_run();
    scheduler.handle_completion("a", NodeOutcome::Success);

    // b and c are both running now; fail b.
    let step = scheduler.handle_completion("b", NodeOutcome::Failed);

    let mut failed = step.newly_failed.clone();
    failed.sort();
    assert_eq!(failed, vec!["b".to_string(), "d".to_string()]);
    assert!(step.newly_scheduled.is_empty());
    // c is still running, so the run is not finished yet.
    assert!(!step.run_finished);

    assert_eq!(scheduler.run_state_of("b"), Some(NodeRunState::Failed));
    assert_eq!(scheduler.run_state_of("d"), Some(NodeRunState::Failed));
    assert_eq!(scheduler.run_state_of("c"), Some(NodeRunState::Running));

    // The sibling branch completes normally and finishes the run; d is
    // already failed and must not be scheduled.
    let step = scheduler.handle_completion("c", NodeOutcome::Success);
    assert!(step.newly_scheduled.is_empty());
    assert!(step.run_finished);
    assert!(scheduler.is_finished());

    Ok(())
}

#[test]
fn failed_root_fails_the_whole_chain_immediately() -> TestResult {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .with_tool("adb", "/usr/bin/adb")
        .with_step("a", StepConfigBuilder::new("adb").build())
        .with_step("b", StepConfigBuilder::new("adb").after("a").build())
        .with_step("c", StepConfigBuilder::new("adb").after("b").build())
        .build();

    let mut scheduler = Scheduler::from_config(&cfg);

    scheduler.start_run();
    let step = scheduler.handle_completion("a", NodeOutcome::Failed);

    let mut failed = step.newly_failed.clone();
    failed.sort();
    assert_eq!(
        failed,
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    );
    assert!(step.run_finished);
    assert!(scheduler.is_finished());

    Ok(())
}

#[test]
fn already_succeeded_steps_are_untouched_by_a_later_failure() -> TestResult {
    init_tracing();

    let mut scheduler = Scheduler::from_config(&diamond());

    scheduler.start_run();
    scheduler.handle_completion("a", NodeOutcome::Success);
    scheduler.handle_completion("c", NodeOutcome::Success);

    let step = scheduler.handle_completion("b", NodeOutcome::Failed);

    let mut failed = step.newly_failed.clone();
    failed.sort();
    assert_eq!(failed, vec!["b".to_string(), "d".to_string()]);

    assert_eq!(scheduler.run_state_of("a"), Some(NodeRunState::Succeeded));
    assert_eq!(scheduler.run_state_of("c"), Some(NodeRunState::Succeeded));
    assert!(step.run_finished);

    Ok(())
}
