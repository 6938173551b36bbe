// src/exec/mod.rs

//! Node execution layer.
//!
//! This module is responsible for actually driving the configured
//! `TaskNode`s when the scheduler declares them ready, and for reporting
//! back to the orchestration runtime via `RuntimeEvent`s.
//!
//! - [`executor_loop`] owns the node registry and the build-log sink, and
//!   executes dispatched nodes one at a time.
//! - [`backend`] provides the `ExecutorBackend` trait and a concrete
//!   `LocalExecutorBackend` that the runtime uses in production, and which
//!   tests can replace with a fake implementation.

pub mod backend;
pub mod executor_loop;

pub use backend::{ExecutorBackend, LocalExecutorBackend};
pub use executor_loop::spawn_executor;
