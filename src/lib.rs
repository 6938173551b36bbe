// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod node;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::dag::Scheduler;
use crate::engine::{CoreRuntime, NodeName, Runtime, RuntimeEvent, RuntimeOptions};
use crate::exec::LocalExecutorBackend;
use crate::node::{NodeConfig, StdoutSink, TaskNode, ToolchainConfig};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - node setup (the configure phase)
/// - scheduler / runtime
/// - executor
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    // Setup phase: create and configure every node exactly once.
    let nodes = build_nodes(&cfg)?;

    // DAG + scheduler.
    let scheduler = Scheduler::from_config(&cfg);

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    // In-process executor backend owning the nodes and the build-log sink.
    let executor = LocalExecutorBackend::new(nodes, Box::new(StdoutSink), rt_tx.clone());

    // Ctrl-C -> graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    info!(steps = cfg.step.len(), "seeding build run");
    rt_tx.send(RuntimeEvent::RunStarted).await?;

    let options = RuntimeOptions {
        fail_fast: cfg.settings.fail_fast,
    };

    // Construct the pure core runtime (single source of truth for semantics).
    let core = CoreRuntime::new(scheduler, options);

    // Construct the async IO shell around the core.
    let runtime = Runtime::new(core, rt_rx, executor);
    runtime.run().await?;
    Ok(())
}

/// Build the node registry from validated config.
///
/// Every node goes through its configure phase here, before the run starts;
/// the registry handed to the executor contains only `Configured` nodes.
pub fn build_nodes(cfg: &ConfigFile) -> Result<BTreeMap<NodeName, TaskNode>> {
    let toolchain = Arc::new(ToolchainConfig::new(cfg.toolchain.clone()));
    let mut nodes = BTreeMap::new();

    for (name, step) in cfg.step.iter() {
        let mut node = TaskNode::new(
            name.clone(),
            step.effective_group(&cfg.settings.default_group),
        );
        node.configure(
            step.after.iter().cloned().collect(),
            NodeConfig {
                toolchain: Arc::clone(&toolchain),
                requires: step.requires.clone(),
            },
        )?;
        nodes.insert(name.clone(), node);
    }

    Ok(nodes)
}

/// Simple dry-run output: print settings, toolchain and steps.
fn print_dry_run(cfg: &ConfigFile) {
    println!("rundag dry-run");
    println!("  settings.fail_fast = {}", cfg.settings.fail_fast);
    println!("  settings.default_group = {}", cfg.settings.default_group);
    println!();

    println!("toolchain ({}):", cfg.toolchain.len());
    for (tool, path) in cfg.toolchain.iter() {
        println!("  - {tool} = {path}");
    }
    println!();

    println!("steps ({}):", cfg.step.len());
    for (name, step) in cfg.step.iter() {
        println!("  - {name}");
        println!(
            "      group: {}",
            step.effective_group(&cfg.settings.default_group)
        );
        println!("      requires: {}", step.requires);
        if !step.after.is_empty() {
            println!("      after: {:?}", step.after);
        }
    }
}
