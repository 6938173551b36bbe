// src/node/sink.rs

//! Build-log sink for node diagnostic output.
//!
//! A sink is passed explicitly into `TaskNode::execute` rather than being a
//! global print function, so the host decides where diagnostics land and
//! tests can capture them.

/// Destination for single-line diagnostic output from node actions.
pub trait LogSink: Send {
    fn emit(&mut self, line: &str);
}

/// Production sink: diagnostics go to stdout.
///
/// Tracing logs are routed to stderr (see `logging`), so stdout stays a
/// clean build log.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn emit(&mut self, line: &str) {
        println!("{line}");
    }
}
