// src/node/toolchain.rs

use std::collections::BTreeMap;

/// Read-only tool name -> executable path lookup.
///
/// Built once from `[toolchain]` at startup and shared across all nodes
/// behind an `Arc`. Entries may legitimately be absent; the node action
/// decides what absence means (see `TaskNode::execute`).
#[derive(Debug, Clone, Default)]
pub struct ToolchainConfig {
    tools: BTreeMap<String, String>,
}

impl ToolchainConfig {
    pub fn new(tools: BTreeMap<String, String>) -> Self {
        Self { tools }
    }

    /// Executable path registered for `name`, if any.
    pub fn tool_path(&self, name: &str) -> Option<&str> {
        self.tools.get(name).map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// All registered entries, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tools.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for ToolchainConfig {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            tools: iter.into_iter().collect(),
        }
    }
}
