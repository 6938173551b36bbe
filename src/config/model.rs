// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file, before validation.
///
/// This is a direct mapping of a `Rundag.toml`:
///
/// ```toml
/// [settings]
/// fail_fast = false
///
/// [toolchain]
/// adb = "/usr/bin/adb"
///
/// [step.record-screenshots]
/// group = "verification"
/// after = ["connected-instrument-test"]
/// requires = "adb"
/// ```
///
/// All sections except `[step.<name>]` are optional and have defaults.
/// Use [`ConfigFile::try_from`] to obtain a validated configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Global behaviour settings from `[settings]`.
    #[serde(default)]
    pub settings: SettingsSection,

    /// Tool name -> executable path map from `[toolchain]`.
    ///
    /// Entries referenced by steps are *not* required to exist here; a
    /// missing entry surfaces when the step executes, not at load time.
    #[serde(default)]
    pub toolchain: BTreeMap<String, String>,

    /// All steps from `[step.<name>]`.
    ///
    /// Keys are the *step names* (e.g. `"lint"`, `"record-screenshots"`).
    #[serde(default)]
    pub step: BTreeMap<String, StepConfig>,
}

/// Validated configuration.
///
/// Constructed via `TryFrom<RawConfigFile>`, which guarantees that every
/// `after` reference resolves, the step graph is acyclic, and the global
/// settings are sane.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub settings: SettingsSection,
    pub toolchain: BTreeMap<String, String>,
    pub step: BTreeMap<String, StepConfig>,
}

impl ConfigFile {
    /// Assemble a `ConfigFile` from raw parts that have already been
    /// validated. Only `config::validate` should call this.
    pub(crate) fn new_unchecked(
        settings: SettingsSection,
        toolchain: BTreeMap<String, String>,
        step: BTreeMap<String, StepConfig>,
    ) -> Self {
        Self {
            settings,
            toolchain,
            step,
        }
    }
}

/// `[settings]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsSection {
    /// If true, stop dispatching new steps after the first failure.
    ///
    /// With the default `false`, independent branches of the DAG keep
    /// running; only dependents of the failed step are skipped.
    #[serde(default)]
    pub fail_fast: bool,

    /// Group assigned to steps that do not set `group` themselves.
    #[serde(default = "default_group")]
    pub default_group: String,
}

fn default_group() -> String {
    "build".to_string()
}

impl Default for SettingsSection {
    fn default() -> Self {
        Self {
            fail_fast: false,
            default_group: default_group(),
        }
    }
}

/// `[step.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StepConfig {
    /// Name of the `[toolchain]` entry this step's action resolves.
    pub requires: String,

    /// Dependency list: this step waits for all steps listed here.
    ///
    /// This is the TOML `after = ["lint", "test"]` field.
    #[serde(default)]
    pub after: Vec<String>,

    /// Optional group label; falls back to `settings.default_group`.
    #[serde(default)]
    pub group: Option<String>,
}

impl StepConfig {
    /// Effective group for this step given the configured default.
    pub fn effective_group(&self, default_group: &str) -> String {
        self.group
            .clone()
            .unwrap_or_else(|| default_group.to_string())
    }
}
