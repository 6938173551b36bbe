#![allow(dead_code)]

use std::collections::BTreeMap;
use rundag::config::{ConfigFile, RawConfigFile, SettingsSection, StepConfig};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                settings: SettingsSection::default(),
                toolchain: BTreeMap::new(),
                step: BTreeMap::new(),
            },
        }
    }

    pub fn with_step(mut self, name: &str, step: StepConfig) -> Self {
        self.config.step.insert(name.to_string(), step);
        self
    }

    pub fn with_tool(mut self, name: &str, path: &str) -> Self {
        self.config
            .toolchain
            .insert(name.to_string(), path.to_string());
        self
    }

    pub fn with_fail_fast(mut self, val: bool) -> Self {
        self.config.settings.fail_fast = val;
        self
    }

    pub fn with_default_group(mut self, group: &str) -> Self {
        self.config.settings.default_group = group.to_string();
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `StepConfig`.
pub struct StepConfigBuilder {
    step: StepConfig,
}

impl StepConfigBuilder {
    pub fn new(requires: &str) -> Self {
        Self {
            step: StepConfig {
                requires: requires.to_string(),
                after: vec![],
                group: None,
            },
        }
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.step.after.push(dep.to_string());
        self
    }

    pub fn group(mut self, group: &str) -> Self {
        self.step.group = Some(group.to_string());
        self
    }

    pub fn build(self) -> StepConfig {
        self.step
    }
}
