// tests/config_validation.rs

use std::io::Write;
use tempfile::NamedTempFile;

use rundag::config::load_and_validate;
use rundag::errors::RundagError;

fn load_str(toml: &str) -> Result<rundag::config::ConfigFile, RundagError> {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{toml}").unwrap();
    load_and_validate(file.path())
}

#[test]
fn valid_config_loads_with_defaults_applied() {
    let cfg = load_str(
        r#"
[toolchain]
adb = "/usr/bin/adb"

[step.connected-instrument-test]
requires = "adb"

[step.record-screenshots]
group = "verification"
after = ["connected-instrument-test"]
requires = "adb"
"#,
    )
    .unwrap();

    assert!(!cfg.settings.fail_fast);
    assert_eq!(cfg.settings.default_group, "build");
    assert_eq!(cfg.step.len(), 2);

    let record = &cfg.step["record-screenshots"];
    assert_eq!(record.effective_group("build"), "verification");
    assert_eq!(record.after, vec!["connected-instrument-test".to_string()]);

    let test = &cfg.step["connected-instrument-test"];
    assert_eq!(test.effective_group(&cfg.settings.default_group), "build");
}

#[test]
fn dag_cycle_returns_structured_error() {
    let result = load_str(
        r#"
[step.a]
requires = "adb"
after = ["b"]

[step.b]
requires = "adb"
after = ["a"]
"#,
    );

    match result {
        Err(RundagError::DagCycle(msg)) => {
            assert!(msg.contains("cycle detected"));
            assert!(msg.contains("a") || msg.contains("b"));
        }
        Err(e) => panic!("Expected DagCycle error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn unknown_dependency_returns_config_error() {
    let result = load_str(
        r#"
[step.a]
requires = "adb"
after = ["nonexistent"]
"#,
    );

    match result {
        Err(RundagError::ConfigError(msg)) => {
            assert!(msg.contains("unknown dependency"));
            assert!(msg.contains("nonexistent"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn self_dependency_returns_config_error() {
    let result = load_str(
        r#"
[step.a]
requires = "adb"
after = ["a"]
"#,
    );

    match result {
        Err(RundagError::ConfigError(msg)) => {
            assert!(msg.contains("cannot depend on itself"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn config_without_steps_is_rejected() {
    let result = load_str(
        r#"
[toolchain]
adb = "/usr/bin/adb"
"#,
    );

    match result {
        Err(RundagError::ConfigError(msg)) => {
            assert!(msg.contains("at least one [step.<name>]"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn empty_requires_is_rejected() {
    let result = load_str(
        r#"
[step.a]
requires = ""
"#,
    );

    match result {
        Err(RundagError::ConfigError(msg)) => {
            assert!(msg.contains("empty `requires`"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn empty_default_group_is_rejected() {
    let result = load_str(
        r#"
[settings]
default_group = "  "

[step.a]
requires = "adb"
"#,
    );

    match result {
        Err(RundagError::ConfigError(msg)) => {
            assert!(msg.contains("default_group"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn missing_required_tool_is_not_a_config_error() {
    // `requires` pointing at an absent toolchain entry is legal at load
    // time; it only fails when the step executes.
    let cfg = load_str(
        r#"
[step.a]
requires = "adb"
"#,
    )
    .unwrap();

    assert!(cfg.toolchain.is_empty());
}

#[test]
fn malformed_toml_returns_toml_error() {
    let result = load_str("this is not toml = [");

    assert!(matches!(result, Err(RundagError::TomlError(_))));
}

#[test]
fn missing_file_returns_io_error() {
    let result = load_and_validate("/nonexistent/Rundag.toml");

    assert!(matches!(result, Err(RundagError::IoError(_))));
}
