/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from config file on disk through CLI invocation
/// to correct output, using `assert_cmd` and `tempfile` for isolated test environments.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Create a project directory holding a copy of a fixture's assets file.
fn create_test_project(dir: &Path, fixture: &str) {
    fs::create_dir_all(dir.join("obj")).unwrap();
    fs::copy(
        fixtures_path().join(fixture).join("obj/project.assets.json"),
        dir.join("obj/project.assets.json"),
    )
    .unwrap();
}

/// Write a config file at the specified path.
fn write_config(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

fn run_json(args: &[&str], dir: &Path) -> (Option<i32>, serde_json::Value) {
    let output = cargo_bin_cmd!("cps-deps")
        .args(args)
        .arg("-a")
        .arg(dir)
        .output()
        .unwrap();
    let json = serde_json::from_slice(&output.stdout).unwrap_or(serde_json::Value::Null);
    (output.status.code(), json)
}

fn top_level<'a>(json: &'a serde_json::Value, name: &str) -> &'a serde_json::Value {
    json["targets"][0]["groups"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|g| g["dependencies"].as_array().unwrap().iter())
        .find(|d| d["name"] == name)
        .unwrap()
}

// ============================================================================
// Config File Auto-Discovery Tests
// ============================================================================

mod auto_discovery_tests {
    use super::*;

    #[test]
    fn test_auto_discovery_applies_format_and_target() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path(), "App");
        write_config(
            &dir.path().join("cps-deps.config.yml"),
            "format: json\ntarget: net48\n",
        );

        let (code, json) = run_json(&["tree"], dir.path());
        assert_eq!(code, Some(0));
        assert_eq!(json["kind"], "dependencyTree");
        let targets = json["targets"].as_array().unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0]["shortName"], "net48");
    }

    #[test]
    fn test_no_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path(), "App");

        cargo_bin_cmd!("cps-deps")
            .args(["targets", "-a"])
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::starts_with("App\n"));
    }

    #[test]
    fn test_auto_discovery_from_obj_directory() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path(), "App");
        write_config(&dir.path().join("cps-deps.config.yml"), "format: json\n");

        let (code, json) = run_json(&["targets"], &dir.path().join("obj"));
        assert_eq!(code, Some(0));
        assert_eq!(json["kind"], "targets");
    }
}

// ============================================================================
// CLI Override Tests
// ============================================================================

mod cli_override_tests {
    use super::*;

    #[test]
    fn test_cli_format_overrides_config() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path(), "App");
        write_config(&dir.path().join("cps-deps.config.yml"), "format: json\n");

        cargo_bin_cmd!("cps-deps")
            .args(["targets", "-f", "text", "-a"])
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::starts_with("App\n"));
    }

    #[test]
    fn test_cli_target_overrides_config() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path(), "App");
        write_config(
            &dir.path().join("cps-deps.config.yml"),
            "format: json\ntarget: net48\n",
        );

        let (code, json) = run_json(&["tree", "-t", "net6.0"], dir.path());
        assert_eq!(code, Some(0));
        assert_eq!(json["targets"][0]["shortName"], "net6.0");
    }

    #[test]
    fn test_explicit_config_path() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path(), "App");
        let config_dir = TempDir::new().unwrap();
        let config_path = config_dir.path().join("custom.yml");
        write_config(&config_path, "format: json\n");

        let output = cargo_bin_cmd!("cps-deps")
            .arg("targets")
            .arg("--config")
            .arg(&config_path)
            .arg("-a")
            .arg(dir.path())
            .output()
            .unwrap();
        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["kind"], "targets");
    }
}

// ============================================================================
// Tree Settings Tests
// ============================================================================

mod tree_settings_tests {
    use super::*;

    #[test]
    fn test_project_item_specs_mark_others_implicit() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path(), "App");
        write_config(
            &dir.path().join("cps-deps.config.yml"),
            r#"
format: json
target: net6.0
project_item_specs:
  - Serilog
"#,
        );

        let (code, json) = run_json(&["tree"], dir.path());
        assert_eq!(code, Some(0));
        assert_eq!(top_level(&json, "Serilog")["implicit"], false);
        assert_eq!(top_level(&json, "Newtonsoft.Json")["implicit"], true);
    }

    #[test]
    fn test_disabled_filter_from_config() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path(), "App");
        write_config(
            &dir.path().join("cps-deps.config.yml"),
            r#"
format: json
target: net6.0
project_item_specs:
  - Serilog
filters:
  disabled:
    - implicit-top-level
"#,
        );

        let (code, json) = run_json(&["tree"], dir.path());
        assert_eq!(code, Some(0));
        assert_eq!(top_level(&json, "Newtonsoft.Json")["implicit"], false);
    }

    #[test]
    fn test_fail_on_unresolved_from_config() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path(), "Lib");
        write_config(
            &dir.path().join("cps-deps.config.yml"),
            "fail_on_unresolved: true\n",
        );

        cargo_bin_cmd!("cps-deps")
            .args(["tree", "-a"])
            .arg(dir.path())
            .assert()
            .code(1)
            .stdout(predicate::str::contains("[unresolved]"));
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_tests {
    use super::*;

    #[test]
    fn test_missing_explicit_config_file() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path(), "App");

        cargo_bin_cmd!("cps-deps")
            .args(["targets", "--config", "/nonexistent/cps-deps.config.yml", "-a"])
            .arg(dir.path())
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path(), "App");
        write_config(
            &dir.path().join("cps-deps.config.yml"),
            "invalid: yaml: [[[broken",
        );

        cargo_bin_cmd!("cps-deps")
            .args(["targets", "-a"])
            .arg(dir.path())
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Failed to parse config file"));
    }

    #[test]
    fn test_invalid_format_in_config() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path(), "App");
        write_config(&dir.path().join("cps-deps.config.yml"), "format: markdown\n");

        cargo_bin_cmd!("cps-deps")
            .args(["targets", "-a"])
            .arg(dir.path())
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Invalid format"));
    }

    #[test]
    fn test_unknown_fields_warn_but_succeed() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path(), "App");
        write_config(
            &dir.path().join("cps-deps.config.yml"),
            "format: text\nexclude_packages: [foo]\n",
        );

        cargo_bin_cmd!("cps-deps")
            .args(["targets", "-a"])
            .arg(dir.path())
            .assert()
            .success()
            .stderr(predicate::str::contains(
                "Unknown config field 'exclude_packages'",
            ));
    }
}
