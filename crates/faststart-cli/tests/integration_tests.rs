//! Integration tests for faststart-cli.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `faststart` running in `dir` with an empty config file and no
/// environment overrides.
fn faststart(dir: &Path) -> Command {
    let config = dir.join("faststart-test.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let mut cmd = Command::cargo_bin("faststart").unwrap();
    cmd.current_dir(dir)
        .env_remove("FASTSTART_TEMPLATES_DIR")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(config);
    cmd
}

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().unwrap();
    faststart(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("matrix"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    faststart(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn new_without_auth_writes_router_and_endpoints() {
    let temp = TempDir::new().unwrap();
    faststart(temp.path())
        .args(["new", "orders", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created"));

    let v1 = temp.path().join("orders/app/api/v1");
    assert!(v1.join("__init__.py").is_file());
    assert!(v1.join("endpoints.py").is_file());
    assert!(!v1.join("auth.py").exists());

    let endpoints = fs::read_to_string(v1.join("endpoints.py")).unwrap();
    assert!(endpoints.contains("Welcome to Orders API"));
}

#[test]
fn new_with_jwt_and_postgres_writes_async_auth() {
    let temp = TempDir::new().unwrap();
    faststart(temp.path())
        .args(["new", "billing", "--db", "postgres", "--auth", "jwt", "-y"])
        .assert()
        .success();

    let auth = fs::read_to_string(temp.path().join("billing/app/api/v1/auth.py")).unwrap();
    assert!(auth.contains("AsyncSession"));
    assert!(auth.contains("await "));
}

#[test]
fn new_sync_flag_generates_plain_session() {
    let temp = TempDir::new().unwrap();
    faststart(temp.path())
        .args(["new", "billing", "-d", "mysql", "-a", "oauth2", "--sync", "-y"])
        .assert()
        .success();

    let auth = fs::read_to_string(temp.path().join("billing/app/api/v1/auth.py")).unwrap();
    assert!(auth.contains("from sqlalchemy.orm import Session"));
    assert!(!auth.contains("AsyncSession"));
}

#[test]
fn new_into_nested_path_uses_leaf_name() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("services")).unwrap();
    faststart(temp.path())
        .args(["new", "services/inventory-service", "--type", "microservice", "-y"])
        .assert()
        .success();

    let endpoints = fs::read_to_string(
        temp.path()
            .join("services/inventory-service/app/api/v1/endpoints.py"),
    )
    .unwrap();
    assert!(endpoints.contains("Welcome to Inventory Service API"));
    assert!(endpoints.contains("@router.post(\"/process\")"));
}

#[test]
fn config_defaults_apply_when_flags_are_absent() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("faststart-test.toml"),
        "[defaults]\nauth = \"api-key\"\n",
    )
    .unwrap();

    faststart(temp.path())
        .args(["new", "gateway", "-y"])
        .assert()
        .success();
    assert!(temp.path().join("gateway/app/api/v1/auth.py").is_file());
}

#[test]
fn dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    faststart(temp.path())
        .args(["new", "orders", "--auth", "api-key", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("app/api/v1/auth.py"))
        .stdout(predicate::str::contains("app/api/v1/endpoints.py"));

    assert!(!temp.path().join("orders").exists());
}

#[test]
fn dry_run_json_prints_rendered_files() {
    let temp = TempDir::new().unwrap();
    let out = faststart(temp.path())
        .args(["--output-format", "json", "new", "orders", "--dry-run"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let files: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let files = files.as_object().unwrap();
    assert_eq!(files.len(), 2);
    assert!(files["app/api/v1/__init__.py"]
        .as_str()
        .unwrap()
        .contains("from .endpoints import router"));
}

#[test]
fn force_writes_into_existing_directory() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("orders")).unwrap();
    fs::write(temp.path().join("orders/README.md"), "keep me").unwrap();

    faststart(temp.path())
        .args(["new", "orders", "--force", "-y"])
        .assert()
        .success();

    assert!(temp.path().join("orders/app/api/v1/endpoints.py").is_file());
    assert_eq!(
        fs::read_to_string(temp.path().join("orders/README.md")).unwrap(),
        "keep me"
    );
}

#[test]
fn quiet_new_prints_nothing() {
    let temp = TempDir::new().unwrap();
    faststart(temp.path())
        .args(["-q", "new", "orders"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(temp.path().join("orders/app/api/v1/__init__.py").is_file());
}

#[test]
fn list_shows_builtin_payloads() {
    let temp = TempDir::new().unwrap();
    faststart(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Payload templates"))
        .stdout(predicate::str::contains("auth-jwt-sql"))
        .stdout(predicate::str::contains("router-root-only"));
}

#[test]
fn list_json_is_parseable() {
    let temp = TempDir::new().unwrap();
    let out = faststart(temp.path())
        .args(["list", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let list: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 17);
    assert!(list.iter().all(|t| t["builtin"] == true));
}

#[test]
fn template_override_directory_replaces_builtin() {
    let temp = TempDir::new().unwrap();
    let slot = temp.path().join("overrides/router");
    fs::create_dir_all(&slot).unwrap();
    fs::write(
        slot.join("template.toml"),
        "[template]\nid = \"router-root-only\"\nversion = \"2.0.0\"\nfile = \"init.tmpl\"\n",
    )
    .unwrap();
    fs::write(
        slot.join("init.tmpl"),
        "# {{PROJECT_NAME_TITLE}}\nfrom .endpoints import router\n",
    )
    .unwrap();

    faststart(temp.path())
        .env("FASTSTART_TEMPLATES_DIR", temp.path().join("overrides"))
        .args(["new", "orders", "-y"])
        .assert()
        .success();

    let router = fs::read_to_string(temp.path().join("orders/app/api/v1/__init__.py")).unwrap();
    assert_eq!(router, "# Orders\nfrom .endpoints import router\n");
}

#[test]
fn matrix_reports_unsupported_rows() {
    let temp = TempDir::new().unwrap();
    faststart(temp.path())
        .args(["matrix", "--auth", "jwt", "--db", "none"])
        .assert()
        .success()
        .stdout(predicate::str::contains("error:"))
        .stdout(predicate::str::contains("6 combinations, 6 unsupported"));
}

#[test]
fn matrix_json_has_every_combination() {
    let temp = TempDir::new().unwrap();
    let out = faststart(temp.path())
        .args(["matrix", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 144);
}

#[test]
fn config_get_prints_effective_value() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("faststart-test.toml"),
        "[defaults]\ndatabase = \"redis\"\n",
    )
    .unwrap();

    faststart(temp.path())
        .args(["config", "get", "defaults.database"])
        .assert()
        .success()
        .stdout("redis\n");
}

#[test]
fn config_env_overrides_file() {
    let temp = TempDir::new().unwrap();
    faststart(temp.path())
        .env("FASTSTART__DEFAULTS__AUTH", "oauth2")
        .args(["config", "get", "defaults.auth"])
        .assert()
        .success()
        .stdout("oauth2\n");
}

#[test]
fn init_local_writes_loadable_config() {
    let temp = TempDir::new().unwrap();
    faststart(temp.path())
        .args(["init", "--local"])
        .assert()
        .success();

    let text = fs::read_to_string(temp.path().join(".faststart.toml")).unwrap();
    assert!(text.contains("[defaults]"));

    Command::cargo_bin("faststart")
        .unwrap()
        .current_dir(temp.path())
        .args(["--config", ".faststart.toml", "config", "get", "defaults.is_async"])
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn shell_completions() {
    let temp = TempDir::new().unwrap();
    faststart(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("faststart"));
}
