use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).expect("Failed to create parent directory");
    fs::write(path, content).expect("Failed to write test file");
}

fn definition(name: &str) -> String {
    format!(
        r#"{{ "Datasource": {{ "Name": "{}", "LogicalQueryFormat": "bool_" }}, "StandardTests": {{}} }}"#,
        name
    )
}

/// Config root with two datasources and a linux registry
fn config_root() -> tempfile::TempDir {
    let dir = tempdir().expect("Failed to create temp directory");
    write(dir.path(), "config/mysql.json", &definition("mysql"));
    write(dir.path(), "config/postgres.json", &definition("postgres"));
    write(
        dir.path(),
        "config/registry/linux.json",
        r#"{ "DatasourceRegistry": { "standard": "*", "nightly": "standard,extra", "loop": "loop" } }"#,
    );
    dir
}

#[test]
fn test_resolve_prints_datasources() -> Result<(), Box<dyn std::error::Error>> {
    let root = config_root();
    let mut cmd = Command::cargo_bin("dsuite")?;
    cmd.arg("--config-root")
        .arg(root.path())
        .args(["resolve", "nightly", "--platform", "linux"]);

    cmd.assert()
        .success()
        .stdout(predicate::eq("mysql\npostgres\nextra\n"));
    Ok(())
}

#[test]
fn test_resolve_check_fails_on_unknown() -> Result<(), Box<dyn std::error::Error>> {
    let root = config_root();
    let mut cmd = Command::cargo_bin("dsuite")?;
    cmd.arg("--config-root")
        .arg(root.path())
        .args(["resolve", "nightly", "--platform", "linux", "--check"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown datasources: extra"));
    Ok(())
}

#[test]
fn test_resolve_cycle_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let root = config_root();
    let mut cmd = Command::cargo_bin("dsuite")?;
    cmd.arg("--config-root")
        .arg(root.path())
        .args(["resolve", "loop", "--platform", "linux"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("references itself"));
    Ok(())
}

#[test]
fn test_local_root_overrides_registry() -> Result<(), Box<dyn std::error::Error>> {
    let root = config_root();
    let local = tempdir()?;
    write(
        local.path(),
        "config/registry/linux.json",
        r#"{ "DatasourceRegistry": { "nightly": "postgres" } }"#,
    );

    let mut cmd = Command::cargo_bin("dsuite")?;
    cmd.arg("--config-root")
        .arg(root.path())
        .arg("--local-root")
        .arg(local.path())
        .args(["resolve", "nightly", "--platform", "linux"]);

    cmd.assert().success().stdout(predicate::eq("postgres\n"));
    Ok(())
}

#[test]
fn test_list_shows_datasources_and_suites() -> Result<(), Box<dyn std::error::Error>> {
    let root = config_root();
    let mut cmd = Command::cargo_bin("dsuite")?;
    cmd.arg("--config-root")
        .arg(root.path())
        .args(["list", "--platform", "linux"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("TestConfig(mysql"))
        .stdout(predicate::str::contains("logical.calcs.postgres"))
        .stdout(predicate::str::contains("standard = * (mysql,postgres)"))
        .stdout(predicate::str::contains("nightly = standard,extra\n"));
    Ok(())
}

#[test]
fn test_manifest_to_stdout() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("dsuite")?;
    cmd.args([
        "manifest",
        "--attr",
        "Created-By=dsuite",
        "--section",
        "b/:Key=2",
        "--section",
        "a/:Key=1",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("Manifest-Version: 1.0"))
        .stdout(predicate::str::contains("Created-By: dsuite"))
        .stdout(predicate::str::is_match(r"(?s)Name: a/.*Name: b/")?);
    Ok(())
}

#[test]
fn test_manifest_to_file() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = tempdir()?;
    let out_path = out_dir.path().join("META-INF").join("MANIFEST.MF");

    let mut cmd = Command::cargo_bin("dsuite")?;
    cmd.args(["manifest", "--manifest-version", "2.0", "--output"])
        .arg(&out_path);
    cmd.assert().success();

    let written = fs::read_to_string(&out_path)?;
    assert!(written.starts_with("Manifest-Version: 2.0"));
    Ok(())
}

#[test]
fn test_manifest_rejects_bad_key() -> Result<(), Box<dyn std::error::Error>> {
    let long_key = "k".repeat(69);
    let mut cmd = Command::cargo_bin("dsuite")?;
    cmd.args(["manifest", "--attr", &format!("{}=v", long_key)]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("bad key length"));
    Ok(())
}
