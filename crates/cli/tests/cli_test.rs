use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A project with one compiled class and a config pointing at `java`
fn project(java: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let classes = dir.path().join("target/classes/org/acme");
    fs::create_dir_all(&classes).unwrap();
    fs::write(classes.join("Customer.class"), b"").unwrap();
    fs::write(
        dir.path().join(".nucleus-runner.json"),
        format!(r#"{{ "java_executable": "{java}" }}"#),
    )
    .unwrap();
    dir
}

#[test]
fn test_init_writes_default_config() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("nucleus-runner")
        .args(["init", "--cwd"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config"));

    let contents = fs::read_to_string(dir.path().join(".nucleus-runner.json")).unwrap();
    assert!(contents.contains(r#""metadata_directory": "target/classes""#));

    cargo_bin_cmd!("nucleus-runner")
        .args(["init", "--cwd"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Config already exists"));
}

#[test]
fn test_show_config_applies_flags() {
    let dir = project("/opt/jdk/bin/java");

    cargo_bin_cmd!("nucleus-runner")
        .current_dir(dir.path())
        .args(["show-config", "--metadata-dir", "build/classes"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            r#""metadata_directory": "{}""#,
            dir.path().canonicalize().unwrap().join("build/classes").display()
        )))
        .stdout(predicate::str::contains(r#""java_executable": "/opt/jdk/bin/java""#));
}

#[test]
fn test_metadata_dir_flag_is_relative_to_working_directory() {
    let dir = project("/opt/jdk/bin/java");
    let module = dir.path().join("module");
    fs::create_dir_all(module.join("classes/org/acme")).unwrap();
    fs::write(module.join("classes/org/acme/Invoice.class"), b"").unwrap();

    cargo_bin_cmd!("nucleus-runner")
        .current_dir(&module)
        .args(["enhance", "--dry-run", "--metadata-dir", "classes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invoice.class"))
        .stdout(predicate::str::contains("Customer.class").not());
}

#[test]
fn test_missing_metadata_directory_is_skipped() {
    let dir = project("/no/such/java");

    cargo_bin_cmd!("nucleus-runner")
        .current_dir(dir.path())
        .args(["enhance", "--metadata-dir", "does/not/exist"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped enhance"));
}

#[test]
fn test_dry_run_prints_command() {
    let dir = project("/opt/jdk/bin/java");

    cargo_bin_cmd!("nucleus-runner")
        .current_dir(dir.path())
        .args(["enhance", "--dry-run", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/opt/jdk/bin/java -cp "))
        .stdout(predicate::str::contains(
            "org.datanucleus.enhancer.DataNucleusEnhancer -v -api JDO",
        ))
        .stdout(predicate::str::contains("Customer.class"))
        .stdout(predicate::str::contains("Command breakdown"));
}

#[test]
fn test_dry_run_system_property_reaches_schema_tool() {
    let dir = project("/opt/jdk/bin/java");
    fs::write(
        dir.path().join(".nucleus-runner.json"),
        r#"{
  "java_executable": "/opt/jdk/bin/java",
  "schema": { "tool_properties": { "datanucleus.ConnectionURL": "jdbc:h2:mem:config" } }
}"#,
    )
    .unwrap();

    cargo_bin_cmd!("nucleus-runner")
        .current_dir(dir.path())
        .args([
            "schema-info",
            "--dry-run",
            "-D",
            "datanucleus.ConnectionURL=jdbc:h2:mem:cli",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "-Ddatanucleus.ConnectionURL=jdbc:h2:mem:cli",
        ))
        .stdout(predicate::str::contains("-schemainfo"))
        .stdout(predicate::str::contains("jdbc:h2:mem:config").not());
}

#[test]
fn test_malformed_property_fails() {
    cargo_bin_cmd!("nucleus-runner")
        .args(["enhance", "-D", "novalue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn test_delete_schema_requires_schema_name() {
    let dir = project("/opt/jdk/bin/java");

    cargo_bin_cmd!("nucleus-runner")
        .current_dir(dir.path())
        .args(["schema-delete-schema", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("schema_name"));
}

#[cfg(unix)]
fn fake_java(dir: &Path, code: i32) -> String {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-java");
    fs::write(
        &script,
        format!("#!/bin/sh\necho 'enhancement failed' >&2\nexit {code}\n"),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script.display().to_string()
}

#[cfg(unix)]
#[test]
fn test_tool_exit_code_is_propagated() {
    let dir = TempDir::new().unwrap();
    let java = fake_java(dir.path(), 3);
    let project = project(&java);

    cargo_bin_cmd!("nucleus-runner")
        .current_dir(project.path())
        .arg("enhance")
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "org.datanucleus.enhancer.DataNucleusEnhancer exited with a non-zero exit code (3)",
        ))
        .stderr(predicate::str::contains("enhancement failed"));
}

#[cfg(unix)]
#[test]
fn test_bare_config_file_name_runs_tool() {
    let dir = TempDir::new().unwrap();
    let java = fake_java(dir.path(), 0);
    let project = project(&java);
    fs::rename(
        project.path().join(".nucleus-runner.json"),
        project.path().join("custom.json"),
    )
    .unwrap();

    cargo_bin_cmd!("nucleus-runner")
        .current_dir(project.path())
        .args(["--config", "custom.json", "enhance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("enhance completed"));
}

#[cfg(unix)]
#[test]
fn test_successful_run_reports_completion() {
    let dir = TempDir::new().unwrap();
    let java = fake_java(dir.path(), 0);
    let project = project(&java);

    cargo_bin_cmd!("nucleus-runner")
        .current_dir(project.path())
        .arg("enhance-check")
        .assert()
        .success()
        .stdout(predicate::str::contains("enhance-check completed"));
}
