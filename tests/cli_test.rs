//! Integration tests driving the venvup binary against temp projects.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn venvup(project: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("venvup"));
    cmd.env_remove("VENVUP_PROJECT");
    cmd.env_remove("RUST_LOG");
    cmd.arg("--project").arg(project);
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("venvup"));
    cmd.arg("--help");
    cmd.assert().success().stdout(predicate::str::contains(
        "Bootstrap a project's Python virtual environment",
    ));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("venvup"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_rejects_unknown_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("venvup"));
    cmd.arg("frobnicate");
    cmd.assert().failure();
    Ok(())
}

#[test]
fn cli_generates_completions() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("venvup"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("venvup"));
    Ok(())
}

#[test]
fn dry_run_creates_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("requirements.txt"), "requests\n")?;
    venvup(temp.path())
        .args(["run", "--dry-run", "--non-interactive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would run:"))
        .stdout(predicate::str::contains("install -r requirements.txt"));
    assert!(!temp.path().join("venv").exists());
    Ok(())
}

#[test]
fn invalid_config_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("venvup.yml"), "env_dir: ../elsewhere\n")?;
    venvup(temp.path())
        .args(["run", "--non-interactive"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid configuration"));
    Ok(())
}

#[test]
fn unknown_config_key_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("venvup.yml"), "envdir: venv\n")?;
    venvup(temp.path())
        .args(["run", "--non-interactive"])
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn missing_explicit_config_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    venvup(temp.path())
        .args(["--config", "nope.yml", "status"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn missing_project_dir_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    venvup(&temp.path().join("does-not-exist"))
        .arg("status")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Cannot resolve project root"));
    Ok(())
}

#[test]
fn status_json_reports_fresh_project() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let output = venvup(temp.path()).args(["status", "--json"]).output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["env_exists"], serde_json::Value::Bool(false));
    assert_eq!(value["manifest_exists"], serde_json::Value::Bool(false));
    assert_eq!(value["root_source"], "explicit");
    Ok(())
}

#[test]
fn status_json_prints_under_silent_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("venvup.yml"), "output: silent\n")?;

    let output = venvup(temp.path()).args(["status", "--json"]).output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["env_exists"], serde_json::Value::Bool(false));
    Ok(())
}

/// A stand-in interpreter. It logs every call, creates a minimal
/// environment for `-m venv DIR` (copying itself in as the environment's
/// interpreter) and fails pip calls matching `$FAKE_FAIL`.
#[cfg(unix)]
const FAKE_PYTHON: &str = r#"#!/bin/sh
echo "$*" >> "$FAKE_PYTHON_LOG"
case "$1" in
  --version)
    echo "Python 3.12.1"
    exit 0
    ;;
  -m)
    if [ "$2" = "venv" ]; then
      mkdir -p "$3/bin"
      printf 'home = /fake\n' > "$3/pyvenv.cfg"
      cp "$0" "$3/bin/python"
      chmod +x "$3/bin/python"
      exit 0
    fi
    echo "env VIRTUAL_ENV=$VIRTUAL_ENV" >> "$FAKE_PYTHON_LOG"
    echo "env PATH=$PATH" >> "$FAKE_PYTHON_LOG"
    if [ -n "$FAKE_FAIL" ]; then
      case "$*" in
        *"$FAKE_FAIL"*)
          echo "simulated failure" >&2
          exit 1
          ;;
      esac
    fi
    exit 0
    ;;
esac
exit 0
"#;

#[cfg(unix)]
struct FakeProject {
    project: TempDir,
    tools: TempDir,
}

#[cfg(unix)]
impl FakeProject {
    fn new() -> Self {
        use std::os::unix::fs::PermissionsExt;

        let project = TempDir::new().unwrap();
        let tools = TempDir::new().unwrap();
        let python = tools.path().join("python3");
        fs::write(&python, FAKE_PYTHON).unwrap();
        fs::set_permissions(&python, fs::Permissions::from_mode(0o755)).unwrap();
        Self { project, tools }
    }

    fn root(&self) -> PathBuf {
        self.project.path().canonicalize().unwrap()
    }

    fn python(&self) -> PathBuf {
        self.tools.path().join("python3")
    }

    fn log_path(&self) -> PathBuf {
        self.tools.path().join("calls.log")
    }

    fn log(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn calls_matching(&self, pattern: &str) -> usize {
        self.log()
            .iter()
            .filter(|line| !line.starts_with("env ") && line.contains(pattern))
            .count()
    }

    fn write_manifest(&self) {
        fs::write(self.project.path().join("requirements.txt"), "requests\n").unwrap();
    }

    /// Create the environment up front, as a previous run would have.
    fn create_env(&self) {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.project.path().join("venv").join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(self.project.path().join("venv").join("pyvenv.cfg"), "home = /fake\n").unwrap();
        fs::write(bin.join("python"), FAKE_PYTHON).unwrap();
        fs::set_permissions(bin.join("python"), fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn run(&self, extra: &[&str]) -> Command {
        let mut cmd = venvup(self.project.path());
        cmd.env("FAKE_PYTHON_LOG", self.log_path());
        cmd.env_remove("FAKE_FAIL");
        cmd.arg("run")
            .arg("--python")
            .arg(self.python())
            .args(["--no-pause", "--non-interactive"])
            .args(extra);
        cmd
    }
}

#[cfg(unix)]
#[test]
fn fresh_checkout_creates_env_and_skips_install() {
    let fake = FakeProject::new();

    fake.run(&[])
        .assert()
        .success()
        .stdout(predicate::str::contains("Creating virtual environment in venv..."))
        .stdout(predicate::str::contains(
            "No requirements.txt found, skipping dependency installation",
        ))
        .stdout(predicate::str::contains("Setup complete!"));

    assert!(fake.root().join("venv").join("pyvenv.cfg").is_file());
    assert_eq!(fake.calls_matching("-m venv venv"), 1);
    assert_eq!(fake.calls_matching("-m pip install --upgrade pip"), 1);
    assert_eq!(fake.calls_matching("install -r"), 0);
}

#[cfg(unix)]
#[test]
fn existing_env_is_reused() {
    let fake = FakeProject::new();
    fake.create_env();

    fake.run(&[])
        .assert()
        .success()
        .stdout(predicate::str::contains("Virtual environment already exists"));

    assert_eq!(fake.calls_matching("-m venv"), 0);
    assert_eq!(fake.calls_matching("--upgrade pip"), 1);
}

#[cfg(unix)]
#[test]
fn manifest_installed_once() {
    let fake = FakeProject::new();
    fake.write_manifest();

    fake.run(&[])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Installing dependencies from requirements.txt...",
        ));

    assert_eq!(fake.calls_matching("-m pip install -r requirements.txt"), 1);
}

#[cfg(unix)]
#[test]
fn repeated_runs_are_idempotent() {
    let fake = FakeProject::new();
    fake.write_manifest();

    fake.run(&[]).assert().success();
    let marker = fs::read_to_string(fake.root().join("venv").join("pyvenv.cfg")).unwrap();
    fake.run(&[]).assert().success();

    assert_eq!(fake.calls_matching("-m venv"), 1);
    assert_eq!(fake.calls_matching("install -r requirements.txt"), 2);
    assert_eq!(
        fs::read_to_string(fake.root().join("venv").join("pyvenv.cfg")).unwrap(),
        marker
    );
}

#[cfg(unix)]
#[test]
fn pip_sees_activated_environment() {
    let fake = FakeProject::new();
    fake.create_env();

    fake.run(&[]).assert().success();

    let env_dir = fake.root().join("venv");
    let log = fake.log();
    assert!(log.contains(&format!("env VIRTUAL_ENV={}", env_dir.display())));
    let path_prefix = format!("env PATH={}", env_dir.join("bin").display());
    assert!(log.iter().any(|line| line.starts_with(&path_prefix)));
}

#[cfg(unix)]
#[test]
fn failure_halts_by_default() {
    let fake = FakeProject::new();
    fake.create_env();
    fake.write_manifest();

    fake.run(&[])
        .env("FAKE_FAIL", "--upgrade")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Setup failed"));

    assert_eq!(fake.calls_matching("install -r"), 0);
}

#[cfg(unix)]
#[test]
fn keep_going_attempts_later_steps() {
    let fake = FakeProject::new();
    fake.create_env();
    fake.write_manifest();

    fake.run(&["--keep-going"])
        .env("FAKE_FAIL", "--upgrade")
        .assert()
        .code(1);

    assert_eq!(fake.calls_matching("install -r requirements.txt"), 1);
}

#[cfg(unix)]
#[test]
fn quiet_mode_shows_captured_output_on_failure() {
    let fake = FakeProject::new();
    fake.create_env();

    fake.run(&["--quiet"])
        .env("FAKE_FAIL", "--upgrade")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("simulated failure"));
}

#[cfg(unix)]
#[test]
fn config_file_selects_env_dir() {
    let fake = FakeProject::new();
    fs::write(fake.project.path().join("venvup.yml"), "env_dir: .venv\n").unwrap();

    fake.run(&[]).assert().success();

    assert!(fake.root().join(".venv").join("pyvenv.cfg").is_file());
    assert!(!fake.root().join("venv").exists());
}

#[cfg(unix)]
#[test]
fn root_comes_from_program_location() {
    let fake = FakeProject::new();
    fake.create_env();

    // Install a copy of the binary at <project>/tools/venvup.
    let tools = fake.project.path().join("tools");
    fs::create_dir_all(&tools).unwrap();
    let installed = tools.join("venvup");
    fs::copy(cargo_bin("venvup"), &installed).unwrap();

    let elsewhere = TempDir::new().unwrap();
    let output = Command::new(&installed)
        .env_remove("VENVUP_PROJECT")
        .current_dir(elsewhere.path())
        .args(["status", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["root"], fake.root().display().to_string());
    assert_eq!(value["root_source"], "program location");
    assert_eq!(value["env_exists"], serde_json::Value::Bool(true));
}

#[cfg(unix)]
#[test]
fn relative_python_resolves_from_caller_directory() {
    let fake = FakeProject::new();

    venvup(fake.project.path())
        .current_dir(fake.tools.path())
        .env("FAKE_PYTHON_LOG", fake.log_path())
        .env_remove("FAKE_FAIL")
        .args(["run", "--python", "./python3", "--no-pause", "--non-interactive"])
        .assert()
        .success()
        .stderr(predicate::str::contains("exit code").not());

    assert!(fake.root().join("venv").join("pyvenv.cfg").is_file());
    assert_eq!(fake.calls_matching("-m venv venv"), 1);
}

#[cfg(unix)]
#[test]
fn bare_invocation_accepts_pause_flags() {
    let fake = FakeProject::new();
    fake.create_env();

    venvup(fake.project.path())
        .env("FAKE_PYTHON_LOG", fake.log_path())
        .env_remove("FAKE_FAIL")
        .args(["--no-pause", "--non-interactive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Setup complete!"));

    assert_eq!(fake.calls_matching("-m pip install --upgrade pip"), 1);
}

#[cfg(unix)]
#[test]
fn normal_run_keeps_log_lines_off_stderr() {
    let fake = FakeProject::new();

    fake.run(&[])
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO").not());
}

#[cfg(unix)]
#[test]
fn missing_interpreter_reports_spawn_cause() {
    use std::os::unix::fs::PermissionsExt;

    let fake = FakeProject::new();
    fake.create_env();
    // An environment whose interpreter cannot be executed.
    let python = fake.project.path().join("venv").join("bin").join("python");
    fs::write(&python, "#!/nonexistent/interpreter\n").unwrap();
    fs::set_permissions(&python, fs::Permissions::from_mode(0o755)).unwrap();

    fake.run(&[])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to start"))
        .stderr(predicate::str::contains("exit code None").not());
}
