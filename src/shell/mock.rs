//! Mock process runner for testing.
//!
//! `MockRunner` implements [`ProcessRunner`] without spawning anything. It
//! records every invocation, can be told to fail or print for invocations
//! matching a pattern, and by default simulates `python -m venv <dir>` by
//! writing the marker and interpreter files a real `venv` would create.
//!
//! # Example
//!
//! ```
//! use venvup::shell::{CommandOptions, Invocation, MockRunner, ProcessRunner};
//!
//! let mut runner = MockRunner::new();
//! runner.fail_when("pip install -r", 1);
//!
//! let inv = Invocation::new("python").args(["-m", "pip", "install", "-r", "requirements.txt"]);
//! let result = runner.run(&inv, &CommandOptions::default()).unwrap();
//!
//! assert!(!result.success);
//! assert_eq!(runner.count_matching("pip install"), 1);
//! ```

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::environment::{interpreter_file_name, scripts_dir_name, MARKER_FILE};
use crate::error::Result;

use super::command::{CommandOptions, CommandResult, Invocation};
use super::runner::ProcessRunner;

#[derive(Debug, Clone)]
struct Failure {
    pattern: String,
    code: i32,
    stderr: String,
}

/// Mock runner that records invocations instead of spawning them.
#[derive(Debug, Default)]
pub struct MockRunner {
    calls: Vec<(Invocation, CommandOptions)>,
    failures: Vec<Failure>,
    outputs: Vec<(String, String)>,
    simulate_venv: bool,
}

impl MockRunner {
    /// Create a mock that simulates environment creation.
    pub fn new() -> Self {
        Self {
            simulate_venv: true,
            ..Default::default()
        }
    }

    /// Disable the simulated `venv` side effect.
    ///
    /// The creation command then "succeeds" without writing anything, which
    /// is how a broken interpreter behaves.
    pub fn without_venv_effect(mut self) -> Self {
        self.simulate_venv = false;
        self
    }

    /// Make invocations whose display string contains `pattern` exit with `code`.
    pub fn fail_when(&mut self, pattern: &str, code: i32) {
        self.fail_with_output(pattern, code, "");
    }

    /// Like [`fail_when`](Self::fail_when), with captured stderr.
    pub fn fail_with_output(&mut self, pattern: &str, code: i32, stderr: &str) {
        self.failures.push(Failure {
            pattern: pattern.to_string(),
            code,
            stderr: stderr.to_string(),
        });
    }

    /// Return `stdout` for invocations whose display string contains `pattern`.
    pub fn respond_with(&mut self, pattern: &str, stdout: &str) {
        self.outputs
            .push((pattern.to_string(), stdout.to_string()));
    }

    /// All recorded invocations with the options they were given.
    pub fn calls(&self) -> &[(Invocation, CommandOptions)] {
        &self.calls
    }

    /// Display strings of all recorded invocations, in order.
    pub fn invocations(&self) -> Vec<String> {
        self.calls.iter().map(|(inv, _)| inv.to_string()).collect()
    }

    /// Number of recorded invocations containing `pattern`.
    pub fn count_matching(&self, pattern: &str) -> usize {
        self.calls
            .iter()
            .filter(|(inv, _)| inv.to_string().contains(pattern))
            .count()
    }

    fn simulate_venv_creation(&self, invocation: &Invocation, options: &CommandOptions) {
        let is_venv = invocation
            .args
            .windows(2)
            .any(|pair| pair[0] == "-m" && pair[1] == "venv");
        let Some(target) = invocation.args.last() else {
            return;
        };
        if !is_venv {
            return;
        }

        let mut dir = PathBuf::from(target);
        if dir.is_relative() {
            if let Some(cwd) = &options.cwd {
                dir = cwd.join(dir);
            }
        }

        let scripts = dir.join(scripts_dir_name());
        if fs::create_dir_all(&scripts).is_ok() {
            let _ = fs::write(dir.join(MARKER_FILE), "home = /mock\n");
            let _ = fs::write(scripts.join(interpreter_file_name()), "");
        }
    }
}

impl ProcessRunner for MockRunner {
    fn run(&mut self, invocation: &Invocation, options: &CommandOptions) -> Result<CommandResult> {
        self.calls.push((invocation.clone(), options.clone()));
        let display = invocation.to_string();

        if let Some(failure) = self.failures.iter().find(|f| display.contains(&f.pattern)) {
            return Ok(CommandResult::failure(
                Some(failure.code),
                String::new(),
                failure.stderr.clone(),
                Duration::ZERO,
            ));
        }

        if self.simulate_venv {
            self.simulate_venv_creation(invocation, options);
        }

        let stdout = self
            .outputs
            .iter()
            .find(|(pattern, _)| display.contains(pattern))
            .map(|(_, out)| out.clone())
            .unwrap_or_default();

        Ok(CommandResult::success(stdout, String::new(), Duration::ZERO))
    }
}
