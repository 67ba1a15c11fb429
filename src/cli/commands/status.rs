//! Status command implementation.
//!
//! The `venvup status` command shows what `run` would work with. It never
//! modifies the project.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::StatusArgs;
use crate::environment::EnvironmentLayout;
use crate::error::{Result, VenvupError};
use crate::interpreter::{locate, probe};
use crate::shell::{system_path, ProcessRunner, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectContext};

/// Snapshot of the project's environment.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub root: PathBuf,
    pub root_source: String,
    pub env_dir: PathBuf,
    pub env_exists: bool,
    pub env_interpreter: PathBuf,
    pub manifest: PathBuf,
    pub manifest_exists: bool,
    /// Base interpreter used when the environment has to be created.
    pub interpreter: Option<PathBuf>,
    pub interpreter_version: Option<String>,
}

/// The status command implementation.
pub struct StatusCommand<'a> {
    context: &'a ProjectContext,
    args: StatusArgs,
}

impl<'a> StatusCommand<'a> {
    /// Create a new status command.
    pub fn new(context: &'a ProjectContext, args: StatusArgs) -> Self {
        Self { context, args }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        self.context.root.path()
    }

    /// Inspect the project.
    pub fn collect(&self, runner: &mut dyn ProcessRunner) -> StatusReport {
        let config = &self.context.config;
        let root = self.project_root();
        let layout = EnvironmentLayout::new(root, &config.env_dir());
        let manifest = root.join(config.manifest());

        let interpreter = match locate(config.python.as_deref(), system_path().as_deref()) {
            Ok(path) => Some(probe(&path, runner)),
            Err(e) => {
                tracing::debug!("{}", e);
                None
            }
        };

        StatusReport {
            root: root.to_path_buf(),
            root_source: self.context.root.source().to_string(),
            env_dir: layout.dir().to_path_buf(),
            env_exists: layout.exists(),
            env_interpreter: layout.interpreter(),
            manifest_exists: manifest.is_file(),
            manifest,
            interpreter_version: interpreter
                .as_ref()
                .and_then(|i| i.version.as_ref().map(ToString::to_string)),
            interpreter: interpreter.map(|i| i.path),
        }
    }

    /// Collect and display the status.
    ///
    /// JSON goes to `out` whatever the output mode; the text form goes
    /// through `ui`.
    pub fn execute_with(
        &self,
        runner: &mut dyn ProcessRunner,
        ui: &mut dyn UserInterface,
        out: &mut dyn Write,
    ) -> Result<CommandResult> {
        let report = self.collect(runner);

        if self.args.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| VenvupError::Other(e.into()))?;
            writeln!(out, "{}", json)?;
            out.flush()?;
            return Ok(CommandResult::success());
        }

        ui.show_header("venvup status");
        ui.message(&format!(
            "Project:      {} ({})",
            report.root.display(),
            report.root_source
        ));
        ui.message(&format!(
            "Environment:  {} ({})",
            report.env_dir.display(),
            if report.env_exists { "present" } else { "missing" }
        ));
        ui.message(&format!(
            "Manifest:     {} ({})",
            report.manifest.display(),
            if report.manifest_exists {
                "present"
            } else {
                "missing"
            }
        ));
        match (&report.interpreter, &report.interpreter_version) {
            (Some(path), Some(version)) => {
                ui.message(&format!("Interpreter:  Python {} ({})", version, path.display()))
            }
            (Some(path), None) => ui.message(&format!("Interpreter:  {}", path.display())),
            (None, _) => ui.warning("Interpreter:  no Python interpreter found"),
        }

        if !report.env_exists {
            ui.message("");
            ui.message("Run `venvup` to create the environment");
        }

        Ok(CommandResult::success())
    }
}

impl Command for StatusCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut runner = SystemRunner::new();
        self.execute_with(&mut runner, ui, &mut std::io::stdout())
    }
}
