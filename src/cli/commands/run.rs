//! Run command implementation.
//!
//! The `venvup run` command (also the default) creates and populates the
//! project's virtual environment.

use std::path::Path;

use crate::cli::args::RunArgs;
use crate::config::{overlay, validate, VenvupConfig};
use crate::error::Result;
use crate::setup::{SetupOptions, SetupRunner};
use crate::shell::{ProcessRunner, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectContext};

/// The run command implementation.
pub struct RunCommand<'a> {
    context: &'a ProjectContext,
    args: RunArgs,
}

impl<'a> RunCommand<'a> {
    /// Create a new run command.
    pub fn new(context: &'a ProjectContext, args: RunArgs) -> Self {
        Self { context, args }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        self.context.root.path()
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    /// Configuration with command-line flags applied on top.
    pub fn effective_config(&self) -> Result<VenvupConfig> {
        let config = overlay(self.context.config.clone(), self.args.as_config());
        validate(&config)?;
        Ok(config)
    }

    /// Build setup options from config and args.
    pub fn build_options(&self) -> Result<SetupOptions> {
        let config = self.effective_config()?;
        let mut options = SetupOptions::from_config(&config);
        options.dry_run = self.args.dry_run;
        Ok(options)
    }

    /// Run setup with `runner` spawning the child processes.
    pub fn execute_with(
        &self,
        runner: &mut dyn ProcessRunner,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let options = self.build_options()?;
        let root = self.project_root();

        let title = if options.dry_run {
            format!("venvup (dry run): {}", root.display())
        } else {
            format!("venvup: {}", root.display())
        };
        ui.show_header(&title);

        let report = SetupRunner::new(root, &options, runner).run(ui);

        match report.error() {
            Some(err) => {
                tracing::debug!("{}", err);
                Ok(CommandResult::failure(1))
            }
            None => Ok(CommandResult::success()),
        }
    }
}

impl Command for RunCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut runner = SystemRunner::new();
        self.execute_with(&mut runner, ui)
    }
}
