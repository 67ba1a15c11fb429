//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`ProjectContext`] for the root and configuration commands share
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::config::{load_config, validate, VenvupConfig};
use crate::error::{Result, VenvupError};
use crate::project::{resolve_root, ProjectRoot};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Project root plus the configuration loaded from it.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub root: ProjectRoot,
    pub config: VenvupConfig,
}

impl ProjectContext {
    /// Resolve the root and load, merge and validate its configuration.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = resolve_root(cli.project.as_deref())?;
        tracing::debug!(
            "Project root {} ({})",
            root.path().display(),
            root.source()
        );

        let config = load_config(root.path(), cli.config.as_deref())?;
        validate(&config)?;

        Ok(Self { root, config })
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: Option<ProjectContext>,
}

impl CommandDispatcher {
    /// Create a dispatcher for commands that work on a project.
    pub fn new(context: ProjectContext) -> Self {
        Self {
            context: Some(context),
        }
    }

    /// Create a dispatcher for commands that need no project.
    pub fn detached() -> Self {
        Self { context: None }
    }

    /// Whether `cli` selects a command that works on a project.
    pub fn needs_project(cli: &Cli) -> bool {
        !matches!(cli.command, Some(Commands::Completions(_)))
    }

    /// The loaded project, if any.
    pub fn context(&self) -> Option<&ProjectContext> {
        self.context.as_ref()
    }

    fn require_context(&self) -> Result<&ProjectContext> {
        self.context
            .as_ref()
            .ok_or_else(|| VenvupError::RootResolution {
                path: PathBuf::new(),
                message: "no project was loaded".to_string(),
            })
    }

    /// Arguments for the run command selected by `cli`, with the global
    /// flags folded in. Bare `venvup` runs with the defaults.
    pub fn run_args(cli: &Cli) -> RunArgs {
        let mut args = match &cli.command {
            Some(Commands::Run(args)) => args.clone(),
            _ => RunArgs::default(),
        };
        args.no_pause |= cli.no_pause;
        args
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Run(_)) | None => {
                let cmd =
                    super::run::RunCommand::new(self.require_context()?, Self::run_args(cli));
                cmd.execute(ui)
            }
            Some(Commands::Status(args)) => {
                let cmd =
                    super::status::StatusCommand::new(self.require_context()?, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}
