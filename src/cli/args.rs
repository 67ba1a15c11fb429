//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::VenvupConfig;

/// venvup - Bootstrap a project's Python virtual environment.
#[derive(Debug, Parser)]
#[command(name = "venvup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default venvup.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides the program's location)
    #[arg(short, long, global = true, env = "VENVUP_PROJECT")]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Exit without waiting for a keypress
    #[arg(long, global = true)]
    pub no_pause: bool,

    /// Never prompt or wait for input
    #[arg(long, global = true)]
    pub non_interactive: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create and populate the virtual environment (default if no command specified)
    Run(RunArgs),

    /// Show the project's environment status
    Status(StatusArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Environment directory, relative to the project root
    #[arg(long, value_name = "DIR")]
    pub env_dir: Option<PathBuf>,

    /// Dependency manifest, relative to the project root
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Base interpreter used to create the environment
    #[arg(long, value_name = "PYTHON")]
    pub python: Option<String>,

    /// Attempt every step even after one fails
    #[arg(long)]
    pub keep_going: bool,

    /// Preview commands without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Copied from the global `--no-pause`.
    #[arg(skip)]
    pub no_pause: bool,
}

impl RunArgs {
    /// The flags that override configuration, as a config layer.
    ///
    /// Unset flags are `None` so they leave the file's values alone.
    pub fn as_config(&self) -> VenvupConfig {
        VenvupConfig {
            env_dir: self.env_dir.clone(),
            manifest: self.manifest.clone(),
            python: self.python.clone(),
            keep_going: self.keep_going.then_some(true),
            pause: self.no_pause.then_some(false),
            ..Default::default()
        }
    }
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
