//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands that work on a project
//! share one [`ProjectContext`], so the root is resolved and the config
//! loaded exactly once per invocation.

pub mod completions;
pub mod dispatcher;
pub mod run;
pub mod status;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, ProjectContext};
