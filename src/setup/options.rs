//! Resolved options for one setup run.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::VenvupConfig;
use crate::shell::system_path;

/// What to do after a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first failure; later steps are reported as not run.
    #[default]
    Halt,
    /// Record the failure and attempt the remaining steps.
    KeepGoing,
}

impl ErrorPolicy {
    pub fn from_keep_going(keep_going: bool) -> Self {
        if keep_going {
            ErrorPolicy::KeepGoing
        } else {
            ErrorPolicy::Halt
        }
    }
}

/// Options for [`SetupRunner`](super::SetupRunner).
///
/// Paths are relative to the project root.
#[derive(Debug, Clone)]
pub struct SetupOptions {
    pub env_dir: PathBuf,
    pub manifest: PathBuf,
    /// Base interpreter name or path; `None` searches the default candidates.
    pub python: Option<String>,
    pub error_policy: ErrorPolicy,
    /// Wait for a keypress at the end (interactive sessions only).
    pub pause: bool,
    pub dry_run: bool,
    /// Extra arguments appended to every pip invocation.
    pub installer_args: Vec<String>,
    /// `PATH` used to locate the interpreter and as the base of the activated `PATH`.
    pub search_path: Option<OsString>,
}

impl SetupOptions {
    /// Build options from a merged configuration.
    pub fn from_config(config: &VenvupConfig) -> Self {
        Self {
            env_dir: config.env_dir(),
            manifest: config.manifest(),
            python: config.python.clone(),
            error_policy: ErrorPolicy::from_keep_going(config.keep_going.unwrap_or(false)),
            pause: config.pause.unwrap_or(true),
            dry_run: false,
            installer_args: config.installer_args.clone(),
            search_path: system_path(),
        }
    }
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self::from_config(&VenvupConfig::default())
    }
}
