//! Process-local environment activation.
//!
//! Sourcing `activate` in a shell rewrites that shell's variables. Here the
//! same effect is captured as a value: [`Activation`] holds the overrides and
//! is applied to each child's [`CommandOptions`]. The orchestrator's own
//! environment, and the caller's shell, are never touched.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Result, VenvupError};
use crate::shell::{parse_path, CommandOptions};

use super::layout::EnvironmentLayout;

/// Variables removed from children of an activated environment.
const CLEARED_VARS: &[&str] = &["PYTHONHOME"];

/// Search-path state for child processes of an activated environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    virtual_env: PathBuf,
    interpreter: PathBuf,
    path: OsString,
}

impl Activation {
    /// Activate an existing environment.
    ///
    /// Fails with [`VenvupError::ActivationFailed`] when the environment's
    /// interpreter is missing.
    pub fn activate(layout: &EnvironmentLayout, base_path: Option<OsString>) -> Result<Self> {
        let interpreter = layout.interpreter();
        if !interpreter.exists() {
            return Err(VenvupError::ActivationFailed { path: interpreter });
        }
        Self::unchecked(layout, base_path)
    }

    /// Build the activation without checking the environment on disk.
    ///
    /// Used for dry runs and when continuing past a failed step.
    pub fn unchecked(layout: &EnvironmentLayout, base_path: Option<OsString>) -> Result<Self> {
        let scripts = layout.scripts_dir();
        let rest = parse_path(base_path.as_deref())
            .into_iter()
            .filter(|dir| dir != &scripts);
        let path = std::env::join_paths(std::iter::once(scripts.clone()).chain(rest))
            .map_err(|e| VenvupError::Other(e.into()))?;

        Ok(Self {
            virtual_env: layout.dir().to_path_buf(),
            interpreter: layout.interpreter(),
            path,
        })
    }

    /// The environment directory (`VIRTUAL_ENV`).
    pub fn virtual_env(&self) -> &Path {
        &self.virtual_env
    }

    /// The environment's interpreter.
    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    /// The `PATH` children will see.
    pub fn path(&self) -> &OsString {
        &self.path
    }

    /// Add the activation overrides to `options`.
    pub fn apply(&self, options: &mut CommandOptions) {
        options.env.insert(
            "VIRTUAL_ENV".to_string(),
            self.virtual_env.clone().into_os_string(),
        );
        options.env.insert("PATH".to_string(), self.path.clone());
        for var in CLEARED_VARS {
            options.env.remove(*var);
            if !options.env_remove.iter().any(|v| v == var) {
                options.env_remove.push((*var).to_string());
            }
        }
    }
}
