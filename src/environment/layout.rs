//! On-disk layout of a virtual environment.

use std::path::{Path, PathBuf};

/// File written by `venv` at the environment root. Its presence means the
/// environment exists and must be reused.
pub const MARKER_FILE: &str = "pyvenv.cfg";

/// Name of the directory holding the environment's executables.
pub fn scripts_dir_name() -> &'static str {
    if cfg!(windows) {
        "Scripts"
    } else {
        "bin"
    }
}

/// File name of the environment's interpreter.
pub fn interpreter_file_name() -> &'static str {
    if cfg!(windows) {
        "python.exe"
    } else {
        "python"
    }
}

/// Paths that make up a virtual environment under a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentLayout {
    dir: PathBuf,
}

impl EnvironmentLayout {
    /// Layout for `env_dir` (relative to `project_root`).
    pub fn new(project_root: &Path, env_dir: &Path) -> Self {
        Self {
            dir: project_root.join(env_dir),
        }
    }

    /// The environment directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the marker file.
    pub fn marker(&self) -> PathBuf {
        self.dir.join(MARKER_FILE)
    }

    /// Directory holding the environment's executables.
    pub fn scripts_dir(&self) -> PathBuf {
        self.dir.join(scripts_dir_name())
    }

    /// The environment's own interpreter.
    pub fn interpreter(&self) -> PathBuf {
        self.scripts_dir().join(interpreter_file_name())
    }

    /// Whether the environment has already been created.
    pub fn exists(&self) -> bool {
        self.marker().is_file()
    }
}
