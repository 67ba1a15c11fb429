//! Project root resolution.
//!
//! venvup is meant to be installed inside a subdirectory of the project it
//! sets up (for example `tools/venvup`), so the root is found from the
//! program's own location rather than from the caller's working directory.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Result, VenvupError};

/// Where the project root came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    /// `--project` or `VENVUP_PROJECT`.
    Explicit,
    /// The parent of the directory containing the running program.
    ProgramLocation,
}

impl fmt::Display for RootSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootSource::Explicit => write!(f, "explicit"),
            RootSource::ProgramLocation => write!(f, "program location"),
        }
    }
}

/// The resolved project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    path: PathBuf,
    source: RootSource,
}

impl ProjectRoot {
    /// Absolute path of the root.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// How the root was determined.
    pub fn source(&self) -> RootSource {
        self.source
    }
}

/// Resolve the project root.
///
/// An explicit root wins and must be an existing directory. Otherwise the
/// root is derived from [`std::env::current_exe`].
pub fn resolve_root(explicit: Option<&Path>) -> Result<ProjectRoot> {
    if let Some(path) = explicit {
        return from_explicit(path);
    }

    let program = std::env::current_exe().map_err(|e| VenvupError::RootResolution {
        path: PathBuf::from("<current executable>"),
        message: e.to_string(),
    })?;

    let path = root_from_program(&program)?;
    tracing::debug!(
        "Resolved project root {} from {}",
        path.display(),
        program.display()
    );
    Ok(ProjectRoot {
        path,
        source: RootSource::ProgramLocation,
    })
}

fn from_explicit(path: &Path) -> Result<ProjectRoot> {
    let resolved = path
        .canonicalize()
        .map_err(|e| VenvupError::RootResolution {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if !resolved.is_dir() {
        return Err(VenvupError::RootResolution {
            path: path.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    Ok(ProjectRoot {
        path: resolved,
        source: RootSource::Explicit,
    })
}

/// Root for a program at `program`: the parent of the program's directory.
///
/// Symlinks are followed first, so a linked binary resolves to the project
/// that holds the real file.
pub fn root_from_program(program: &Path) -> Result<PathBuf> {
    let program = program
        .canonicalize()
        .unwrap_or_else(|_| program.to_path_buf());

    program
        .parent()
        .and_then(Path::parent)
        .filter(|root| !root.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .ok_or_else(|| VenvupError::RootResolution {
            path: program.clone(),
            message: "program is not inside a project subdirectory".to_string(),
        })
}
