//! Base interpreter discovery.
//!
//! The interpreter used to *create* the environment comes from, in order:
//! 1. `--python` on the command line
//! 2. `python:` in `venvup.yml`
//! 3. The first of [`default_candidates`] found on `PATH`

use regex::Regex;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{Result, VenvupError};
use crate::shell::{find_executable, CommandOptions, Invocation, ProcessRunner};

static RE_PYTHON_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Python (\d+)\.(\d+)(?:\.(\d+))?").expect("version pattern is valid")
});

/// Interpreter names tried when none is configured.
pub fn default_candidates() -> &'static [&'static str] {
    if cfg!(windows) {
        &["python", "py"]
    } else {
        &["python3", "python"]
    }
}

/// A Python version as reported by `--version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl PythonVersion {
    /// Extract a version from `python --version` output.
    pub fn parse(output: &str) -> Option<Self> {
        let caps = RE_PYTHON_VERSION.captures(output)?;
        let part = |i: usize| caps.get(i).and_then(|m| m.as_str().parse().ok());
        Some(Self {
            major: part(1)?,
            minor: part(2)?,
            patch: part(3).unwrap_or(0),
        })
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A located base interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    /// Absolute path of the executable.
    pub path: PathBuf,

    /// Version, when it could be determined.
    pub version: Option<PythonVersion>,
}

impl Interpreter {
    /// Short description for messages, e.g. `Python 3.12.1 (/usr/bin/python3)`.
    pub fn describe(&self) -> String {
        match &self.version {
            Some(v) => format!("Python {} ({})", v, self.path.display()),
            None => format!("Python ({})", self.path.display()),
        }
    }
}

/// Find the base interpreter.
///
/// `requested` is a name or path from the command line or config; when it is
/// `None` each default candidate is tried in order. A relative path is
/// resolved against the current directory and returned absolute, since the
/// environment is created from the project root.
pub fn locate(requested: Option<&str>, path: Option<&OsStr>) -> Result<PathBuf> {
    let candidates: Vec<&str> = match requested {
        Some(name) => vec![name],
        None => default_candidates().to_vec(),
    };

    for name in &candidates {
        if let Some(found) = find_executable(name, path) {
            let found = std::path::absolute(&found)?;
            tracing::debug!("Using interpreter {} for '{}'", found.display(), name);
            return Ok(found);
        }
    }

    Err(VenvupError::InterpreterNotFound {
        candidates: candidates.iter().map(|c| c.to_string()).collect(),
    })
}

/// Ask `path --version` for the interpreter's version.
///
/// Older interpreters print the version on stderr, so both streams are
/// checked. Any failure yields an interpreter with an unknown version.
pub fn probe(path: &Path, runner: &mut dyn ProcessRunner) -> Interpreter {
    let invocation = Invocation::new(path).arg("--version");
    let version = match runner.run(&invocation, &CommandOptions::captured(None)) {
        Ok(result) if result.success => PythonVersion::parse(&result.stdout)
            .or_else(|| PythonVersion::parse(&result.stderr)),
        Ok(result) => {
            tracing::debug!(
                "{} exited with {:?}; version unknown",
                invocation,
                result.exit_code
            );
            None
        }
        Err(e) => {
            tracing::debug!("Version probe failed: {}", e);
            None
        }
    };

    Interpreter {
        path: path.to_path_buf(),
        version,
    }
}
