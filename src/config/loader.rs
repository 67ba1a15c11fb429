//! Configuration file discovery and loading.
//!
//! This module finds `venvup.yml` and `venvup.local.yml` under the project
//! root and merges them. Neither file is required.

use crate::config::merger::deep_merge;
use crate::config::schema::VenvupConfig;
use crate::error::{Result, VenvupError};
use std::fs;
use std::path::{Path, PathBuf};

/// Shared project config file name.
pub const CONFIG_FILE: &str = "venvup.yml";

/// Per-developer override file name.
pub const LOCAL_CONFIG_FILE: &str = "venvup.local.yml";

/// Config files for a project, in merge order.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: venvup.yml
    pub project: Option<PathBuf>,

    /// Local overrides: venvup.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_FILE)),
            project_local: existing(project_root.join(LOCAL_CONFIG_FILE)),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project
            .iter()
            .chain(self.project_local.iter())
            .collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            VenvupError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            VenvupError::Io(e)
        }
    })
}

/// Load a single config file and parse it into [`VenvupConfig`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<VenvupConfig> {
    let content = read_config(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into [`VenvupConfig`].
///
/// An empty document yields the default config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<VenvupConfig> {
    if content.trim().is_empty() {
        return Ok(VenvupConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| VenvupError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a config file as a raw YAML value (for merging).
///
/// Empty files load as an empty mapping.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = read_config(path)?;
    if content.trim().is_empty() {
        return Ok(serde_yaml::Value::Mapping(Default::default()));
    }

    serde_yaml::from_str(&content).map_err(|e| VenvupError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge the project config files.
///
/// Missing files are skipped; with no files at all the default config is
/// returned.
pub fn load_merged_config(project_root: &Path) -> Result<VenvupConfig> {
    let paths = ConfigPaths::discover(project_root);
    let mut merged = serde_yaml::Value::Mapping(Default::default());

    for path in paths.all_existing() {
        tracing::debug!("Loading config {}", path.display());
        let value = load_config_value(path)?;
        merged = deep_merge(&merged, &value);
    }

    serde_yaml::from_value(merged).map_err(|e| VenvupError::ConfigParseError {
        path: project_root.join(CONFIG_FILE),
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging;
/// it must exist. Otherwise, discovers and merges the project's files.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<VenvupConfig> {
    if let Some(override_path) = config_override {
        load_config_file(override_path)
    } else {
        load_merged_config(project_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn discover_finds_both_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "").unwrap();
        fs::write(temp.path().join(LOCAL_CONFIG_FILE), "").unwrap();

        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_some());
        assert!(paths.project_local.is_some());
        assert_eq!(paths.all_existing().len(), 2);
    }

    #[test]
    fn discover_returns_none_for_missing_configs() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.all_existing().is_empty());
    }

    #[test]
    fn load_config_file_parses_valid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "env_dir: .venv").unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.env_dir, Some(PathBuf::from(".venv")));
    }

    #[test]
    fn load_config_file_returns_not_found_error() {
        let result = load_config_file(Path::new("/nonexistent/venvup.yml"));
        assert!(matches!(result, Err(VenvupError::ConfigNotFound { .. })));
    }

    #[test]
    fn parse_config_returns_parse_error_for_invalid_yaml() {
        let result = parse_config("env_dir: [", Path::new("venvup.yml"));
        assert!(matches!(result, Err(VenvupError::ConfigParseError { .. })));
    }

    #[test]
    fn parse_config_handles_empty_file() {
        let config = parse_config("  \n", Path::new("venvup.yml")).unwrap();
        assert_eq!(config, VenvupConfig::default());
    }

    #[test]
    fn load_merged_config_without_files_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config, VenvupConfig::default());
    }

    #[test]
    fn load_merged_config_applies_local_overrides() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "python: python3.11\nenv_dir: .venv\n",
        )
        .unwrap();
        fs::write(temp.path().join(LOCAL_CONFIG_FILE), "python: python3.12\n").unwrap();

        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config.python.as_deref(), Some("python3.12"));
        assert_eq!(config.env_dir, Some(PathBuf::from(".venv")));
    }

    #[test]
    fn load_merged_config_tolerates_empty_local_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "pause: false").unwrap();
        fs::write(temp.path().join(LOCAL_CONFIG_FILE), "").unwrap();

        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config.pause, Some(false));
    }

    #[test]
    fn load_merged_config_reports_unknown_fields() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "venv_dir: x").unwrap();

        let result = load_merged_config(temp.path());
        assert!(matches!(result, Err(VenvupError::ConfigParseError { .. })));
    }

    #[test]
    fn load_config_override_skips_project_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "python: python3.11").unwrap();
        let override_path = temp.path().join("ci.yml");
        fs::write(&override_path, "keep_going: true").unwrap();

        let config = load_config(temp.path(), Some(&override_path)).unwrap();
        assert_eq!(config.python, None);
        assert_eq!(config.keep_going, Some(true));
    }

    #[test]
    fn load_config_missing_override_fails() {
        let temp = TempDir::new().unwrap();
        let result = load_config(temp.path(), Some(&temp.path().join("nope.yml")));
        assert!(matches!(result, Err(VenvupError::ConfigNotFound { .. })));
    }
}
