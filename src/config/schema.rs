//! Configuration schema for `venvup.yml`.
//!
//! Every field is optional; a missing file and an empty file both produce
//! [`VenvupConfig::default()`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default environment directory, relative to the project root.
pub const DEFAULT_ENV_DIR: &str = "venv";

/// Default dependency manifest, relative to the project root.
pub const DEFAULT_MANIFEST: &str = "requirements.txt";

/// Root configuration structure for `venvup.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VenvupConfig {
    /// Environment directory (relative to the project root)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_dir: Option<PathBuf>,

    /// Dependency manifest (relative to the project root)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,

    /// Interpreter used to create the environment (name or path)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<String>,

    /// Continue with later steps after a failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_going: Option<bool>,

    /// Wait for a keypress before exiting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause: Option<bool>,

    /// Extra arguments for every installer invocation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub installer_args: Vec<String>,

    /// Default output mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputMode>,
}

impl VenvupConfig {
    /// Environment directory, falling back to [`DEFAULT_ENV_DIR`].
    pub fn env_dir(&self) -> PathBuf {
        self.env_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_DIR))
    }

    /// Manifest path, falling back to [`DEFAULT_MANIFEST`].
    pub fn manifest(&self) -> PathBuf {
        self.manifest
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST))
    }
}

/// Output mode as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    Normal,
    Quiet,
    Silent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_is_default() {
        let config: VenvupConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, VenvupConfig::default());
        assert_eq!(config.env_dir(), PathBuf::from("venv"));
        assert_eq!(config.manifest(), PathBuf::from("requirements.txt"));
    }

    #[test]
    fn parses_all_fields() {
        let yaml = r#"
env_dir: .venv
manifest: requirements/dev.txt
python: python3.12
keep_going: true
pause: false
installer_args: ["--disable-pip-version-check"]
output: quiet
"#;
        let config: VenvupConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.env_dir(), PathBuf::from(".venv"));
        assert_eq!(config.manifest(), PathBuf::from("requirements/dev.txt"));
        assert_eq!(config.python.as_deref(), Some("python3.12"));
        assert_eq!(config.keep_going, Some(true));
        assert_eq!(config.pause, Some(false));
        assert_eq!(config.installer_args, vec!["--disable-pip-version-check"]);
        assert_eq!(config.output, Some(OutputMode::Quiet));
    }

    #[test]
    fn rejects_unknown_fields() {
        let result: Result<VenvupConfig, _> = serde_yaml::from_str("envdir: venv");
        assert!(result.is_err());
    }

    #[test]
    fn serializes_only_set_fields() {
        let config = VenvupConfig {
            python: Some("python3".to_string()),
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("python: python3"));
        assert!(!yaml.contains("env_dir"));
    }
}
