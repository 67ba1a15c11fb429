//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - `env_dir` and `manifest` must be non-empty relative paths that stay
//!   inside the project root
//! - `env_dir` and `manifest` must not name the same path
//! - `python` and `installer_args` entries must not be blank

use crate::config::schema::VenvupConfig;
use crate::error::{Result, VenvupError};
use std::path::{Component, Path};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Config field the error applies to
    pub field: String,
}

/// Validate a configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_config(config: &VenvupConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let env_dir = config.env_dir();
    let manifest = config.manifest();

    errors.extend(validate_project_path("env_dir", &env_dir));
    errors.extend(validate_project_path("manifest", &manifest));

    if env_dir == manifest {
        errors.push(ValidationError {
            rule: "path-collision".to_string(),
            message: format!(
                "'env_dir' and 'manifest' both point to '{}'",
                env_dir.display()
            ),
            field: "manifest".to_string(),
        });
    }

    if matches!(&config.python, Some(p) if p.trim().is_empty()) {
        errors.push(ValidationError {
            rule: "blank-value".to_string(),
            message: "'python' must not be empty".to_string(),
            field: "python".to_string(),
        });
    }

    if config.installer_args.iter().any(|a| a.trim().is_empty()) {
        errors.push(ValidationError {
            rule: "blank-value".to_string(),
            message: "'installer_args' must not contain empty entries".to_string(),
            field: "installer_args".to_string(),
        });
    }

    errors
}

/// Validate a path that must resolve inside the project root.
fn validate_project_path(field: &str, path: &Path) -> Option<ValidationError> {
    let problem = if path.as_os_str().is_empty() {
        "must not be empty"
    } else if path.is_absolute() || path.has_root() {
        "must be relative to the project root"
    } else if path.components().any(|c| matches!(c, Component::ParentDir)) {
        "must not leave the project root"
    } else {
        return None;
    };

    Some(ValidationError {
        rule: "project-path".to_string(),
        message: format!("'{}' {} (got '{}')", field, problem, path.display()),
        field: field.to_string(),
    })
}

/// Validate configuration and return first error.
pub fn validate(config: &VenvupConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(VenvupError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&VenvupConfig::default()).is_ok());
    }

    #[test]
    fn rejects_absolute_env_dir() {
        let config = VenvupConfig {
            env_dir: Some(PathBuf::from("/opt/venv")),
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "env_dir");
        assert!(errors[0].message.contains("relative"));
    }

    #[test]
    fn rejects_parent_traversal() {
        let config = VenvupConfig {
            manifest: Some(PathBuf::from("../shared/requirements.txt")),
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.field == "manifest"));
    }

    #[test]
    fn rejects_empty_path() {
        let config = VenvupConfig {
            env_dir: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn rejects_collision() {
        let config = VenvupConfig {
            env_dir: Some(PathBuf::from("deps")),
            manifest: Some(PathBuf::from("deps")),
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "path-collision"));
    }

    #[test]
    fn rejects_blank_python() {
        let config = VenvupConfig {
            python: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn collects_all_errors() {
        let config = VenvupConfig {
            env_dir: Some(PathBuf::from("/abs")),
            manifest: Some(PathBuf::from("../up")),
            installer_args: vec![String::new()],
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 3);

        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("; "));
    }

    #[test]
    fn nested_relative_paths_are_fine() {
        let config = VenvupConfig {
            env_dir: Some(PathBuf::from(".cache/venv")),
            manifest: Some(PathBuf::from("requirements/dev.txt")),
            ..Default::default()
        };
        assert!(validate(&config).is_ok());
    }
}
