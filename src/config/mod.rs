//! Configuration loading, merging and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Layering in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use venvup::config::{load_merged_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("venvup.yml"), "env_dir: .venv").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.env_dir().to_str(), Some(".venv"));
//! ```

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{
    load_config, load_config_file, load_config_value, load_merged_config, parse_config,
    ConfigPaths, CONFIG_FILE, LOCAL_CONFIG_FILE,
};
pub use merger::{deep_merge, overlay};
pub use schema::{OutputMode, VenvupConfig, DEFAULT_ENV_DIR, DEFAULT_MANIFEST};
pub use validator::{validate, validate_config, ValidationError};
