//! venvup - Bootstrap a project's Python virtual environment.
//!
//! venvup resolves the project root from its own install location, creates
//! the environment when its `pyvenv.cfg` marker is missing, activates it for
//! its child processes, upgrades pip and installs `requirements.txt` when the
//! project has one.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Optional `venvup.yml` loading, merging, and validation
//! - [`environment`] - Environment layout and activation
//! - [`error`] - Error types and result aliases
//! - [`interpreter`] - Base interpreter discovery
//! - [`project`] - Project root resolution
//! - [`setup`] - The setup step pipeline
//! - [`shell`] - Child process execution
//! - [`ui`] - Spinners, terminal output and the final pause
//!
//! # Example
//!
//! ```
//! use venvup::environment::{Activation, EnvironmentLayout};
//! use venvup::shell::CommandOptions;
//! use std::path::Path;
//!
//! let layout = EnvironmentLayout::new(Path::new("/work/app"), Path::new("venv"));
//! let activation = Activation::unchecked(&layout, None).unwrap();
//!
//! let mut options = CommandOptions::default();
//! activation.apply(&mut options);
//! assert!(options.env.contains_key("VIRTUAL_ENV"));
//! assert!(options.env_remove.contains(&"PYTHONHOME".to_string()));
//! ```

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod project;
pub mod setup;
pub mod shell;
pub mod ui;

pub use error::{Result, VenvupError};
