//! Virtual environment layout and activation.
//!
//! - [`layout`] knows where an environment's marker, scripts directory and
//!   interpreter live.
//! - [`activation`] turns a layout into the variables each child process of
//!   an activated environment receives.

pub mod activation;
pub mod layout;

pub use activation::Activation;
pub use layout::{interpreter_file_name, scripts_dir_name, EnvironmentLayout, MARKER_FILE};
