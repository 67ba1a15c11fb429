//! Child process execution and platform helpers.

pub mod command;
pub mod mock;
pub mod platform;
pub mod runner;

pub use command::{execute, CommandOptions, CommandResult, Invocation};
pub use mock::MockRunner;
pub use platform::{find_executable, is_ci, is_executable, parse_path, system_path};
pub use runner::{ProcessRunner, SystemRunner};
