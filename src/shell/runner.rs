//! The process-spawning seam.
//!
//! Setup steps never call [`execute`] directly; they go through a
//! [`ProcessRunner`] so tests can substitute [`MockRunner`](super::MockRunner)
//! and assert on exactly which commands would have run.

use crate::error::Result;

use super::command::{execute, CommandOptions, CommandResult, Invocation};

/// Runs child processes to completion.
pub trait ProcessRunner {
    /// Run `invocation` and block until it exits.
    ///
    /// A non-zero exit is reported through [`CommandResult::success`], not as
    /// an `Err`. `Err` means the process could not be started at all.
    fn run(&mut self, invocation: &Invocation, options: &CommandOptions) -> Result<CommandResult>;
}

/// Runner that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner.
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation, options: &CommandOptions) -> Result<CommandResult> {
        execute(invocation, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn system_runner_executes() {
        let mut runner = SystemRunner::new();
        let inv = Invocation::new("sh").args(["-c", "echo from-runner"]);
        let result = runner.run(&inv, &CommandOptions::captured(None)).unwrap();
        assert!(result.success);
        assert!(result.stdout.contains("from-runner"));
    }

    #[test]
    fn system_runner_reports_spawn_failure() {
        let mut runner = SystemRunner::new();
        let inv = Invocation::new("/no/such/venvup/binary");
        assert!(runner.run(&inv, &CommandOptions::default()).is_err());
    }
}
