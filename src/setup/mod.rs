//! The setup pipeline.
//!
//! [`SetupRunner`] walks the fixed [`SetupStep`] sequence: ensure the
//! environment exists, activate it, upgrade pip, then install the manifest
//! when one is present. Every child process goes through a
//! [`ProcessRunner`](crate::shell::ProcessRunner), so the pipeline runs
//! unchanged against [`MockRunner`](crate::shell::MockRunner) in tests.
//!
//! # Example
//!
//! ```
//! use venvup::setup::{SetupOptions, SetupRunner, SetupStep, StepOutcome};
//! use venvup::shell::MockRunner;
//! use venvup::ui::MockUI;
//! use tempfile::TempDir;
//!
//! let root = TempDir::new().unwrap();
//! let options = SetupOptions { dry_run: true, ..Default::default() };
//! let mut runner = MockRunner::new();
//! let mut ui = MockUI::new();
//!
//! let report = SetupRunner::new(root.path(), &options, &mut runner).run(&mut ui);
//!
//! assert!(runner.calls().is_empty());
//! assert_eq!(report.outcome(SetupStep::Activate), Some(&StepOutcome::Planned));
//! ```

pub mod options;
pub mod report;
pub mod runner;
pub mod step;

pub use options::{ErrorPolicy, SetupOptions};
pub use report::{SetupReport, StepRecord};
pub use runner::{SetupRunner, PAUSE_PROMPT};
pub use step::{SetupStep, StepOutcome};
