//! The fixed sequence of setup steps and their outcomes.

use std::fmt;

use crate::ui::StatusKind;

/// One step of the setup pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetupStep {
    /// Create the environment unless its marker already exists.
    EnsureEnvironment,
    /// Build the activation handed to every later child process.
    Activate,
    /// `pip install --upgrade pip` inside the environment.
    UpgradeInstaller,
    /// `pip install -r <manifest>` when the manifest exists.
    InstallDependencies,
}

impl SetupStep {
    /// All steps in execution order.
    pub const ALL: [SetupStep; 4] = [
        SetupStep::EnsureEnvironment,
        SetupStep::Activate,
        SetupStep::UpgradeInstaller,
        SetupStep::InstallDependencies,
    ];

    /// Short name shown in summaries and spinners.
    pub fn label(&self) -> &'static str {
        match self {
            SetupStep::EnsureEnvironment => "Create environment",
            SetupStep::Activate => "Activate environment",
            SetupStep::UpgradeInstaller => "Upgrade pip",
            SetupStep::InstallDependencies => "Install dependencies",
        }
    }

    /// Hint printed under a failed command, if there is a common cause.
    pub fn failure_hint(&self) -> Option<&'static str> {
        match self {
            SetupStep::EnsureEnvironment => Some(
                "Check that the interpreter ships the venv module (python3-venv on Debian/Ubuntu)",
            ),
            SetupStep::UpgradeInstaller | SetupStep::InstallDependencies => {
                Some("Re-run with --verbose to see the installer output")
            }
            SetupStep::Activate => None,
        }
    }
}

impl fmt::Display for SetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What happened to a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Completed,
    Skipped { reason: String },
    Failed { message: String },
    /// Would have run; dry run.
    Planned,
    /// Not attempted because an earlier step failed.
    NotRun,
}

impl StepOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, StepOutcome::Failed { .. })
    }

    /// Summary status for this outcome.
    pub fn status(&self) -> StatusKind {
        match self {
            StepOutcome::Completed => StatusKind::Success,
            StepOutcome::Skipped { .. } => StatusKind::Skipped,
            StepOutcome::Failed { .. } => StatusKind::Failed,
            StepOutcome::Planned => StatusKind::Planned,
            StepOutcome::NotRun => StatusKind::NotRun,
        }
    }

    /// Text shown next to the step in the summary.
    pub fn detail(&self) -> Option<String> {
        match self {
            StepOutcome::Completed => None,
            StepOutcome::Skipped { reason } => Some(reason.clone()),
            StepOutcome::Failed { message } => Some(message.clone()),
            StepOutcome::Planned => Some("planned".to_string()),
            StepOutcome::NotRun => Some("not run".to_string()),
        }
    }
}
