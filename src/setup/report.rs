//! Record of a setup run.

use std::time::Duration;

use crate::error::VenvupError;
use crate::ui::{RunSummary, SummaryRow};

use super::step::{SetupStep, StepOutcome};

/// Outcome of one step.
#[derive(Debug, Clone)]
pub struct StepRecord {
    pub step: SetupStep,
    pub outcome: StepOutcome,
    pub duration: Duration,
}

/// Ordered step records of a run.
#[derive(Debug, Clone, Default)]
pub struct SetupReport {
    pub records: Vec<StepRecord>,
    pub total_duration: Duration,
    pub dry_run: bool,
}

impl SetupReport {
    /// True when no step failed.
    pub fn success(&self) -> bool {
        !self.records.iter().any(|r| r.outcome.is_failure())
    }

    /// Outcome of `step`, if it was recorded.
    pub fn outcome(&self, step: SetupStep) -> Option<&StepOutcome> {
        self.records
            .iter()
            .find(|r| r.step == step)
            .map(|r| &r.outcome)
    }

    /// Records of failed steps.
    pub fn failures(&self) -> impl Iterator<Item = &StepRecord> {
        self.records.iter().filter(|r| r.outcome.is_failure())
    }

    /// The first failure as an error, if any step failed.
    pub fn error(&self) -> Option<VenvupError> {
        self.failures().next().map(|r| VenvupError::StepFailed {
            step: r.step.label().to_string(),
            message: r.outcome.detail().unwrap_or_default(),
        })
    }

    /// Summary rows for display.
    pub fn summary(&self) -> RunSummary {
        let rows = self
            .records
            .iter()
            .map(|r| SummaryRow {
                name: r.step.label().to_string(),
                status: r.outcome.status(),
                detail: r.outcome.detail(),
                duration: match r.outcome {
                    StepOutcome::Completed | StepOutcome::Failed { .. } => Some(r.duration),
                    _ => None,
                },
            })
            .collect();

        RunSummary {
            rows,
            total_duration: self.total_duration,
            success: self.success(),
        }
    }
}
