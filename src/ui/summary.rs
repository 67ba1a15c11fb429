//! End-of-run summary data.

use std::time::Duration;

use super::theme::VenvupTheme;

/// Display status of one summary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Failed,
    Skipped,
    /// Would run, but this is a dry run.
    Planned,
    /// Never reached because an earlier step failed.
    NotRun,
}

impl StatusKind {
    /// Icon for this status.
    pub fn icon(&self) -> &'static str {
        match self {
            StatusKind::Success => "✓",
            StatusKind::Failed => "✗",
            StatusKind::Skipped => "○",
            StatusKind::Planned => "◇",
            StatusKind::NotRun => "·",
        }
    }

    /// Icon styled with `theme`.
    pub fn styled(&self, theme: &VenvupTheme) -> String {
        let style = match self {
            StatusKind::Success => &theme.success,
            StatusKind::Failed => &theme.error,
            StatusKind::Planned => &theme.info,
            StatusKind::Skipped | StatusKind::NotRun => &theme.dim,
        };
        style.apply_to(self.icon()).to_string()
    }
}

/// One row of the summary.
#[derive(Debug, Clone)]
pub struct SummaryRow {
    pub name: String,
    pub status: StatusKind,
    pub detail: Option<String>,
    pub duration: Option<Duration>,
}

/// Summary shown after the setup steps have run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub rows: Vec<SummaryRow>,
    pub total_duration: Duration,
    pub success: bool,
}

/// Format a duration for display.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = secs / 60.0;
        format!("{:.1}m", mins)
    }
}
