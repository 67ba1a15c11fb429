//! Non-interactive UI for CI/headless environments.

use super::summary::format_duration;
use super::{NoopSpinner, OutputMode, RunSummary, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Writes plain text without color or cursor control, never shows spinners
/// and never blocks waiting for input.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("  {}", message);
        }
        Box::new(NoopSpinner)
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        if self.mode.shows_status() && !self.mode.shows_spinners() {
            print!("[{}/{}] ", current, total);
        }
    }

    fn show_error_block(&mut self, command: &str, output: &str, hint: Option<&str>) {
        eprintln!("    ┌─ Command ──────────────────────────");
        eprintln!("    │ {}", command);
        if !output.is_empty() {
            eprintln!("    ├─ Output ───────────────────────────");
            for line in output.lines() {
                eprintln!("    │ {}", line);
            }
        }
        eprintln!("    └────────────────────────────────────");
        if let Some(h) = hint {
            eprintln!("    Hint: {}", h);
        }
    }

    fn show_summary(&mut self, summary: &RunSummary) {
        if !self.mode.shows_status() {
            return;
        }

        println!();
        println!("  ┌─ Summary ──────────────────────────");
        for row in &summary.rows {
            let right_side = match (&row.duration, &row.detail) {
                (Some(d), _) if !d.is_zero() => format_duration(*d),
                (_, Some(detail)) => detail.clone(),
                _ => String::new(),
            };
            println!(
                "  │ {} {:<24} {}",
                row.status.icon(),
                row.name,
                right_side
            );
        }
        println!("  └─ Total: {}", format_duration(summary.total_duration));
    }

    fn pause(&mut self, _prompt: &str) {
        tracing::debug!("Skipping pause in non-interactive mode");
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
