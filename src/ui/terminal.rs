//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use super::summary::format_duration;
use super::{
    should_use_colors, NonInteractiveUI, NoopSpinner, OutputMode, ProgressSpinner, RunSummary,
    SpinnerHandle, UserInterface, VenvupTheme,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: VenvupTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            VenvupTheme::new()
        } else {
            VenvupTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        let stderr = Term::stderr();
        writeln!(&stderr, "{}", self.theme.format_error(msg)).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(NoopSpinner)
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        if self.mode.shows_status() && !self.mode.shows_spinners() {
            write!(
                self.term,
                "{} ",
                self.theme.info.apply_to(format!("[{}/{}]", current, total))
            )
            .ok();
        }
    }

    fn show_error_block(&mut self, command: &str, output: &str, hint: Option<&str>) {
        let b = &self.theme.border;
        let stderr = Term::stderr();
        writeln!(
            &stderr,
            "    {} {}",
            b.apply_to("┌─"),
            b.apply_to("Command ──────────────────────────")
        )
        .ok();
        writeln!(
            &stderr,
            "    {} {}",
            b.apply_to("│"),
            self.theme.command.apply_to(command)
        )
        .ok();

        if !output.is_empty() {
            writeln!(
                &stderr,
                "    {} {}",
                b.apply_to("├─"),
                b.apply_to("Output ───────────────────────────")
            )
            .ok();
            for line in output.lines() {
                writeln!(&stderr, "    {} {}", b.apply_to("│"), line).ok();
            }
        }

        writeln!(
            &stderr,
            "    {}",
            b.apply_to("└────────────────────────────────────")
        )
        .ok();

        if let Some(h) = hint {
            writeln!(
                &stderr,
                "    {} {}",
                self.theme.hint.apply_to("Hint:"),
                self.theme.hint.apply_to(h)
            )
            .ok();
        }
    }

    fn show_summary(&mut self, summary: &RunSummary) {
        if !self.mode.shows_status() {
            return;
        }

        let b = &self.theme.border;
        writeln!(self.term).ok();
        writeln!(
            self.term,
            "  {} {}",
            b.apply_to("┌─"),
            b.apply_to("Summary ──────────────────────────")
        )
        .ok();

        for row in &summary.rows {
            let right_side = match (&row.duration, &row.detail) {
                (Some(d), _) if !d.is_zero() => {
                    self.theme.dim.apply_to(format_duration(*d)).to_string()
                }
                (_, Some(detail)) => self.theme.dim.apply_to(detail).to_string(),
                _ => String::new(),
            };
            writeln!(
                self.term,
                "  {} {} {:<24} {}",
                b.apply_to("│"),
                row.status.styled(&self.theme),
                row.name,
                right_side
            )
            .ok();
        }

        writeln!(
            self.term,
            "  {} Total: {}",
            b.apply_to("└─"),
            self.theme
                .dim
                .apply_to(format_duration(summary.total_duration))
        )
        .ok();
    }

    fn pause(&mut self, prompt: &str) {
        writeln!(self.term).ok();
        write!(self.term, "{}", self.theme.dim.apply_to(prompt)).ok();
        self.term.flush().ok();
        if let Err(e) = self.term.read_key() {
            tracing::debug!("Pause ended without a keypress: {}", e);
        }
        writeln!(self.term).ok();
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
