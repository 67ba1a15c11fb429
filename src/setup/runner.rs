//! Sequential setup pipeline.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::environment::{Activation, EnvironmentLayout};
use crate::interpreter::{self, default_candidates};
use crate::shell::{CommandOptions, Invocation, ProcessRunner};
use crate::ui::{SpinnerHandle, UserInterface};

use super::options::{ErrorPolicy, SetupOptions};
use super::report::{SetupReport, StepRecord};
use super::step::{SetupStep, StepOutcome};

/// Prompt shown while waiting at the end of an interactive run.
pub const PAUSE_PROMPT: &str = "Press any key to continue...";

/// Runs the setup steps for one project root.
pub struct SetupRunner<'a> {
    root: &'a Path,
    options: &'a SetupOptions,
    runner: &'a mut dyn ProcessRunner,
}

/// Per-step display state.
struct StepProgress {
    index: usize,
    total: usize,
    spinner: Option<Box<dyn SpinnerHandle>>,
}

impl StepProgress {
    fn announce(&mut self, ui: &mut dyn UserInterface, msg: &str) {
        match &mut self.spinner {
            Some(spinner) => spinner.set_message(msg),
            None => {
                ui.show_progress(self.index, self.total);
                ui.message(msg);
            }
        }
    }

    fn finish(self, ui: &mut dyn UserInterface, step: SetupStep, outcome: &StepOutcome) {
        let Some(mut spinner) = self.spinner else {
            if let StepOutcome::Failed { message } = outcome {
                ui.error(message);
            }
            return;
        };

        match outcome {
            StepOutcome::Completed => spinner.finish_success(step.label()),
            StepOutcome::Skipped { reason } => spinner.finish_skipped(reason),
            StepOutcome::Failed { message } => spinner.finish_error(message),
            StepOutcome::Planned | StepOutcome::NotRun => {
                spinner.finish_skipped(&format!("{} (planned)", step.label()))
            }
        }
    }
}

impl<'a> SetupRunner<'a> {
    pub fn new(
        root: &'a Path,
        options: &'a SetupOptions,
        runner: &'a mut dyn ProcessRunner,
    ) -> Self {
        Self {
            root,
            options,
            runner,
        }
    }

    /// Layout of the environment this runner manages.
    pub fn layout(&self) -> EnvironmentLayout {
        EnvironmentLayout::new(self.root, &self.options.env_dir)
    }

    /// Run every step, then report completion and pause if appropriate.
    ///
    /// Step failures are recorded in the report rather than returned.
    pub fn run(&mut self, ui: &mut dyn UserInterface) -> SetupReport {
        let start = Instant::now();
        let layout = self.layout();
        let total = SetupStep::ALL.len();
        let quiet = ui.output_mode().shows_spinners();

        tracing::debug!(
            "Setting up {} in {}",
            self.options.env_dir.display(),
            self.root.display()
        );

        let mut activation: Option<Activation> = None;
        let mut records = Vec::with_capacity(total);
        let mut halted = false;

        for (index, step) in SetupStep::ALL.into_iter().enumerate() {
            if halted {
                records.push(StepRecord {
                    step,
                    outcome: StepOutcome::NotRun,
                    duration: Duration::ZERO,
                });
                continue;
            }

            let spinner = if quiet {
                Some(ui.start_spinner(step.label()))
            } else {
                None
            };
            let mut progress = StepProgress {
                index: index + 1,
                total,
                spinner,
            };

            let step_start = Instant::now();
            let outcome = match step {
                SetupStep::EnsureEnvironment => {
                    self.ensure_environment(&layout, &mut progress, ui)
                }
                SetupStep::Activate => {
                    self.activate(&layout, &mut activation, &mut progress, ui)
                }
                SetupStep::UpgradeInstaller => {
                    self.upgrade_installer(activation.as_ref(), &mut progress, ui)
                }
                SetupStep::InstallDependencies => {
                    self.install_dependencies(activation.as_ref(), &mut progress, ui)
                }
            };
            let duration = step_start.elapsed();

            progress.finish(ui, step, &outcome);

            if let StepOutcome::Failed { message } = &outcome {
                tracing::warn!("{} failed: {}", step, message);
                if self.options.error_policy == ErrorPolicy::Halt {
                    halted = true;
                }
            } else {
                tracing::debug!("{} finished in {:?}: {:?}", step, duration, outcome);
            }

            records.push(StepRecord {
                step,
                outcome,
                duration,
            });
        }

        let report = SetupReport {
            records,
            total_duration: start.elapsed(),
            dry_run: self.options.dry_run,
        };

        self.complete(&report, ui);
        report
    }

    fn ensure_environment(
        &mut self,
        layout: &EnvironmentLayout,
        progress: &mut StepProgress,
        ui: &mut dyn UserInterface,
    ) -> StepOutcome {
        if layout.exists() {
            let reason = "Virtual environment already exists".to_string();
            progress.announce(ui, &reason);
            return StepOutcome::Skipped { reason };
        }

        progress.announce(
            ui,
            &format!(
                "Creating virtual environment in {}...",
                self.options.env_dir.display()
            ),
        );

        let python = match interpreter::locate(
            self.options.python.as_deref(),
            self.options.search_path.as_deref(),
        ) {
            Ok(path) => path,
            Err(_) if self.options.dry_run => PathBuf::from(self.requested_python()),
            Err(e) => {
                return StepOutcome::Failed {
                    message: e.to_string(),
                }
            }
        };

        let invocation = Invocation::new(&python)
            .args(["-m", "venv"])
            .arg(&self.options.env_dir);

        if self.options.dry_run {
            return plan(&invocation, ui);
        }

        let base = interpreter::probe(&python, &mut *self.runner);
        tracing::debug!("Base interpreter: {}", base.describe());
        if ui.output_mode().shows_commands() {
            ui.message(&format!("  Using {}", base.describe()));
        }

        match self.run_command(SetupStep::EnsureEnvironment, &invocation, None, ui) {
            StepOutcome::Completed if !layout.exists() => StepOutcome::Failed {
                message: format!(
                    "{} was not created by {}",
                    layout.marker().display(),
                    invocation
                ),
            },
            outcome => outcome,
        }
    }

    fn activate(
        &mut self,
        layout: &EnvironmentLayout,
        activation: &mut Option<Activation>,
        progress: &mut StepProgress,
        ui: &mut dyn UserInterface,
    ) -> StepOutcome {
        progress.announce(ui, "Activating virtual environment...");

        if self.options.dry_run {
            return match Activation::unchecked(layout, self.base_path()) {
                Ok(planned) => {
                    *activation = Some(planned);
                    StepOutcome::Planned
                }
                Err(e) => StepOutcome::Failed {
                    message: e.to_string(),
                },
            };
        }

        match Activation::activate(layout, self.base_path()) {
            Ok(active) => {
                tracing::debug!("VIRTUAL_ENV={}", active.virtual_env().display());
                *activation = Some(active);
                StepOutcome::Completed
            }
            Err(e) => {
                // Later steps still need an interpreter path to attempt.
                if self.options.error_policy == ErrorPolicy::KeepGoing {
                    *activation = Activation::unchecked(layout, self.base_path()).ok();
                }
                StepOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    fn upgrade_installer(
        &mut self,
        activation: Option<&Activation>,
        progress: &mut StepProgress,
        ui: &mut dyn UserInterface,
    ) -> StepOutcome {
        progress.announce(ui, "Upgrading pip...");

        let Some(activation) = activation else {
            return not_activated();
        };

        let invocation = Invocation::new(activation.interpreter())
            .args(["-m", "pip", "install", "--upgrade", "pip"])
            .args(&self.options.installer_args);

        if self.options.dry_run {
            return plan(&invocation, ui);
        }
        self.run_command(SetupStep::UpgradeInstaller, &invocation, Some(activation), ui)
    }

    fn install_dependencies(
        &mut self,
        activation: Option<&Activation>,
        progress: &mut StepProgress,
        ui: &mut dyn UserInterface,
    ) -> StepOutcome {
        let manifest = &self.options.manifest;
        if !self.root.join(manifest).is_file() {
            let reason = format!(
                "No {} found, skipping dependency installation",
                manifest.display()
            );
            progress.announce(ui, &reason);
            return StepOutcome::Skipped { reason };
        }

        progress.announce(
            ui,
            &format!("Installing dependencies from {}...", manifest.display()),
        );

        let Some(activation) = activation else {
            return not_activated();
        };

        let invocation = Invocation::new(activation.interpreter())
            .args(["-m", "pip", "install", "-r"])
            .arg(manifest)
            .args(&self.options.installer_args);

        if self.options.dry_run {
            return plan(&invocation, ui);
        }
        self.run_command(
            SetupStep::InstallDependencies,
            &invocation,
            Some(activation),
            ui,
        )
    }

    fn run_command(
        &mut self,
        step: SetupStep,
        invocation: &Invocation,
        activation: Option<&Activation>,
        ui: &mut dyn UserInterface,
    ) -> StepOutcome {
        let mode = ui.output_mode();
        if mode.shows_commands() {
            ui.message(&format!("  $ {}", invocation));
        }

        let mut options = if mode.streams_command_output() {
            CommandOptions {
                cwd: Some(self.root.to_path_buf()),
                ..Default::default()
            }
        } else {
            CommandOptions::captured(Some(self.root))
        };
        if let Some(activation) = activation {
            activation.apply(&mut options);
        }

        match self.runner.run(invocation, &options) {
            Ok(result) if result.success => StepOutcome::Completed,
            Ok(result) => {
                ui.show_error_block(
                    &invocation.to_string(),
                    &result.combined_output(),
                    step.failure_hint(),
                );
                let message = match result.exit_code {
                    Some(code) => format!("exited with code {}", code),
                    None => "terminated without an exit code".to_string(),
                };
                StepOutcome::Failed { message }
            }
            Err(e) => {
                ui.show_error_block(&invocation.to_string(), "", step.failure_hint());
                StepOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    fn complete(&self, report: &SetupReport, ui: &mut dyn UserInterface) {
        let success = report.success();

        if !success || ui.output_mode().shows_commands() {
            ui.show_summary(&report.summary());
        }

        if self.options.dry_run {
            ui.success("Dry run complete, nothing was executed");
            return;
        }

        if success {
            ui.success("Setup complete!");
        } else if self.options.error_policy == ErrorPolicy::KeepGoing {
            ui.warning("Setup finished with errors");
        } else {
            ui.error("Setup failed");
        }

        if self.options.pause && ui.is_interactive() {
            ui.pause(PAUSE_PROMPT);
        }
    }

    fn requested_python(&self) -> String {
        match &self.options.python {
            Some(python) => python.clone(),
            None => default_candidates()[0].to_string(),
        }
    }

    fn base_path(&self) -> Option<OsString> {
        self.options.search_path.clone()
    }
}

fn plan(invocation: &Invocation, ui: &mut dyn UserInterface) -> StepOutcome {
    ui.message(&format!("  Would run: {}", invocation));
    StepOutcome::Planned
}

fn not_activated() -> StepOutcome {
    StepOutcome::Failed {
        message: "environment is not activated".to_string(),
    }
}
