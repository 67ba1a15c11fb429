//! venvup CLI entry point.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use venvup::cli::{Cli, CommandDispatcher, ProjectContext};
use venvup::shell::is_ci;
use venvup::ui::{create_ui, OutputMode};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("venvup=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("venvup=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Output mode selected by flags, if any.
fn flag_output_mode(cli: &Cli) -> Option<OutputMode> {
    if cli.quiet {
        Some(OutputMode::Quiet)
    } else if cli.verbose {
        Some(OutputMode::Verbose)
    } else {
        None
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("venvup starting with args: {:?}", cli);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Pausing needs someone at the keyboard
    let is_interactive = !cli.non_interactive && !is_ci() && std::io::stdin().is_terminal();

    let dispatcher = if CommandDispatcher::needs_project(&cli) {
        match ProjectContext::load(&cli) {
            Ok(context) => CommandDispatcher::new(context),
            Err(e) => {
                let mut ui = create_ui(false, flag_output_mode(&cli).unwrap_or_default());
                ui.error(&format!("Error: {}", e));
                return ExitCode::from(if e.is_usage_error() { 2 } else { 1 });
            }
        }
    } else {
        CommandDispatcher::detached()
    };

    // Flags win over the config file's output setting
    let output_mode = flag_output_mode(&cli)
        .or_else(|| {
            dispatcher
                .context()
                .and_then(|c| c.config.output)
                .map(OutputMode::from)
        })
        .unwrap_or_default();

    let mut ui = create_ui(is_interactive, output_mode);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(if e.is_usage_error() { 2 } else { 1 })
        }
    }
}
