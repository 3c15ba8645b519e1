use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pitch::cli::Cli;
use pitch::host::HostProfile;
use pitch::orchestrator::Orchestrator;
use pitch::shell::{self, SystemRunner};
use pitch::ui::{self, OutputMode};
use pitch::PitchError;

fn init_tracing(debug: bool) {
    let default_filter = if debug { "pitch=debug" } else { "pitch=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let interrupt = Arc::new(AtomicBool::new(false));
    {
        let interrupt = Arc::clone(&interrupt);
        if let Err(e) = ctrlc::set_handler(move || {
            interrupt.store(true, Ordering::SeqCst);
        }) {
            tracing::warn!(error = %e, "could not install Ctrl+C handler");
        }
    }

    let mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.debug {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };
    let interactive = !cli.non_interactive && !shell::is_ci();
    let mut ui = ui::create_ui(interactive, mode);

    let project_root = match cli.project {
        Some(dir) => dir,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                ui.error(&format!("Cannot determine the current directory: {}", e));
                return ExitCode::FAILURE;
            }
        },
    };

    let host = HostProfile::detect();
    let runner = SystemRunner::new();
    let orchestrator = Orchestrator::new(host, &runner, project_root, Arc::clone(&interrupt));

    match orchestrator.run(ui.as_mut()) {
        Ok(report) => {
            if report.is_clean() {
                ui.success("Shutting down. Environment is fully set up.");
            } else {
                ui.warning(&format!(
                    "Shutting down. Setup was degraded: {}",
                    report.degraded.join(", ")
                ));
            }
            ExitCode::SUCCESS
        }
        Err(PitchError::Interrupted) => {
            ui.message("Shutting down...");
            ExitCode::SUCCESS
        }
        Err(e) => {
            ui.error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}
