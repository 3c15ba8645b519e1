//! Dev server launch.
//!
//! The final stage hands the terminal over to `pnpm dev` in the
//! foreground, with no timeout, and blocks until it exits. Ctrl+C goes to
//! the whole process group, so the server receives it directly; the
//! interrupt flag tells us afterwards whether the exit was a shutdown
//! request rather than a crash.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::anyhow;

use crate::error::{PitchError, Result};
use crate::shell::{CommandRunner, CommandSpec};

/// Command handed to the shell for the foreground dev server.
pub const DEV_SERVER_COMMAND: &str = "pnpm dev";

/// Run the development server until it exits.
///
/// An exit caused by Ctrl+C (the interrupt flag is set, or the process
/// was killed by a signal) maps to [`PitchError::Interrupted`] so the
/// caller can shut down cleanly. Any other non-zero exit is a real error.
pub fn launch_dev_server(runner: &dyn CommandRunner, interrupt: &Arc<AtomicBool>) -> Result<()> {
    tracing::info!(command = DEV_SERVER_COMMAND, "starting development server");

    let spec = CommandSpec::shell(DEV_SERVER_COMMAND).with_timeout(None);
    let result = runner.run(&spec);

    if interrupt.load(Ordering::SeqCst) {
        return Err(PitchError::Interrupted);
    }

    if result.success() {
        return Ok(());
    }

    match result.exit_code {
        // Killed by a signal without our flag being set: still treat it
        // as an external shutdown, not a failure.
        None if !result.spawn_failed && !result.timed_out => Err(PitchError::Interrupted),
        Some(code) => Err(PitchError::Other(anyhow!(
            "development server exited with status {}",
            code
        ))),
        None => Err(PitchError::Other(anyhow!(
            "development server could not be started"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{CommandResult, ScriptedRunner};

    fn flag(value: bool) -> Arc<AtomicBool> {
        Arc::new(AtomicBool::new(value))
    }

    #[test]
    fn clean_exit_is_ok() {
        let runner = ScriptedRunner::new().respond("pnpm dev", CommandResult::ok(""));
        assert!(launch_dev_server(&runner, &flag(false)).is_ok());
    }

    #[test]
    fn interrupt_flag_maps_to_interrupted() {
        let runner = ScriptedRunner::new().respond("pnpm dev", CommandResult::exited(Some(130), ""));
        let err = launch_dev_server(&runner, &flag(true)).unwrap_err();
        assert!(matches!(err, PitchError::Interrupted));
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn signal_kill_without_flag_is_interrupted() {
        let runner = ScriptedRunner::new().respond("pnpm dev", CommandResult::exited(None, ""));
        let err = launch_dev_server(&runner, &flag(false)).unwrap_err();
        assert!(matches!(err, PitchError::Interrupted));
    }

    #[test]
    fn crash_exit_is_an_error() {
        let runner = ScriptedRunner::new().respond("pnpm dev", CommandResult::exited(Some(1), ""));
        let err = launch_dev_server(&runner, &flag(false)).unwrap_err();
        assert!(matches!(err, PitchError::Other(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn runs_without_timeout() {
        let spec = CommandSpec::shell(DEV_SERVER_COMMAND).with_timeout(None);
        assert!(spec.timeout.is_none());
    }
}
