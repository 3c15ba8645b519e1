//! External command execution.
//!
//! All interaction with external tools goes through the [`CommandRunner`]
//! trait: the real [`SystemRunner`] spawns processes, while
//! [`ScriptedRunner`] lets tests drive the orchestrator deterministically.
//!
//! Failure never crosses this boundary as a panic or error value: a
//! non-zero exit, a timeout, and a missing binary are all normalized into
//! a [`CommandResult`] the caller can classify via [`FailureReason`].

pub mod command;
pub mod scripted;

pub use command::SystemRunner;
pub use scripted::ScriptedRunner;

use std::time::Duration;

/// Timeout for lightweight capability probes (`tool --version`).
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for setup actions (installs, dependency fetch, migration).
pub const SETUP_TIMEOUT: Duration = Duration::from_secs(300);

/// The command to execute: a direct argument vector, or a string handed
/// to the user's shell (needed for `curl ... | sh` install pipelines).
#[derive(Debug, Clone)]
pub enum CommandLine {
    Argv(Vec<String>),
    Shell(String),
}

impl CommandLine {
    /// Human-readable rendering, used for logging and test assertions.
    pub fn display(&self) -> String {
        match self {
            CommandLine::Argv(args) => args.join(" "),
            CommandLine::Shell(cmd) => cmd.clone(),
        }
    }
}

/// A single command invocation request.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub line: CommandLine,
    /// None means wait indefinitely (the dev server launch).
    pub timeout: Option<Duration>,
    /// Capture stdout instead of inheriting the parent's streams.
    pub capture: bool,
}

impl CommandSpec {
    /// A capability probe: `tool --version`, short timeout, captured.
    pub fn probe(tool: &str) -> Self {
        Self {
            line: CommandLine::Argv(vec![tool.to_string(), "--version".to_string()]),
            timeout: Some(PROBE_TIMEOUT),
            capture: true,
        }
    }

    /// A direct argv invocation with the setup timeout, foreground.
    pub fn argv<S: Into<String>>(args: Vec<S>) -> Self {
        Self {
            line: CommandLine::Argv(args.into_iter().map(Into::into).collect()),
            timeout: Some(SETUP_TIMEOUT),
            capture: false,
        }
    }

    /// A shell-interpreted command with the setup timeout, foreground.
    pub fn shell(cmd: &str) -> Self {
        Self {
            line: CommandLine::Shell(cmd.to_string()),
            timeout: Some(SETUP_TIMEOUT),
            capture: false,
        }
    }

    /// Capture stdout instead of inheriting.
    pub fn captured(mut self) -> Self {
        self.capture = true;
        self
    }

    /// Override the timeout (None disables it).
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Why a command did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The binary (or shell) could not be spawned at all.
    NotFound,
    /// The process ran but exited non-zero (None: killed by a signal).
    NonZero(Option<i32>),
    /// The process exceeded its timeout and was killed.
    TimedOut,
}

/// Normalized outcome of a command invocation.
#[derive(Debug, Clone, Default)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or never spawned).
    pub exit_code: Option<i32>,
    /// Captured standard output (empty unless capture was requested).
    pub stdout: String,
    /// The command exceeded its timeout.
    pub timed_out: bool,
    /// The command could not be spawned (binary not found).
    pub spawn_failed: bool,
}

impl CommandResult {
    /// A successful completion.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            ..Default::default()
        }
    }

    /// A completed process with the given exit code.
    pub fn exited(exit_code: Option<i32>, stdout: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            ..Default::default()
        }
    }

    /// A command that hit its timeout.
    pub fn timed_out() -> Self {
        Self {
            timed_out: true,
            ..Default::default()
        }
    }

    /// A command whose binary could not be found.
    pub fn not_found() -> Self {
        Self {
            spawn_failed: true,
            ..Default::default()
        }
    }

    /// Whether the command completed with exit code 0.
    pub fn success(&self) -> bool {
        !self.timed_out && !self.spawn_failed && self.exit_code == Some(0)
    }

    /// Classify the failure, or None on success.
    pub fn failure_reason(&self) -> Option<FailureReason> {
        if self.spawn_failed {
            Some(FailureReason::NotFound)
        } else if self.timed_out {
            Some(FailureReason::TimedOut)
        } else if self.exit_code == Some(0) {
            None
        } else {
            Some(FailureReason::NonZero(self.exit_code))
        }
    }
}

/// Executes external commands. Implementations must not panic or return
/// errors for ordinary process failure; everything is a [`CommandResult`].
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> CommandResult;

    /// Make `dir` visible to subsequent commands, ahead of the inherited
    /// search path. Used after install scripts that drop binaries into a
    /// directory not yet on PATH. Process-wide environment is never
    /// mutated: threads may be reading it concurrently.
    fn extend_path(&self, _dir: &std::path::Path) {}
}

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode and a non-interactive shell flag.
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_spec_is_short_and_captured() {
        let spec = CommandSpec::probe("node");
        assert_eq!(spec.timeout, Some(PROBE_TIMEOUT));
        assert!(spec.capture);
        assert_eq!(spec.line.display(), "node --version");
    }

    #[test]
    fn shell_spec_uses_setup_timeout() {
        let spec = CommandSpec::shell("pnpm install");
        assert_eq!(spec.timeout, Some(SETUP_TIMEOUT));
        assert!(!spec.capture);
    }

    #[test]
    fn with_timeout_none_disables() {
        let spec = CommandSpec::shell("pnpm dev").with_timeout(None);
        assert_eq!(spec.timeout, None);
    }

    #[test]
    fn captured_sets_capture() {
        let spec = CommandSpec::argv(vec!["node", "--version"]).captured();
        assert!(spec.capture);
    }

    #[test]
    fn success_requires_zero_exit() {
        assert!(CommandResult::ok("out").success());
        assert!(!CommandResult::exited(Some(1), "").success());
        assert!(!CommandResult::exited(None, "").success());
        assert!(!CommandResult::timed_out().success());
        assert!(!CommandResult::not_found().success());
    }

    #[test]
    fn failure_reason_classifies() {
        assert_eq!(CommandResult::ok("").failure_reason(), None);
        assert_eq!(
            CommandResult::not_found().failure_reason(),
            Some(FailureReason::NotFound)
        );
        assert_eq!(
            CommandResult::timed_out().failure_reason(),
            Some(FailureReason::TimedOut)
        );
        assert_eq!(
            CommandResult::exited(Some(2), "").failure_reason(),
            Some(FailureReason::NonZero(Some(2)))
        );
        assert_eq!(
            CommandResult::exited(None, "").failure_reason(),
            Some(FailureReason::NonZero(None))
        );
    }

    #[test]
    fn command_line_display() {
        let argv = CommandLine::Argv(vec!["mysql".into(), "--version".into()]);
        assert_eq!(argv.display(), "mysql --version");
        let shell = CommandLine::Shell("echo hi | cat".into());
        assert_eq!(shell.display(), "echo hi | cat");
    }

    #[test]
    fn is_ci_does_not_panic() {
        let _ = is_ci();
    }
}
