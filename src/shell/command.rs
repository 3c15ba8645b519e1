//! Process-spawning command runner.

use std::cell::RefCell;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::host::parse_system_path;

use super::{CommandLine, CommandResult, CommandRunner, CommandSpec};

/// How often to poll a running child while waiting for exit or timeout.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The real command runner: spawns processes, waits with a bounded
/// timeout, and normalizes every failure into a [`CommandResult`].
#[derive(Debug, Default)]
pub struct SystemRunner {
    extra_paths: RefCell<Vec<PathBuf>>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// PATH value for spawned children: extensions first, then the
    /// inherited search path. None when nothing was extended.
    fn child_path(&self) -> Option<std::ffi::OsString> {
        let extras = self.extra_paths.borrow();
        if extras.is_empty() {
            return None;
        }
        let mut entries = extras.clone();
        entries.extend(parse_system_path());
        std::env::join_paths(entries).ok()
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> CommandResult {
        let mut cmd = build_command(&spec.line);
        if let Some(path) = self.child_path() {
            cmd.env("PATH", path);
        }

        if spec.capture {
            cmd.stdout(Stdio::piped());
            cmd.stderr(Stdio::null());
        } else {
            cmd.stdout(Stdio::inherit());
            cmd.stderr(Stdio::inherit());
        }
        cmd.stdin(Stdio::inherit());

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::debug!(command = %spec.line.display(), error = %e, "spawn failed");
                return CommandResult::not_found();
            }
        };

        let start = Instant::now();
        let result = wait_with_timeout(child, spec.timeout);
        tracing::debug!(
            command = %spec.line.display(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            exit_code = ?result.exit_code,
            timed_out = result.timed_out,
            "command finished"
        );
        result
    }

    fn extend_path(&self, dir: &Path) {
        if !dir.is_dir() {
            return;
        }
        tracing::debug!(path = %dir.display(), "extending child PATH");
        self.extra_paths.borrow_mut().push(dir.to_path_buf());
    }
}

fn build_command(line: &CommandLine) -> Command {
    match line {
        CommandLine::Argv(args) => {
            let mut cmd = Command::new(&args[0]);
            cmd.args(&args[1..]);
            cmd
        }
        CommandLine::Shell(script) => {
            let shell = detect_shell();
            let mut cmd = Command::new(&shell);
            cmd.arg(shell_flag());
            cmd.arg(script);
            cmd
        }
    }
}

/// Wait for the child to exit, killing it if the timeout elapses first.
fn wait_with_timeout(mut child: Child, timeout: Option<Duration>) -> CommandResult {
    // Drain stdout on a separate thread so a chatty child can't fill the
    // pipe and deadlock against our wait loop.
    let stdout_handle = child.stdout.take().map(|mut stream| {
        thread::spawn(move || {
            let mut buf = String::new();
            let _ = stream.read_to_string(&mut buf);
            buf
        })
    });

    let deadline = timeout.map(|t| Instant::now() + t);

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {}
            Err(_) => {
                let stdout = join_stdout(stdout_handle);
                return CommandResult::exited(None, stdout);
            }
        }

        if deadline.is_some_and(|d| Instant::now() >= d) {
            let _ = child.kill();
            let _ = child.wait();
            return CommandResult::timed_out();
        }

        thread::sleep(POLL_INTERVAL);
    };

    let stdout = join_stdout(stdout_handle);

    if status.success() {
        CommandResult::ok(stdout)
    } else {
        CommandResult::exited(status.code(), stdout)
    }
}

fn join_stdout(handle: Option<thread::JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

/// Detect the current shell.
fn detect_shell() -> String {
    if cfg!(target_os = "windows") {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
    }
}

/// Get the flag to pass commands to the shell.
///
/// Uses `-lic` (interactive login shell) on Unix so that the user's full
/// shell environment is available: version managers like nvm and mise are
/// typically activated in `.zshrc`/`.bashrc`, and without them `node` or
/// `pnpm` installed through a manager would be invisible to the run.
///
/// In CI, uses `-lc` (login, non-interactive) to avoid `bash: cannot set
/// terminal process group` errors from `-i` without a TTY.
fn shell_flag() -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else if super::is_ci() {
        "-lc"
    } else {
        "-lic"
    }
}
