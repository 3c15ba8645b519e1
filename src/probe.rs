//! Capability probes.
//!
//! A probe is a read-only check: invoke the tool with `--version` under a
//! short timeout and treat any failure as "capability absent". Probes are
//! idempotent by construction, which is what allows the orchestrator's
//! re-probe-after-remediation pattern.

use std::sync::OnceLock;

use regex::Regex;

use crate::host::{HostProfile, OsFamily};
use crate::shell::{CommandRunner, CommandSpec};
use crate::steps::Capability;

/// What a probe learned about a capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeFinding {
    /// The capability is usable; version is shown when one was reported.
    Present { version: Option<String> },
    Absent,
}

impl ProbeFinding {
    pub fn is_present(&self) -> bool {
        matches!(self, ProbeFinding::Present { .. })
    }
}

/// Probe a single tool by running `tool --version`.
pub fn probe_tool(runner: &dyn CommandRunner, tool: &str) -> ProbeFinding {
    let result = runner.run(&CommandSpec::probe(tool));
    if result.success() {
        ProbeFinding::Present {
            version: extract_version(&result.stdout),
        }
    } else {
        tracing::debug!(tool, reason = ?result.failure_reason(), "probe failed");
        ProbeFinding::Absent
    }
}

/// Probe a capability, applying platform-specific fallbacks.
///
/// MySQL on Windows is commonly installed as a service without the client
/// on PATH, so a failed binary probe falls back to `sc query MySQL`.
pub fn probe_capability(
    runner: &dyn CommandRunner,
    capability: Capability,
    host: &HostProfile,
) -> ProbeFinding {
    let finding = probe_tool(runner, capability.tool());
    if finding.is_present() {
        return finding;
    }

    if capability == Capability::MySql && host.os == OsFamily::Windows {
        let service = runner.run(&CommandSpec::argv(vec!["sc", "query", "MySQL"]).captured());
        if service.success() && service.stdout.contains("RUNNING") {
            return ProbeFinding::Present { version: None };
        }
    }

    ProbeFinding::Absent
}

/// Pull a dotted version number out of `--version` output.
///
/// Handles the common shapes: `v20.11.0`, `8.15.4`, and banners like
/// `mysql  Ver 8.0.36 for Linux on x86_64`.
pub fn extract_version(output: &str) -> Option<String> {
    static VERSION_RE: OnceLock<Regex> = OnceLock::new();
    let re = VERSION_RE.get_or_init(|| {
        Regex::new(r"v?(\d+\.\d+(?:\.\d+)?)").expect("version regex is valid")
    });
    re.captures(output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostProfile;
    use crate::shell::{CommandResult, ScriptedRunner};

    fn linux_host() -> HostProfile {
        HostProfile::from_parts(OsFamily::Linux, vec![], false)
    }

    #[test]
    fn extract_version_handles_common_shapes() {
        assert_eq!(extract_version("v20.11.0\n"), Some("20.11.0".to_string()));
        assert_eq!(extract_version("8.15.4"), Some("8.15.4".to_string()));
        assert_eq!(
            extract_version("mysql  Ver 8.0.36 for Linux on x86_64"),
            Some("8.0.36".to_string())
        );
        assert_eq!(extract_version("no digits here"), None);
    }

    #[test]
    fn probe_present_with_version() {
        let runner =
            ScriptedRunner::new().respond("node --version", CommandResult::ok("v20.11.0\n"));
        let finding = probe_tool(&runner, "node");
        assert_eq!(
            finding,
            ProbeFinding::Present {
                version: Some("20.11.0".to_string())
            }
        );
    }

    #[test]
    fn probe_absent_on_not_found() {
        let runner = ScriptedRunner::new().respond("node --version", CommandResult::not_found());
        assert_eq!(probe_tool(&runner, "node"), ProbeFinding::Absent);
    }

    #[test]
    fn probe_absent_on_nonzero_exit() {
        let runner =
            ScriptedRunner::new().respond("node --version", CommandResult::exited(Some(1), ""));
        assert_eq!(probe_tool(&runner, "node"), ProbeFinding::Absent);
    }

    #[test]
    fn probe_absent_on_timeout() {
        let runner = ScriptedRunner::new().respond("node --version", CommandResult::timed_out());
        assert_eq!(probe_tool(&runner, "node"), ProbeFinding::Absent);
    }

    #[test]
    fn probe_is_idempotent() {
        let runner =
            ScriptedRunner::new().respond("pnpm --version", CommandResult::exited(Some(127), ""));
        for _ in 0..5 {
            assert_eq!(probe_tool(&runner, "pnpm"), ProbeFinding::Absent);
        }
        assert_eq!(runner.count("pnpm --version"), 5);
    }

    #[test]
    fn mysql_windows_falls_back_to_service_query() {
        let host = HostProfile::from_parts(OsFamily::Windows, vec![], false);
        let runner = ScriptedRunner::new()
            .respond("mysql --version", CommandResult::not_found())
            .respond("sc query MySQL", CommandResult::ok("STATE : 4 RUNNING"));

        let finding = probe_capability(&runner, Capability::MySql, &host);
        assert!(finding.is_present());
    }

    #[test]
    fn mysql_windows_service_stopped_is_absent() {
        let host = HostProfile::from_parts(OsFamily::Windows, vec![], false);
        let runner = ScriptedRunner::new()
            .respond("mysql --version", CommandResult::not_found())
            .respond("sc query MySQL", CommandResult::ok("STATE : 1 STOPPED"));

        let finding = probe_capability(&runner, Capability::MySql, &host);
        assert_eq!(finding, ProbeFinding::Absent);
    }

    #[test]
    fn mysql_service_query_not_used_outside_windows() {
        let runner = ScriptedRunner::new()
            .respond("mysql --version", CommandResult::not_found())
            .respond("sc query MySQL", CommandResult::ok("RUNNING"));

        let finding = probe_capability(&runner, Capability::MySql, &linux_host());
        assert_eq!(finding, ProbeFinding::Absent);
        assert!(!runner.ran("sc query"));
    }
}
