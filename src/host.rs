//! Host platform detection.
//!
//! Everything the remediation decision table needs to know about the
//! machine is computed once at startup into an immutable [`HostProfile`]
//! and passed around explicitly. Nothing else in the crate reads
//! `std::env::consts::OS` directly.

use std::path::{Path, PathBuf};

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Linux,
    MacOs,
    Windows,
    Unknown,
}

impl OsFamily {
    /// Detect the OS family of the running process.
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "linux" => OsFamily::Linux,
            "macos" => OsFamily::MacOs,
            "windows" => OsFamily::Windows,
            _ => OsFamily::Unknown,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            OsFamily::Linux => "Linux",
            OsFamily::MacOs => "macOS",
            OsFamily::Windows => "Windows",
            OsFamily::Unknown => "unknown OS",
        }
    }
}

/// OS-level package managers the remediation table can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Apt,
    Dnf,
    Brew,
    Npm,
}

impl PackageManager {
    /// The binary looked up on PATH to detect this manager.
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::Apt => "apt-get",
            PackageManager::Dnf => "dnf",
            PackageManager::Brew => "brew",
            PackageManager::Npm => "npm",
        }
    }
}

const ALL_MANAGERS: &[PackageManager] = &[
    PackageManager::Apt,
    PackageManager::Dnf,
    PackageManager::Brew,
    PackageManager::Npm,
];

/// Immutable snapshot of the host: OS family, which package managers are
/// on PATH, and whether we are already running with elevated privileges.
#[derive(Debug, Clone)]
pub struct HostProfile {
    pub os: OsFamily,
    managers: Vec<PackageManager>,
    pub elevated: bool,
}

impl HostProfile {
    /// Detect the current host. Called exactly once, at startup.
    pub fn detect() -> Self {
        let path_entries = parse_system_path();
        let managers = ALL_MANAGERS
            .iter()
            .copied()
            .filter(|m| resolve_tool_path(m.binary(), &path_entries).is_some())
            .collect();

        let profile = Self {
            os: OsFamily::detect(),
            managers,
            elevated: is_elevated(),
        };
        tracing::debug!(?profile, "detected host profile");
        profile
    }

    /// Construct a profile from known parts. Used by tests to exercise
    /// decision-table cells without touching the real system.
    pub fn from_parts(os: OsFamily, managers: Vec<PackageManager>, elevated: bool) -> Self {
        Self {
            os,
            managers,
            elevated,
        }
    }

    /// Whether a given package manager is available.
    pub fn has(&self, manager: PackageManager) -> bool {
        self.managers.contains(&manager)
    }

    /// The native Linux package manager to prefer, if any (apt before dnf,
    /// matching Debian-family prevalence).
    pub fn native_linux_manager(&self) -> Option<PackageManager> {
        if self.has(PackageManager::Apt) {
            Some(PackageManager::Apt)
        } else if self.has(PackageManager::Dnf) {
            Some(PackageManager::Dnf)
        } else {
            None
        }
    }
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. Does NOT shell
/// out to `which` — its behavior varies across systems and it is sometimes
/// a builtin with inconsistent error handling.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
        // Windows resolves through PATHEXT; .exe covers the tools we probe.
        if cfg!(windows) {
            let exe = dir.join(format!("{tool}.exe"));
            if exe.is_file() {
                return Some(exe);
            }
        }
    }
    None
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Check if running as root/admin.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(not(unix))]
    {
        false
    }
}
