//! Platform remediation strategy selection.
//!
//! A decision table keyed by (capability, OS family, available package
//! manager) maps each missing capability to a [`Remediation`]. There is
//! no unsafe default: when no rule matches, the result is a `Manual`
//! plan with instructions, never a guessed install command.

use std::path::PathBuf;

use crate::host::{HostProfile, OsFamily, PackageManager};
use crate::steps::Capability;

/// How a missing capability can be remediated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemediationPlan {
    /// Nothing can be run automatically. When `blocking` is true the
    /// orchestrator pauses until the user confirms they finished the
    /// manual steps, then re-probes.
    Manual { blocking: bool },

    /// Install through an OS or language package manager.
    PackageInstall {
        manager: PackageManager,
        commands: Vec<String>,
    },

    /// Install by piping a vendor script through the shell. An optional
    /// PATH addition makes the freshly installed binary visible to the
    /// re-probe.
    ScriptInstall {
        commands: Vec<String>,
        path_addition: Option<PathBuf>,
    },
}

/// A selected remediation: the plan plus how to present it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remediation {
    pub plan: RemediationPlan,
    /// Instruction lines shown to the user before anything runs.
    pub instructions: Vec<String>,
    /// Ask for consent before executing the plan's commands.
    pub needs_consent: bool,
}

/// Select the remediation for a missing capability on this host.
pub fn plan_for(capability: Capability, host: &HostProfile) -> Remediation {
    match capability {
        Capability::NodeJs => nodejs_plan(host),
        Capability::Pnpm => pnpm_plan(host),
        Capability::MySql => mysql_plan(host),
    }
}

fn nodejs_plan(host: &HostProfile) -> Remediation {
    match host.os {
        OsFamily::Windows => Remediation {
            plan: RemediationPlan::Manual { blocking: true },
            instructions: vec![
                "Node.js must be installed manually on Windows:".to_string(),
                "  1. Visit https://nodejs.org".to_string(),
                "  2. Download and install the LTS release".to_string(),
            ],
            needs_consent: false,
        },
        OsFamily::MacOs => {
            if host.has(PackageManager::Brew) {
                Remediation {
                    plan: RemediationPlan::PackageInstall {
                        manager: PackageManager::Brew,
                        commands: vec!["brew install node".to_string()],
                    },
                    instructions: vec!["Installing Node.js with Homebrew...".to_string()],
                    needs_consent: false,
                }
            } else {
                // Bootstrap Homebrew first, then install Node through it.
                Remediation {
                    plan: RemediationPlan::ScriptInstall {
                        commands: vec![
                            r#"/bin/bash -c "$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)""#
                                .to_string(),
                            "brew install node".to_string(),
                        ],
                        path_addition: None,
                    },
                    instructions: vec![
                        "Homebrew is not installed; installing it first...".to_string(),
                    ],
                    needs_consent: false,
                }
            }
        }
        OsFamily::Linux => match host.native_linux_manager() {
            Some(PackageManager::Apt) => Remediation {
                plan: RemediationPlan::ScriptInstall {
                    commands: vec![
                        sudo(
                            host,
                            "curl -fsSL https://deb.nodesource.com/setup_lts.x | sudo -E bash -",
                        ),
                        sudo(host, "sudo apt-get install -y nodejs"),
                    ],
                    path_addition: None,
                },
                instructions: vec!["Adding the NodeSource repository...".to_string()],
                needs_consent: false,
            },
            Some(PackageManager::Dnf) => Remediation {
                plan: RemediationPlan::ScriptInstall {
                    commands: vec![
                        sudo(
                            host,
                            "curl -fsSL https://rpm.nodesource.com/setup_lts.x | sudo bash -",
                        ),
                        sudo(host, "sudo dnf install -y nodejs"),
                    ],
                    path_addition: None,
                },
                instructions: vec!["Adding the NodeSource repository...".to_string()],
                needs_consent: false,
            },
            _ => Remediation {
                plan: RemediationPlan::Manual { blocking: false },
                instructions: vec![
                    "This Linux distribution has no supported automatic install.".to_string(),
                    "Install Node.js manually from https://nodejs.org".to_string(),
                ],
                needs_consent: false,
            },
        },
        OsFamily::Unknown => Remediation {
            plan: RemediationPlan::Manual { blocking: false },
            instructions: vec![
                "Unrecognized operating system.".to_string(),
                "Install Node.js manually from https://nodejs.org".to_string(),
            ],
            needs_consent: false,
        },
    }
}

fn pnpm_plan(host: &HostProfile) -> Remediation {
    if host.os == OsFamily::Windows {
        return Remediation {
            plan: RemediationPlan::PackageInstall {
                manager: PackageManager::Npm,
                commands: vec!["npm install -g pnpm".to_string()],
            },
            instructions: vec!["Installing pnpm with npm...".to_string()],
            needs_consent: false,
        };
    }

    // The standalone script installs into ~/.local/share/pnpm, which is
    // not on PATH until the user's next shell; extend PATH so the
    // re-probe can see it.
    let path_addition = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(".local/share/pnpm"));

    Remediation {
        plan: RemediationPlan::ScriptInstall {
            commands: vec!["curl -fsSL https://get.pnpm.io/install.sh | sh -".to_string()],
            path_addition,
        },
        instructions: vec!["Installing pnpm with the standalone script...".to_string()],
        needs_consent: false,
    }
}

fn mysql_plan(host: &HostProfile) -> Remediation {
    let (plan, mut instructions) = match host.os {
        OsFamily::Windows => (
            RemediationPlan::Manual { blocking: false },
            vec![
                "  1. Visit https://dev.mysql.com/downloads/installer/".to_string(),
                "  2. Download and run the MySQL Installer".to_string(),
                "  3. Install MySQL Server".to_string(),
            ],
        ),
        OsFamily::MacOs => (
            RemediationPlan::PackageInstall {
                manager: PackageManager::Brew,
                commands: vec![
                    "brew install mysql".to_string(),
                    "brew services start mysql".to_string(),
                ],
            },
            vec![
                "With Homebrew:".to_string(),
                "  brew install mysql".to_string(),
                "  brew services start mysql".to_string(),
            ],
        ),
        OsFamily::Linux => match host.native_linux_manager() {
            Some(PackageManager::Apt) => (
                RemediationPlan::PackageInstall {
                    manager: PackageManager::Apt,
                    commands: vec![
                        sudo(host, "sudo apt-get update"),
                        sudo(host, "sudo apt-get install -y mysql-server"),
                    ],
                },
                vec![
                    "On Ubuntu/Debian:".to_string(),
                    "  sudo apt-get update".to_string(),
                    "  sudo apt-get install mysql-server".to_string(),
                ],
            ),
            Some(PackageManager::Dnf) => (
                RemediationPlan::PackageInstall {
                    manager: PackageManager::Dnf,
                    commands: vec![
                        sudo(host, "sudo dnf install -y mysql-server"),
                        sudo(host, "sudo systemctl start mysqld"),
                    ],
                },
                vec![
                    "On Fedora/RHEL:".to_string(),
                    "  sudo dnf install mysql-server".to_string(),
                    "  sudo systemctl start mysqld".to_string(),
                ],
            ),
            _ => (
                RemediationPlan::Manual { blocking: false },
                vec!["No supported package manager found; install MySQL manually.".to_string()],
            ),
        },
        OsFamily::Unknown => (
            RemediationPlan::Manual { blocking: false },
            vec!["Install MySQL manually for your platform.".to_string()],
        ),
    };

    instructions.insert(0, "MySQL install options:".to_string());
    Remediation {
        plan,
        instructions,
        // Installing a database server is more invasive than a runtime;
        // never do it without an explicit yes.
        needs_consent: true,
    }
}

/// Strip the `sudo ` prefix when already running elevated.
fn sudo(host: &HostProfile, command: &str) -> String {
    if host.elevated {
        command
            .replace("sudo -E bash", "bash")
            .replace("sudo bash", "bash")
            .replace("sudo ", "")
    } else {
        command.to_string()
    }
}
