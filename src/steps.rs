//! Provisioning step definitions.
//!
//! The step list is static: it is declared once, executed strictly in
//! order, and never reordered or mutated at runtime.

/// An external tool or service the run depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    NodeJs,
    Pnpm,
    MySql,
}

impl Capability {
    /// The binary probed on PATH for this capability.
    pub fn tool(&self) -> &'static str {
        match self {
            Capability::NodeJs => "node",
            Capability::Pnpm => "pnpm",
            Capability::MySql => "mysql",
        }
    }

    /// Display name.
    pub fn label(&self) -> &'static str {
        match self {
            Capability::NodeJs => "Node.js",
            Capability::Pnpm => "pnpm",
            Capability::MySql => "MySQL",
        }
    }
}

/// Whether a failed step stops the run or only degrades it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    /// Failure aborts the entire run.
    Hard,
    /// Failure is recorded and the run continues.
    Soft,
}

/// One entry in the ordered provisioning sequence.
#[derive(Debug, Clone, Copy)]
pub struct ProvisioningStep {
    pub name: &'static str,
    pub capability: Capability,
    pub criticality: Criticality,
}

const CAPABILITY_STEPS: [ProvisioningStep; 3] = [
    ProvisioningStep {
        name: "nodejs",
        capability: Capability::NodeJs,
        criticality: Criticality::Hard,
    },
    ProvisioningStep {
        name: "pnpm",
        capability: Capability::Pnpm,
        criticality: Criticality::Hard,
    },
    ProvisioningStep {
        name: "mysql",
        capability: Capability::MySql,
        criticality: Criticality::Soft,
    },
];

/// Stages that follow the capability steps: configuration, dependency
/// install, migration, launch.
const TRAILING_STAGES: usize = 4;

/// Total number of user-visible steps. Derived from the step list so the
/// `[i/N]` counters stay correct if a capability is added or removed.
pub const TOTAL_STEPS: usize = CAPABILITY_STEPS.len() + TRAILING_STAGES;

/// The fixed, ordered capability step list.
pub fn provisioning_steps() -> &'static [ProvisioningStep] {
    &CAPABILITY_STEPS
}

/// Result of executing one provisioning step.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub success: bool,
    pub degraded: bool,
    pub detail: Option<String>,
}

impl StepOutcome {
    /// The capability is available.
    pub fn passed(detail: Option<String>) -> Self {
        Self {
            success: true,
            degraded: false,
            detail,
        }
    }

    /// The capability is still missing but the run continues.
    pub fn degraded(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            degraded: true,
            detail: Some(detail.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_order_is_fixed() {
        let steps = provisioning_steps();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].capability, Capability::NodeJs);
        assert_eq!(steps[1].capability, Capability::Pnpm);
        assert_eq!(steps[2].capability, Capability::MySql);
    }

    #[test]
    fn runtime_and_package_manager_are_hard_critical() {
        let steps = provisioning_steps();
        assert_eq!(steps[0].criticality, Criticality::Hard);
        assert_eq!(steps[1].criticality, Criticality::Hard);
    }

    #[test]
    fn database_is_soft_critical() {
        assert_eq!(provisioning_steps()[2].criticality, Criticality::Soft);
    }

    #[test]
    fn total_steps_tracks_the_step_list() {
        assert_eq!(TOTAL_STEPS, provisioning_steps().len() + 4);
    }

    #[test]
    fn capability_tools_and_labels() {
        assert_eq!(Capability::NodeJs.tool(), "node");
        assert_eq!(Capability::NodeJs.label(), "Node.js");
        assert_eq!(Capability::Pnpm.tool(), "pnpm");
        assert_eq!(Capability::MySql.label(), "MySQL");
    }

    #[test]
    fn outcome_constructors() {
        let ok = StepOutcome::passed(Some("v20".into()));
        assert!(ok.success);
        assert!(!ok.degraded);

        let degraded = StepOutcome::degraded("MySQL unavailable");
        assert!(!degraded.success);
        assert!(degraded.degraded);
        assert_eq!(degraded.detail.as_deref(), Some("MySQL unavailable"));
    }
}
