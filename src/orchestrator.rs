//! The provisioning state machine.
//!
//! For each capability step the orchestrator runs probe → remediate →
//! re-probe → decide. A hard-critical step that is still missing after
//! remediation aborts the whole run; a soft-critical one degrades it and
//! execution continues. After the capability steps come the two
//! single-shot stages (dependency install, schema migration) and the
//! final hand-off to the launch controller.
//!
//! Steps execute strictly in declared order. Nothing is retried
//! automatically anywhere: the only retry mechanism is the user running
//! the tool again.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config;
use crate::error::{PitchError, Result};
use crate::host::HostProfile;
use crate::launch;
use crate::probe::{self, ProbeFinding};
use crate::remediation::{self, RemediationPlan};
use crate::shell::{CommandRunner, CommandSpec};
use crate::steps::{provisioning_steps, Criticality, ProvisioningStep, StepOutcome, TOTAL_STEPS};
use crate::ui::UserInterface;

/// Final report of a completed (possibly degraded) run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Labels of capabilities and stages that were skipped or missing.
    pub degraded: Vec<String>,
}

impl RunReport {
    /// Whether setup completed with everything in place.
    pub fn is_clean(&self) -> bool {
        self.degraded.is_empty()
    }
}

/// Runs the full provisioning sequence.
pub struct Orchestrator<'a> {
    host: HostProfile,
    runner: &'a dyn CommandRunner,
    project_root: PathBuf,
    interrupt: Arc<AtomicBool>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        host: HostProfile,
        runner: &'a dyn CommandRunner,
        project_root: PathBuf,
        interrupt: Arc<AtomicBool>,
    ) -> Self {
        Self {
            host,
            runner,
            project_root,
            interrupt,
        }
    }

    /// Run the whole sequence: capability steps, configuration,
    /// dependency install, migration, and finally the dev server.
    ///
    /// Returns only after the dev server exits (or an earlier stage
    /// failed hard).
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<RunReport> {
        ui.show_header("Development environment setup");
        ui.message(&format!("Operating system: {}", self.host.os.name()));

        let mut degraded: Vec<String> = Vec::new();

        let steps = provisioning_steps();
        for (i, step) in steps.iter().enumerate() {
            self.check_interrupted()?;
            ui.show_step(
                i + 1,
                TOTAL_STEPS,
                &format!("Checking {}...", step.capability.label()),
            );
            let outcome = self.run_step(step, ui)?;
            if outcome.degraded {
                degraded.push(step.capability.label().to_string());
            }
        }

        self.materialize_config(ui)?;
        self.install_dependencies(ui)?;
        if !self.run_migration(ui)? {
            degraded.push("schema migration".to_string());
        }

        self.check_interrupted()?;
        ui.show_step(TOTAL_STEPS, TOTAL_STEPS, "Starting development server...");
        for label in &degraded {
            ui.warning(&format!("Setup is degraded: {} was skipped", label));
        }
        ui.show_header("Server starting — http://localhost:3000 (Ctrl+C to stop)");
        launch::launch_dev_server(self.runner, &self.interrupt)?;

        Ok(RunReport { degraded })
    }

    /// Execute one capability step: probe, remediate if absent, re-probe,
    /// then advance, degrade, or abort.
    fn run_step(&self, step: &ProvisioningStep, ui: &mut dyn UserInterface) -> Result<StepOutcome> {
        let capability = step.capability;
        let label = capability.label();

        tracing::debug!(step = step.name, "probing");
        if let ProbeFinding::Present { version } =
            probe::probe_capability(self.runner, capability, &self.host)
        {
            match &version {
                Some(v) => ui.success(&format!("{} is already installed: {}", label, v)),
                None => ui.success(&format!("{} is already installed", label)),
            }
            return Ok(StepOutcome::passed(version));
        }

        ui.warning(&format!("{} is not installed", label));

        let remediation = remediation::plan_for(capability, &self.host);
        for line in &remediation.instructions {
            ui.message(line);
        }

        if remediation.needs_consent {
            let consented = ui.confirm(
                &format!("install_{}", step.name),
                &format!("Install {} now?", label),
                false,
            )?;
            if !consented {
                return self.conclude_missing(step, ui, "install declined");
            }
        }

        tracing::debug!(step = step.name, plan = ?remediation.plan, "remediating");
        let remediation_ok = match &remediation.plan {
            RemediationPlan::Manual { blocking } => {
                if *blocking && ui.is_interactive() {
                    // The one legitimate suspension point: wait for the
                    // user to finish the manual install, then re-probe.
                    ui.confirm(
                        &format!("manual_{}", step.name),
                        &format!("Finished installing {} manually?", label),
                        true,
                    )?
                } else {
                    false
                }
            }
            RemediationPlan::PackageInstall { commands, .. } => {
                self.run_remediation_commands(commands, ui)?
            }
            RemediationPlan::ScriptInstall {
                commands,
                path_addition,
            } => {
                let ok = self.run_remediation_commands(commands, ui)?;
                if let Some(dir) = path_addition {
                    self.runner.extend_path(dir);
                }
                ok
            }
        };

        // Verify: only the re-probe decides, never the install's own
        // exit status.
        tracing::debug!(step = step.name, remediation_ok, "re-probing");
        if probe::probe_capability(self.runner, capability, &self.host).is_present() {
            ui.success(&format!("{} installed", label));
            return Ok(StepOutcome::passed(None));
        }

        let why = if remediation_ok {
            "still missing after install"
        } else {
            "install did not complete"
        };
        self.conclude_missing(step, ui, why)
    }

    /// Run a remediation command sequence, stopping at the first failure.
    /// Single-shot: a failed command is reported, never retried. A failure
    /// caused by Ctrl+C (the child shares our process group, so the signal
    /// kills it too) is a shutdown request, not an install failure.
    fn run_remediation_commands(
        &self,
        commands: &[String],
        ui: &mut dyn UserInterface,
    ) -> Result<bool> {
        for command in commands {
            let result = self.runner.run(&CommandSpec::shell(command));
            if !result.success() {
                self.check_interrupted()?;
                if result.timed_out {
                    ui.error(&format!("Command timed out: {}", command));
                } else {
                    ui.error(&format!("Command failed: {}", command));
                }
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// A capability is conclusively missing: degrade or abort depending
    /// on the step's criticality.
    fn conclude_missing(
        &self,
        step: &ProvisioningStep,
        ui: &mut dyn UserInterface,
        why: &str,
    ) -> Result<StepOutcome> {
        let label = step.capability.label();
        match step.criticality {
            Criticality::Hard => {
                ui.error(&format!("{} is required; setup cannot continue", label));
                Err(PitchError::ToolAbsent {
                    tool: label.to_string(),
                    message: why.to_string(),
                })
            }
            Criticality::Soft => {
                ui.warning(&format!("Continuing without {} ({})", label, why));
                Ok(StepOutcome::degraded(format!("{}: {}", label, why)))
            }
        }
    }

    /// Step 4: ensure the `.env` artifact exists. Later stages depend on
    /// it, so a declined creation is a hard failure.
    fn materialize_config(&self, ui: &mut dyn UserInterface) -> Result<()> {
        self.check_interrupted()?;
        let stage = provisioning_steps().len() + 1;
        ui.show_step(stage, TOTAL_STEPS, "Checking environment configuration...");

        let env_path = self.project_root.join(config::ENV_FILE);
        if !config::ensure(&env_path, ui)? {
            ui.error("A .env file is required to continue");
            return Err(PitchError::ConfigMissing { path: env_path });
        }
        ui.success("Environment configuration ready");
        Ok(())
    }

    /// Step 5: install project dependencies. Batch operation over the
    /// whole project, single attempt, hard-fail on error.
    fn install_dependencies(&self, ui: &mut dyn UserInterface) -> Result<()> {
        self.check_interrupted()?;
        let stage = provisioning_steps().len() + 2;
        ui.show_step(stage, TOTAL_STEPS, "Installing project dependencies...");
        ui.message("(this can take a few minutes)");

        let spec = if ui.output_mode().shows_command_output() {
            CommandSpec::shell("pnpm install")
        } else {
            CommandSpec::shell("pnpm install").captured()
        };

        let mut spinner = ui.start_spinner("pnpm install");
        let result = self.runner.run(&spec);
        if result.success() {
            spinner.finish_success("Dependencies installed");
            Ok(())
        } else if self.interrupted() {
            // Ctrl+C killed the install along with us; clean shutdown.
            spinner.finish_error("Interrupted");
            Err(PitchError::Interrupted)
        } else {
            spinner.finish_error("Dependency installation failed");
            Err(PitchError::RemediationFailed {
                tool: "pnpm install".to_string(),
                message: match result.failure_reason() {
                    Some(reason) => format!("{:?}", reason),
                    None => "unknown failure".to_string(),
                },
            })
        }
    }

    /// Step 6: apply the schema migration. Single attempt; on failure the
    /// user may choose to continue without it (the run is then degraded)
    /// or stop.
    ///
    /// Returns whether the migration actually ran.
    fn run_migration(&self, ui: &mut dyn UserInterface) -> Result<bool> {
        self.check_interrupted()?;
        let stage = provisioning_steps().len() + 3;
        ui.show_step(stage, TOTAL_STEPS, "Running database migration...");

        let result = self.runner.run(&CommandSpec::shell("pnpm db:push"));
        if result.success() {
            ui.success("Database migration complete");
            return Ok(true);
        }

        // A migration killed by Ctrl+C must not fall through to the
        // continue-anyway prompt.
        self.check_interrupted()?;

        ui.error("Database migration failed");
        ui.warning("Check that DATABASE_URL in .env is correct");

        let proceed = ui.confirm(
            "migration_continue",
            "Continue without the migration?",
            false,
        )?;
        if proceed {
            ui.warning("Continuing without the schema migration");
            Ok(false)
        } else {
            Err(PitchError::UserDeclined {
                action: "a successful schema migration".to_string(),
            })
        }
    }

    fn interrupted(&self) -> bool {
        self.interrupt.load(Ordering::SeqCst)
    }

    fn check_interrupted(&self) -> Result<()> {
        if self.interrupted() {
            Err(PitchError::Interrupted)
        } else {
            Ok(())
        }
    }
}
