//! Uninstall workflow
//!
//! Strict reverse of install: stop, disable, remove unit, reload, then
//! the binary, then the gated purges. While the unit file exists, every
//! service-state query must get a verifiable answer before the file is
//! touched; an unreachable systemd aborts the run right there.

pub mod confirmation;

use confirmation::{confirm_account_removal, confirm_config_removal};

use crate::account;
use crate::cli::UninstallArgs;
use crate::error::{Result, SetupError};
use crate::exec::Runner;
use crate::layout::{Layout, SERVICE_NAME, SERVICE_USER};
use crate::probe::{InstallState, ProbeState};
use crate::stage;
use crate::supervisor::Systemd;
use crate::ui;

/// Plan line shown at the point where a real run would abort.
const ABORT_LINE: &str = "Abort: systemd unreachable, service state unverifiable";

pub struct UninstallOperation {
    layout: Layout,
    runner: Runner,
}

impl UninstallOperation {
    pub fn new(layout: Layout, runner: Runner) -> Self {
        Self { layout, runner }
    }

    pub fn execute(&self, args: &UninstallArgs) -> Result<()> {
        if args.dry_run {
            return self.plan(args);
        }

        println!("Uninstalling {SERVICE_NAME}");
        println!();

        self.teardown_service()?;
        self.remove_binary()?;
        self.purge_config(args)?;
        self.purge_account(args)?;

        ui::success(&format!("{SERVICE_NAME} uninstalled"));
        Ok(())
    }

    fn teardown_service(&self) -> Result<()> {
        let systemd = Systemd::new(&self.runner, Layout::unit_name());
        let unit_path = self.layout.unit_path();

        if unit_path.is_file() {
            // Strict path: stop and disable must verifiably precede the
            // unit file going away
            if systemd.stop_if_active()? {
                ui::detail("Stopped service");
            } else {
                ui::kept("Service was not active");
            }
            if systemd.disable_if_enabled()? {
                ui::detail("Disabled service");
            } else {
                ui::kept("Service was not enabled");
            }
            systemd.remove_unit_file(&unit_path)?;
            systemd.daemon_reload()?;
            ui::detail(&format!(
                "Removed {} and reloaded systemd",
                unit_path.display()
            ));
        } else {
            // No unit file left to guard. A unit can still be loaded and
            // running after somebody deleted the file by hand; stop it
            // when systemd can answer, otherwise there is nothing to do.
            match systemd.stop_if_active() {
                Ok(true) => {
                    ui::detail("Stopped service left running without a unit file");
                    if let Err(e) = systemd.disable_if_enabled() {
                        ui::warn(&format!("Could not disable the leftover unit: {e}"));
                    }
                }
                Ok(false) => ui::kept("No unit registered"),
                Err(SetupError::SupervisorUnavailable { .. }) => {
                    ui::kept("No unit registered");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn remove_binary(&self) -> Result<()> {
        let binary = self.layout.installed_binary();
        if stage::remove_file_if_present(&binary)? {
            ui::detail(&format!("Removed {}", binary.display()));
        } else {
            ui::kept(&format!("No binary at {}", binary.display()));
        }
        Ok(())
    }

    fn purge_config(&self, args: &UninstallArgs) -> Result<()> {
        let config_dir = self.layout.config_dir();
        if !config_dir.exists() {
            ui::kept(&format!("No config directory at {}", config_dir.display()));
            return Ok(());
        }
        if self.config_purge_approved(args)? {
            stage::remove_dir_if_present(&config_dir)?;
            ui::detail(&format!("Removed {}", config_dir.display()));
        } else {
            ui::kept(&format!("Config directory kept at {}", config_dir.display()));
        }
        Ok(())
    }

    fn purge_account(&self, args: &UninstallArgs) -> Result<()> {
        if !account::user_exists(&self.runner, SERVICE_USER)? {
            ui::kept(&format!("No '{SERVICE_USER}' account on this host"));
            return Ok(());
        }
        if self.account_purge_approved(args)? {
            account::remove_service_account(&self.runner, SERVICE_USER)?;
            ui::detail(&format!("Removed account '{SERVICE_USER}'"));
        } else {
            ui::kept(&format!("Account '{SERVICE_USER}' kept"));
        }
        Ok(())
    }

    /// Declining is a valid terminal choice, never an error. `--yes`
    /// takes the default, which keeps the data.
    fn config_purge_approved(&self, args: &UninstallArgs) -> Result<bool> {
        if args.purge_config {
            return Ok(true);
        }
        if args.yes {
            return Ok(false);
        }
        confirm_config_removal(&self.layout)
    }

    fn account_purge_approved(&self, args: &UninstallArgs) -> Result<bool> {
        if args.purge_user {
            return Ok(true);
        }
        if args.yes {
            return Ok(false);
        }
        confirm_account_removal()
    }

    /// Print what uninstall would do, from a fresh probe. Touches
    /// nothing, so it runs without root.
    fn plan(&self, args: &UninstallArgs) -> Result<()> {
        let state = InstallState::discover(&self.runner, &self.layout);

        ui::would(&format!("Uninstall plan for {SERVICE_NAME}"));
        for line in self.plan_lines(&state, args) {
            ui::would(&line);
        }

        println!();
        ui::would("No changes made");
        Ok(())
    }

    /// Plan lines in execution order. A real run refuses to touch the
    /// unit file while a service-state answer is unverifiable, so the
    /// plan ends at the same point.
    fn plan_lines(&self, state: &InstallState, args: &UninstallArgs) -> Vec<String> {
        let mut lines = Vec::new();

        if state.unit_present {
            match state.service_active {
                ProbeState::Yes => lines.push("Stop the running service".to_string()),
                ProbeState::No => lines.push("Skip stop; service not active".to_string()),
                ProbeState::Unknown => {
                    lines.push(ABORT_LINE.to_string());
                    return lines;
                }
            }
            match state.service_enabled {
                ProbeState::Yes => lines.push("Disable start at boot".to_string()),
                ProbeState::No => lines.push("Skip disable; service not enabled".to_string()),
                ProbeState::Unknown => {
                    lines.push(ABORT_LINE.to_string());
                    return lines;
                }
            }
            lines.push(format!(
                "Remove {} and reload systemd",
                self.layout.unit_path().display()
            ));
        } else {
            lines.push("No unit file to remove".to_string());
        }

        if state.binary_present {
            lines.push(format!(
                "Remove {}",
                self.layout.installed_binary().display()
            ));
        } else {
            lines.push("No installed binary to remove".to_string());
        }

        if self.layout.config_dir().exists() {
            if args.purge_config {
                lines.push(format!("Delete {}", self.layout.config_dir().display()));
            } else {
                lines.push(format!(
                    "Keep {} (pass --purge-config to delete)",
                    self.layout.config_dir().display()
                ));
            }
        } else {
            lines.push("No config directory present".to_string());
        }

        match state.user_exists {
            ProbeState::Yes if args.purge_user => {
                lines.push(format!("Delete the '{SERVICE_USER}' account"));
            }
            ProbeState::Yes => lines.push(format!(
                "Keep the '{SERVICE_USER}' account (pass --purge-user to delete)"
            )),
            _ => lines.push(format!("No '{SERVICE_USER}' account present")),
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operation() -> UninstallOperation {
        UninstallOperation::new(Layout::new(None), Runner::new(false))
    }

    fn args(purge_config: bool, purge_user: bool, yes: bool) -> UninstallArgs {
        UninstallArgs {
            purge_config,
            purge_user,
            yes,
            dry_run: false,
        }
    }

    // Flag-driven purge decisions never reach a prompt, so these run
    // headless.

    #[test]
    fn test_purge_config_flag_approves() {
        let op = operation();
        assert!(op.config_purge_approved(&args(true, false, false)).unwrap());
    }

    #[test]
    fn test_yes_keeps_config() {
        let op = operation();
        assert!(!op.config_purge_approved(&args(false, false, true)).unwrap());
    }

    #[test]
    fn test_purge_user_flag_approves() {
        let op = operation();
        assert!(op.account_purge_approved(&args(false, true, false)).unwrap());
    }

    #[test]
    fn test_yes_keeps_account() {
        let op = operation();
        assert!(!op.account_purge_approved(&args(false, false, true)).unwrap());
    }

    #[test]
    fn test_purge_flags_beat_yes() {
        // --yes only answers the prompts that remain; explicit purge
        // flags still assert their purges
        let op = operation();
        let combined = args(true, true, true);
        assert!(op.config_purge_approved(&combined).unwrap());
        assert!(op.account_purge_approved(&combined).unwrap());
    }

    fn state(
        binary: bool,
        config: bool,
        user: ProbeState,
        unit: bool,
        active: ProbeState,
        enabled: ProbeState,
    ) -> InstallState {
        InstallState {
            binary_present: binary,
            config_present: config,
            user_exists: user,
            unit_present: unit,
            service_active: active,
            service_enabled: enabled,
        }
    }

    #[test]
    fn test_plan_ends_at_unverifiable_service_state() {
        let op = operation();
        let murky = state(
            true,
            true,
            ProbeState::Yes,
            true,
            ProbeState::Unknown,
            ProbeState::Unknown,
        );
        let lines = op.plan_lines(&murky, &args(false, false, false));

        // A real run aborts before touching anything, so no removal
        // step may appear after the abort line
        assert_eq!(lines.last().map(String::as_str), Some(ABORT_LINE));
        assert!(!lines.iter().any(|l| l.contains("Remove")));
        assert!(!lines.iter().any(|l| l.contains("Delete")));
    }

    #[test]
    fn test_plan_ends_at_unverifiable_enable_state() {
        let op = operation();
        let murky = state(
            true,
            false,
            ProbeState::No,
            true,
            ProbeState::Yes,
            ProbeState::Unknown,
        );
        let lines = op.plan_lines(&murky, &args(false, false, false));

        assert_eq!(
            lines.first().map(String::as_str),
            Some("Stop the running service")
        );
        assert_eq!(lines.last().map(String::as_str), Some(ABORT_LINE));
        assert!(!lines.iter().any(|l| l.contains("Remove")));
    }

    #[test]
    fn test_plan_orders_stop_disable_remove() {
        let op = operation();
        let full = state(
            true,
            true,
            ProbeState::Yes,
            true,
            ProbeState::Yes,
            ProbeState::Yes,
        );
        let lines = op.plan_lines(&full, &args(false, false, false));

        let stop = lines
            .iter()
            .position(|l| l.as_str() == "Stop the running service")
            .unwrap();
        let disable = lines
            .iter()
            .position(|l| l.as_str() == "Disable start at boot")
            .unwrap();
        let remove = lines
            .iter()
            .position(|l| l.starts_with("Remove /etc/systemd/system/"))
            .unwrap();
        assert!(stop < disable && disable < remove);
    }

    #[test]
    fn test_plan_continues_past_unknown_without_unit_file() {
        // Nothing left to guard once the unit file is gone; the plan
        // keeps going just like a real run does
        let op = operation();
        let murky = state(
            false,
            false,
            ProbeState::No,
            false,
            ProbeState::Unknown,
            ProbeState::Unknown,
        );
        let lines = op.plan_lines(&murky, &args(false, false, false));

        assert!(lines.iter().any(|l| l.as_str() == "No unit file to remove"));
        assert!(
            lines
                .iter()
                .any(|l| l.as_str() == "No installed binary to remove")
        );
        assert!(!lines.iter().any(|l| l.as_str() == ABORT_LINE));
    }
}
