//! Install workflow
//!
//! Steps run in dependency order: artifact, account, files, unit. Each
//! step probes its own precondition at execution time, so a re-run after
//! a partial failure picks up from whatever state the host is actually
//! in. There is no rollback; convergence is the recovery story.

use crate::account::{self, AccountOutcome};
use crate::artifact::{self, ArtifactOutcome};
use crate::cli::InstallArgs;
use crate::error::Result;
use crate::exec::Runner;
use crate::layout::{DEVICE_GROUP, Layout, SERVICE_NAME, SERVICE_USER};
use crate::probe::{InstallState, ProbeState};
use crate::stage::{self, StageOutcome};
use crate::supervisor::Systemd;
use crate::ui;

const TOTAL_STEPS: usize = 4;

pub struct InstallOperation {
    layout: Layout,
    runner: Runner,
}

impl InstallOperation {
    pub fn new(layout: Layout, runner: Runner) -> Self {
        Self { layout, runner }
    }

    pub fn execute(&self, args: &InstallArgs) -> Result<()> {
        if args.dry_run {
            return self.plan();
        }

        println!("Installing {SERVICE_NAME} from {}", self.layout.project_root.display());
        println!();

        let artifact = self.provide_artifact()?;
        self.provision_account()?;
        self.stage_files(&artifact)?;
        self.register_service()?;

        ui::success(&format!("{SERVICE_NAME} installed and running"));
        println!();
        println!("Next steps:");
        println!("  systemctl status {SERVICE_NAME}");
        println!("  journalctl -u {SERVICE_NAME} -f");
        println!(
            "  edit {} and `sudo systemctl restart {SERVICE_NAME}`",
            self.layout.installed_config().display()
        );
        Ok(())
    }

    fn provide_artifact(&self) -> Result<std::path::PathBuf> {
        ui::step(1, TOTAL_STEPS, "Release binary");
        let (path, outcome) = artifact::ensure_artifact(&self.runner, &self.layout)?;
        match outcome {
            ArtifactOutcome::Existing => {
                ui::kept(&format!("Using existing build: {}", path.display()));
            }
            ArtifactOutcome::Built => {
                ui::detail(&format!("Built {}", path.display()));
            }
        }
        Ok(path)
    }

    fn provision_account(&self) -> Result<()> {
        ui::step(2, TOTAL_STEPS, "Service account");
        match account::ensure_service_account(&self.runner, SERVICE_USER, DEVICE_GROUP)? {
            AccountOutcome::Created => ui::detail(&format!(
                "Created system account '{SERVICE_USER}' (groups: {DEVICE_GROUP})"
            )),
            AccountOutcome::MembershipRepaired => ui::detail(&format!(
                "Account '{SERVICE_USER}' existed; restored '{DEVICE_GROUP}' membership"
            )),
            AccountOutcome::Present => {
                ui::kept(&format!("Account '{SERVICE_USER}' already set up"));
            }
        }
        Ok(())
    }

    fn stage_files(&self, artifact: &std::path::Path) -> Result<()> {
        ui::step(3, TOTAL_STEPS, "Files");

        let config_dir = self.layout.config_dir();
        if stage::ensure_config_dir(&config_dir)? {
            ui::detail(&format!("Created {}", config_dir.display()));
        } else {
            ui::kept(&format!("{} already present", config_dir.display()));
        }

        let binary_dst = self.layout.installed_binary();
        stage::stage_binary(artifact, &binary_dst)?;
        ui::detail(&format!("Installed binary at {}", binary_dst.display()));

        let config_dst = self.layout.installed_config();
        match stage::stage_config(&self.layout.config_template(), &config_dst)? {
            StageOutcome::Placed => {
                ui::detail(&format!("Seeded default config at {}", config_dst.display()));
            }
            StageOutcome::Kept => {
                ui::kept(&format!("Existing {} kept", config_dst.display()));
            }
        }

        let (uid, gid) = account::resolve_ids(&self.runner, SERVICE_USER)?;
        stage::apply_ownership(&config_dir, uid, gid)?;
        ui::detail(&format!(
            "Ownership of {} set to {SERVICE_USER}",
            config_dir.display()
        ));
        Ok(())
    }

    fn register_service(&self) -> Result<()> {
        ui::step(4, TOTAL_STEPS, "systemd unit");
        let systemd = Systemd::new(&self.runner, Layout::unit_name());

        systemd.register_unit(&self.layout.unit_template(), &self.layout.unit_path())?;
        systemd.daemon_reload()?;
        ui::detail(&format!("Registered {}", self.layout.unit_path().display()));

        systemd.enable()?;
        let restarted = systemd.start()?;
        if restarted {
            ui::detail("Service enabled; restarted with the refreshed binary");
        } else {
            ui::detail("Service enabled and started");
        }
        Ok(())
    }

    /// Print what install would do, from a fresh probe. Touches nothing,
    /// so it runs without root.
    fn plan(&self) -> Result<()> {
        let state = InstallState::discover(&self.runner, &self.layout);

        ui::would(&format!(
            "Install plan for {}",
            self.layout.project_root.display()
        ));

        if self.layout.artifact().is_file() {
            ui::would("Reuse the existing release build");
        } else {
            ui::would("Run `cargo build --release` in the project root");
        }

        match state.user_exists {
            ProbeState::Yes => ui::would(&format!(
                "Keep account '{SERVICE_USER}', re-checking '{DEVICE_GROUP}' membership"
            )),
            ProbeState::No => ui::would(&format!(
                "Create system account '{SERVICE_USER}' in '{DEVICE_GROUP}'"
            )),
            ProbeState::Unknown => ui::would(&format!(
                "Ensure system account '{SERVICE_USER}' (current state unknown)"
            )),
        }

        ui::would(&format!(
            "Install binary to {} (always refreshed)",
            self.layout.installed_binary().display()
        ));
        if state.config_present {
            ui::would(&format!(
                "Keep existing {}",
                self.layout.installed_config().display()
            ));
        } else {
            ui::would(&format!(
                "Seed default config at {}",
                self.layout.installed_config().display()
            ));
        }

        ui::would(&format!(
            "Register {} and reload systemd",
            self.layout.unit_path().display()
        ));
        if state.service_active.is_yes() {
            ui::would("Enable the service and restart it with the new binary");
        } else {
            ui::would("Enable and start the service");
        }

        println!();
        ui::would("No changes made");
        Ok(())
    }
}
