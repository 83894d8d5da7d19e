//! systemd unit lifecycle
//!
//! All state answers come from `systemctl` at call time. The query
//! helpers separate "inactive" from "systemctl itself cannot answer";
//! callers that are about to remove the unit file must get a real
//! answer or stop.

use std::path::Path;

use crate::error::{Result, SetupError};
use crate::exec::{ADMIN_TIMEOUT, Runner, stderr_text, stdout_text};
use crate::stage;

/// Drives one unit through `systemctl`.
pub struct Systemd<'a> {
    runner: &'a Runner,
    unit: String,
}

impl<'a> Systemd<'a> {
    pub fn new(runner: &'a Runner, unit: String) -> Self {
        Self { runner, unit }
    }

    /// Whether the unit is currently running.
    pub fn is_active(&self) -> Result<bool> {
        let (stdout, _stderr) = self.query(&["is-active", &self.unit])?;
        parse_active_state(&stdout).ok_or_else(|| SetupError::SupervisorUnavailable {
            reason: format!("unexpected is-active answer: '{stdout}'"),
        })
    }

    /// Whether the unit starts at boot.
    pub fn is_enabled(&self) -> Result<bool> {
        let (stdout, stderr) = self.query(&["is-enabled", &self.unit])?;
        parse_enabled_state(&stdout, &stderr).ok_or_else(|| SetupError::SupervisorUnavailable {
            reason: format!("unexpected is-enabled answer: '{stdout}'"),
        })
    }

    /// Place the unit file from the checkout under systemd's unit dir.
    pub fn register_unit(&self, src: &Path, dst: &Path) -> Result<()> {
        if !src.is_file() {
            return Err(SetupError::UnitTemplateMissing {
                path: src.display().to_string(),
            });
        }
        stage::place_file(src, dst, 0o644)
    }

    /// Make systemd re-read unit files. Required after placing and after
    /// removing the unit.
    pub fn daemon_reload(&self) -> Result<()> {
        self.runner
            .run_checked("systemctl", &["daemon-reload"], ADMIN_TIMEOUT)?;
        Ok(())
    }

    pub fn enable(&self) -> Result<()> {
        self.runner
            .run_checked("systemctl", &["enable", &self.unit], ADMIN_TIMEOUT)?;
        Ok(())
    }

    /// Start the unit, or restart it when already running so a refreshed
    /// binary is picked up. Returns true when it was a restart.
    pub fn start(&self) -> Result<bool> {
        let restart = self.is_active()?;
        let verb = if restart { "restart" } else { "start" };
        self.runner
            .run_checked("systemctl", &[verb, &self.unit], ADMIN_TIMEOUT)?;
        Ok(restart)
    }

    /// Stop the unit only when it is running. Returns true when a stop
    /// was issued.
    pub fn stop_if_active(&self) -> Result<bool> {
        if !self.is_active()? {
            return Ok(false);
        }
        self.runner
            .run_checked("systemctl", &["stop", &self.unit], ADMIN_TIMEOUT)?;
        Ok(true)
    }

    /// Disable the unit only when it is enabled. Returns true when a
    /// disable was issued.
    pub fn disable_if_enabled(&self) -> Result<bool> {
        if !self.is_enabled()? {
            return Ok(false);
        }
        self.runner
            .run_checked("systemctl", &["disable", &self.unit], ADMIN_TIMEOUT)?;
        Ok(true)
    }

    /// Delete the unit file. Returns false when it was already absent.
    pub fn remove_unit_file(&self, path: &Path) -> Result<bool> {
        stage::remove_file_if_present(path)
    }

    /// `is-active`/`is-enabled` exit non-zero for negative answers; the
    /// text is the answer. Only a systemctl that cannot run at all is an
    /// error here.
    fn query(&self, args: &[&str]) -> Result<(String, String)> {
        match self.runner.run("systemctl", args, None, ADMIN_TIMEOUT) {
            Ok(output) => Ok((stdout_text(&output), stderr_text(&output))),
            Err(SetupError::CommandFailed { stderr, .. }) => {
                Err(SetupError::SupervisorUnavailable { reason: stderr })
            }
            Err(e) => Err(e),
        }
    }
}

fn parse_active_state(raw: &str) -> Option<bool> {
    match raw {
        "active" | "activating" | "reloading" => Some(true),
        "inactive" | "failed" | "deactivating" | "unknown" => Some(false),
        _ => None,
    }
}

fn parse_enabled_state(stdout: &str, stderr: &str) -> Option<bool> {
    match stdout {
        "enabled" | "enabled-runtime" | "alias" | "linked" | "linked-runtime" => Some(true),
        "disabled" | "static" | "indirect" | "masked" | "masked-runtime" | "not-found" | "bad"
        | "transient" | "generated" => Some(false),
        // Older systemd prints nothing for unknown units and explains on
        // stderr; that is a definite "not enabled"
        "" if stderr.contains("No such file")
            || stderr.contains("not-found")
            || stderr.contains("does not exist") =>
        {
            Some(false)
        }
        _ => None,
    }
}
