//! Fresh host-state snapshots
//!
//! A snapshot answers "what does the host look like right now" for the
//! status command and dry-run planning. Mutating steps re-derive their
//! own predicates at execution time; nothing here is cached into them.

use serde::Serialize;

use crate::account;
use crate::exec::Runner;
use crate::layout::{Layout, SERVICE_USER};
use crate::supervisor::Systemd;

/// Answer from a probe that may be unverifiable on this host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeState {
    Yes,
    No,
    Unknown,
}

impl ProbeState {
    fn from_result(result: crate::error::Result<bool>) -> Self {
        match result {
            Ok(true) => ProbeState::Yes,
            Ok(false) => ProbeState::No,
            Err(_) => ProbeState::Unknown,
        }
    }

    pub fn is_yes(self) -> bool {
        self == ProbeState::Yes
    }

    pub fn is_no(self) -> bool {
        self == ProbeState::No
    }
}

/// Everything install and uninstall care about, probed at one instant.
#[derive(Debug, Serialize)]
pub struct InstallState {
    pub binary_present: bool,
    pub config_present: bool,
    pub user_exists: ProbeState,
    pub unit_present: bool,
    pub service_active: ProbeState,
    pub service_enabled: ProbeState,
}

impl InstallState {
    /// Probe the host. Never fails; answers that cannot be verified come
    /// back as `Unknown`.
    pub fn discover(runner: &Runner, layout: &Layout) -> Self {
        let systemd = Systemd::new(runner, Layout::unit_name());
        Self {
            binary_present: layout.installed_binary().is_file(),
            config_present: layout.installed_config().is_file(),
            user_exists: ProbeState::from_result(account::user_exists(runner, SERVICE_USER)),
            unit_present: layout.unit_path().is_file(),
            service_active: ProbeState::from_result(systemd.is_active()),
            service_enabled: ProbeState::from_result(systemd.is_enabled()),
        }
    }

    /// Every predicate holds.
    pub fn fully_installed(&self) -> bool {
        self.binary_present
            && self.config_present
            && self.user_exists.is_yes()
            && self.unit_present
            && self.service_active.is_yes()
            && self.service_enabled.is_yes()
    }

    /// No predicate holds; unverifiable answers count as "not absent".
    pub fn nothing_installed(&self) -> bool {
        !self.binary_present
            && !self.config_present
            && self.user_exists.is_no()
            && !self.unit_present
            && self.service_active.is_no()
            && self.service_enabled.is_no()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SetupError;

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
    fn test_probe_state_from_result() {
        assert_eq!(ProbeState::from_result(Ok(true)), ProbeState::Yes);
        assert_eq!(ProbeState::from_result(Ok(false)), ProbeState::No);
        assert_eq!(
            ProbeState::from_result(Err(SetupError::SupervisorUnavailable {
                reason: "no bus".to_string()
            })),
            ProbeState::Unknown
        );
    }

    #[test]
    fn test_fully_installed() {
        let full = state(
            true,
            true,
            ProbeState::Yes,
            true,
            ProbeState::Yes,
            ProbeState::Yes,
        );
        assert!(full.fully_installed());
        assert!(!full.nothing_installed());
    }

    #[test]
    fn test_nothing_installed() {
        let empty = state(
            false,
            false,
            ProbeState::No,
            false,
            ProbeState::No,
            ProbeState::No,
        );
        assert!(empty.nothing_installed());
        assert!(!empty.fully_installed());
    }

    #[test]
    fn test_unknown_is_neither() {
        let murky = state(
            false,
            false,
            ProbeState::No,
            false,
            ProbeState::Unknown,
            ProbeState::Unknown,
        );
        assert!(!murky.fully_installed());
        assert!(!murky.nothing_installed());
    }

    #[test]
    fn test_snapshot_serializes_for_automation() {
        let partial = state(
            true,
            false,
            ProbeState::Yes,
            false,
            ProbeState::Unknown,
            ProbeState::No,
        );
        let json = serde_json::to_value(&partial).unwrap();
        assert_eq!(json["binary_present"], true);
        assert_eq!(json["config_present"], false);
        assert_eq!(json["user_exists"], "yes");
        assert_eq!(json["service_active"], "unknown");
        assert_eq!(json["service_enabled"], "no");
    }
}
