//! Error types and handling for bridgectl
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//! Every failure a caller might branch on gets its own variant; embedding
//! tooling matches on the kind instead of scraping message text.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for provisioning operations
#[derive(Error, Diagnostic, Debug)]
pub enum SetupError {
    // Privilege errors
    #[error("This command must be run as root")]
    #[diagnostic(
        code(bridgectl::privilege::denied),
        help("Re-run with sudo, e.g. `sudo bridgectl install`")
    )]
    PermissionDenied,

    // Build errors
    #[error("Release build failed: {reason}")]
    #[diagnostic(
        code(bridgectl::build::failed),
        help("Run `cargo build --release` in the project root to see the full compiler output")
    )]
    BuildFailed { reason: String },

    #[error("Build finished but no binary at {path}")]
    #[diagnostic(
        code(bridgectl::build::artifact_missing),
        help("Check that the project root points at the gateway checkout")
    )]
    ArtifactMissing { path: String },

    // Service account errors
    #[error("Failed to create service account '{user}': {reason}")]
    #[diagnostic(code(bridgectl::account::create_failed))]
    AccountCreateFailed { user: String, reason: String },

    #[error("Failed to remove service account '{user}': {reason}")]
    #[diagnostic(
        code(bridgectl::account::remove_failed),
        help("The account may still own running processes; stop them and retry")
    )]
    AccountRemoveFailed { user: String, reason: String },

    #[error("Failed to add '{user}' to group '{group}': {reason}")]
    #[diagnostic(
        code(bridgectl::account::group_assign_failed),
        help("Check that the group exists: `getent group <group>`")
    )]
    GroupAssignFailed {
        user: String,
        group: String,
        reason: String,
    },

    #[error("Could not resolve uid/gid for '{user}': {reason}")]
    #[diagnostic(code(bridgectl::account::lookup_failed))]
    AccountLookupFailed { user: String, reason: String },

    // External command errors
    #[error("{program} exited with {status}: {stderr}")]
    #[diagnostic(code(bridgectl::exec::command_failed))]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("{program} did not finish within {limit_secs}s")]
    #[diagnostic(
        code(bridgectl::exec::timeout),
        help("The command was killed; re-run once the host is responsive again")
    )]
    CommandTimeout { program: String, limit_secs: u64 },

    #[error("Cannot talk to systemd: {reason}")]
    #[diagnostic(
        code(bridgectl::supervisor::unavailable),
        help("Unit files are only touched when service state can be verified; check that this is a systemd host")
    )]
    SupervisorUnavailable { reason: String },

    // Staging errors
    #[error("Default config not found at {path}")]
    #[diagnostic(
        code(bridgectl::stage::config_template_missing),
        help("Run from the gateway project root or pass --project-root")
    )]
    ConfigTemplateMissing { path: String },

    #[error("Unit file not found at {path}")]
    #[diagnostic(
        code(bridgectl::stage::unit_template_missing),
        help("Run from the gateway project root or pass --project-root")
    )]
    UnitTemplateMissing { path: String },

    // File system errors
    #[error("Failed to copy {src} to {dst}: {reason}")]
    #[diagnostic(code(bridgectl::fs::copy_failed))]
    FileCopyFailed {
        src: String,
        dst: String,
        reason: String,
    },

    #[error("Failed to remove {path}: {reason}")]
    #[diagnostic(code(bridgectl::fs::remove_failed))]
    FileRemoveFailed { path: String, reason: String },

    #[error("Failed to create directory {path}: {reason}")]
    #[diagnostic(code(bridgectl::fs::dir_create_failed))]
    DirCreateFailed { path: String, reason: String },

    #[error("Failed to remove directory {path}: {reason}")]
    #[diagnostic(code(bridgectl::fs::dir_remove_failed))]
    DirRemoveFailed { path: String, reason: String },

    #[error("Failed to set ownership on {path}: {reason}")]
    #[diagnostic(code(bridgectl::fs::chown_failed))]
    OwnershipFailed { path: String, reason: String },

    // Prompt errors
    #[error("Failed to read confirmation: {reason}")]
    #[diagnostic(
        code(bridgectl::prompt::failed),
        help("Use --yes (and --purge-config/--purge-user) for non-interactive runs")
    )]
    PromptFailed { reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(bridgectl::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for SetupError {
    fn from(err: std::io::Error) -> Self {
        SetupError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic;

    #[test]
    fn test_permission_denied_display() {
        let err = SetupError::PermissionDenied;
        assert_eq!(err.to_string(), "This command must be run as root");
    }

    #[test]
    fn test_permission_denied_code() {
        let err = SetupError::PermissionDenied;
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("bridgectl::privilege::denied"));
    }

    #[test]
    fn test_build_failed_display() {
        let err = SetupError::BuildFailed {
            reason: "linker not found".to_string(),
        };
        assert!(err.to_string().contains("linker not found"));
    }

    #[test]
    fn test_command_failed_display() {
        let err = SetupError::CommandFailed {
            program: "useradd".to_string(),
            status: "exit status: 9".to_string(),
            stderr: "user exists".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("useradd"));
        assert!(msg.contains("user exists"));
    }

    #[test]
    fn test_timeout_display() {
        let err = SetupError::CommandTimeout {
            program: "systemctl".to_string(),
            limit_secs: 30,
        };
        assert_eq!(err.to_string(), "systemctl did not finish within 30s");
    }

    #[test]
    fn test_supervisor_unavailable_code() {
        let err = SetupError::SupervisorUnavailable {
            reason: "systemctl not found".to_string(),
        };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("bridgectl::supervisor::unavailable"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SetupError = io_err.into();
        assert!(matches!(err, SetupError::IoError { .. }));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_template_missing_help_mentions_project_root() {
        let err = SetupError::ConfigTemplateMissing {
            path: "/src/config.yaml".to_string(),
        };
        let help = err.help().map(|h| h.to_string());
        assert!(help.is_some_and(|h| h.contains("--project-root")));
    }
}
