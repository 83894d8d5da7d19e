//! Fixed install paths and service identity
//!
//! Everything the gateway occupies on a host is decided here, in one
//! place. System paths never vary per invocation; only the project root
//! (the build input) does.

use normpath::PathExt;
use std::path::{Path, PathBuf};

/// Service name, shared by the binary, the unit, and the account.
pub const SERVICE_NAME: &str = "rustbridge";

/// System account the service runs as.
pub const SERVICE_USER: &str = "rustbridge";

/// Supplementary group granting access to serial adapters.
pub const DEVICE_GROUP: &str = "dialout";

/// Name of the config file, both in the checkout and under the config dir.
pub const CONFIG_FILE: &str = "config.yaml";

const BIN_DIR: &str = "/usr/local/bin";
const CONFIG_DIR: &str = "/etc/rustbridge";
const UNIT_DIR: &str = "/etc/systemd/system";

/// Where everything lives, on the host and in the project checkout.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Gateway project checkout the binary is built from
    pub project_root: PathBuf,
}

impl Layout {
    /// Create a layout rooted at the given checkout, defaulting to the
    /// current directory.
    pub fn new(project_root: Option<PathBuf>) -> Self {
        let root = project_root.unwrap_or_else(|| PathBuf::from("."));
        // Normalize so paths read cleanly in messages; a root that does
        // not exist yet is kept verbatim and surfaces later as a build
        // or template error with context.
        let root = match root.normalize() {
            Ok(normalized) => normalized.as_path().to_path_buf(),
            Err(_) => root,
        };
        Self { project_root: root }
    }

    /// Release binary produced by the build, inside the checkout.
    pub fn artifact(&self) -> PathBuf {
        self.project_root
            .join("target")
            .join("release")
            .join(SERVICE_NAME)
    }

    /// Default config shipped with the checkout.
    pub fn config_template(&self) -> PathBuf {
        self.project_root.join(CONFIG_FILE)
    }

    /// Unit file shipped with the checkout.
    pub fn unit_template(&self) -> PathBuf {
        self.project_root.join(Self::unit_name())
    }

    /// Installed binary path.
    pub fn installed_binary(&self) -> PathBuf {
        Path::new(BIN_DIR).join(SERVICE_NAME)
    }

    /// Config directory on the host.
    pub fn config_dir(&self) -> PathBuf {
        PathBuf::from(CONFIG_DIR)
    }

    /// Live config file on the host.
    pub fn installed_config(&self) -> PathBuf {
        self.config_dir().join(CONFIG_FILE)
    }

    /// Unit file under systemd's unit directory.
    pub fn unit_path(&self) -> PathBuf {
        Path::new(UNIT_DIR).join(Self::unit_name())
    }

    /// `rustbridge.service`
    pub fn unit_name() -> String {
        format!("{SERVICE_NAME}.service")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_paths_are_fixed() {
        let layout = Layout::new(Some(PathBuf::from("/somewhere/rustbridge")));
        assert_eq!(
            layout.installed_binary(),
            PathBuf::from("/usr/local/bin/rustbridge")
        );
        assert_eq!(layout.config_dir(), PathBuf::from("/etc/rustbridge"));
        assert_eq!(
            layout.installed_config(),
            PathBuf::from("/etc/rustbridge/config.yaml")
        );
        assert_eq!(
            layout.unit_path(),
            PathBuf::from("/etc/systemd/system/rustbridge.service")
        );
    }

    #[test]
    fn test_project_paths_follow_root() {
        let layout = Layout::new(Some(PathBuf::from("/opt/src/rustbridge")));
        assert_eq!(
            layout.artifact(),
            PathBuf::from("/opt/src/rustbridge/target/release/rustbridge")
        );
        assert_eq!(
            layout.config_template(),
            PathBuf::from("/opt/src/rustbridge/config.yaml")
        );
        assert_eq!(
            layout.unit_template(),
            PathBuf::from("/opt/src/rustbridge/rustbridge.service")
        );
    }

    #[test]
    fn test_default_root_is_current_dir() {
        let layout = Layout::new(None);
        // Normalization resolves "." to an absolute path
        assert!(layout.project_root.is_absolute());
    }

    #[test]
    fn test_unit_name() {
        assert_eq!(Layout::unit_name(), "rustbridge.service");
    }

    #[test]
    fn test_missing_root_kept_verbatim() {
        let layout = Layout::new(Some(PathBuf::from("/no/such/checkout/anywhere")));
        assert_eq!(
            layout.project_root,
            PathBuf::from("/no/such/checkout/anywhere")
        );
    }
}
