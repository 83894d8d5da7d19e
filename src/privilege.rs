//! Root gate for mutating commands

use rustix::process::geteuid;

use crate::error::{Result, SetupError};

/// True when the effective uid is root.
pub fn is_root() -> bool {
    geteuid().is_root()
}

/// Commands that change the host must pass this before touching anything.
pub fn require_root() -> Result<()> {
    if is_root() {
        Ok(())
    } else {
        Err(SetupError::PermissionDenied)
    }
}
