//! Purge confirmations for uninstall
//!
//! Unit and binary removal never prompt. Deleting operator data is
//! opt-in: the config directory and the service account each get their
//! own question, and the default answer keeps them.

use inquire::Confirm;

use crate::error::{Result, SetupError};
use crate::layout::{Layout, SERVICE_USER};

/// Ask before deleting the config directory.
pub fn confirm_config_removal(layout: &Layout) -> Result<bool> {
    println!();
    Confirm::new(&format!(
        "Delete {} and its contents?",
        layout.config_dir().display()
    ))
    .with_default(false)
    .with_help_message("Press Enter to keep device and broker settings, or 'y' to delete")
    .prompt()
    .map_err(|e| SetupError::PromptFailed {
        reason: e.to_string(),
    })
}

/// Ask before deleting the service account.
pub fn confirm_account_removal() -> Result<bool> {
    Confirm::new(&format!("Delete the '{SERVICE_USER}' system account?"))
        .with_default(false)
        .with_help_message("Press Enter to keep it, or 'y' to delete")
        .prompt()
        .map_err(|e| SetupError::PromptFailed {
            reason: e.to_string(),
        })
}
