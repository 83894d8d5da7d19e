//! Locating or building the gateway binary
//!
//! An existing release binary is always reused; the build only runs when
//! the artifact is missing. After a build the artifact is re-checked
//! rather than trusted.

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Result, SetupError};
use crate::exec::{BUILD_TIMEOUT, Runner};
use crate::layout::Layout;

/// How the artifact came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactOutcome {
    /// A previously built binary was reused
    Existing,
    /// The release build produced it just now
    Built,
}

/// Use the release binary if present, otherwise build it.
pub fn ensure_artifact(runner: &Runner, layout: &Layout) -> Result<(PathBuf, ArtifactOutcome)> {
    let artifact = layout.artifact();
    if artifact.is_file() {
        return Ok((artifact, ArtifactOutcome::Existing));
    }

    let pb = build_spinner();
    let result = runner.run_logged(
        "cargo",
        &["build", "--release"],
        Some(&layout.project_root),
        BUILD_TIMEOUT,
    );
    pb.finish_and_clear();

    match result {
        Ok(()) => {}
        Err(SetupError::CommandFailed { stderr, .. }) => {
            return Err(SetupError::BuildFailed { reason: stderr });
        }
        Err(e) => return Err(e),
    }

    if artifact.is_file() {
        Ok((artifact, ArtifactOutcome::Built))
    } else {
        Err(SetupError::ArtifactMissing {
            path: artifact.display().to_string(),
        })
    }
}

#[allow(clippy::unwrap_used)]
fn build_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} Building release binary...")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
