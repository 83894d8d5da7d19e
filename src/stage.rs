//! Staging files into system paths
//!
//! Placement goes through a temp file and rename in the destination
//! directory. For the binary this sidesteps ETXTBSY while the service is
//! still running the old build; for the unit file it means systemd never
//! sees a half-written unit.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, SetupError};

/// Whether staging wrote the file or left an existing one alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// File was written
    Placed,
    /// An existing file was preserved untouched
    Kept,
}

/// Create the config directory if needed. Returns true when it was made.
pub fn ensure_config_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir).map_err(|e| SetupError::DirCreateFailed {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(true)
}

/// Copy the built binary over the installed one and mark it executable.
/// Always overwrites; a stale binary is never kept.
pub fn stage_binary(src: &Path, dst: &Path) -> Result<()> {
    place_file(src, dst, 0o755)
}

/// Seed the live config from the checkout's default, unless one already
/// exists. An existing config is never rewritten, not even with
/// identical bytes.
pub fn stage_config(template: &Path, dst: &Path) -> Result<StageOutcome> {
    if dst.exists() {
        return Ok(StageOutcome::Kept);
    }
    if !template.is_file() {
        return Err(SetupError::ConfigTemplateMissing {
            path: template.display().to_string(),
        });
    }
    // Group-readable only; the config may hold broker credentials
    place_file(template, dst, 0o640)?;
    Ok(StageOutcome::Placed)
}

/// Recursively chown a directory tree to the given ids. Returns how many
/// entries were touched.
///
/// Symlinks are re-owned themselves, never their targets; a link in the
/// tree may dangle or point outside it.
pub fn apply_ownership(dir: &Path, uid: u32, gid: u32) -> Result<usize> {
    let mut changed = 0;
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| SetupError::OwnershipFailed {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;
        let chowned = if entry.path_is_symlink() {
            std::os::unix::fs::lchown(entry.path(), Some(uid), Some(gid))
        } else {
            std::os::unix::fs::chown(entry.path(), Some(uid), Some(gid))
        };
        chowned.map_err(|e| SetupError::OwnershipFailed {
            path: entry.path().display().to_string(),
            reason: e.to_string(),
        })?;
        changed += 1;
    }
    Ok(changed)
}

/// Delete a file. Returns false when it was already absent.
pub fn remove_file_if_present(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path).map_err(|e| SetupError::FileRemoveFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(true)
}

/// Delete a directory tree. Returns false when it was already absent.
pub fn remove_dir_if_present(dir: &Path) -> Result<bool> {
    if !dir.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(dir).map_err(|e| SetupError::DirRemoveFailed {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(true)
}

/// Copy src into place at dst with the given mode, atomically.
pub fn place_file(src: &Path, dst: &Path, mode: u32) -> Result<()> {
    let copy_err = |reason: String| SetupError::FileCopyFailed {
        src: src.display().to_string(),
        dst: dst.display().to_string(),
        reason,
    };

    let dir = dst
        .parent()
        .ok_or_else(|| copy_err("destination has no parent directory".to_string()))?;
    fs::create_dir_all(dir).map_err(|e| copy_err(e.to_string()))?;

    let tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| copy_err(e.to_string()))?;
    fs::copy(src, tmp.path()).map_err(|e| copy_err(e.to_string()))?;
    tmp.persist(dst).map_err(|e| copy_err(e.to_string()))?;

    let mut perms = fs::metadata(dst)
        .map_err(|e| copy_err(e.to_string()))?
        .permissions();
    perms.set_mode(mode);
    fs::set_permissions(dst, perms).map_err(|e| copy_err(e.to_string()))?;
    Ok(())
}
