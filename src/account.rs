//! Service account management through the standard user tools
//!
//! Everything goes through `useradd`/`usermod`/`userdel`/`id`/`getent`
//! so the account looks exactly like one an administrator made by hand.
//! Existence and membership are probed at call time, never cached.

use crate::error::{Result, SetupError};
use crate::exec::{ADMIN_TIMEOUT, Runner, stdout_text};

/// What `ensure_service_account` found or did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountOutcome {
    /// Account was created with the device group
    Created,
    /// Account and membership were already in place
    Present,
    /// Account existed but had lost the device group; membership restored
    MembershipRepaired,
}

/// `id -u` exits non-zero for unknown users.
pub fn user_exists(runner: &Runner, user: &str) -> Result<bool> {
    let output = runner.run("id", &["-u", user], None, ADMIN_TIMEOUT)?;
    Ok(output.status.success())
}

pub fn group_exists(runner: &Runner, group: &str) -> Result<bool> {
    let output = runner.run("getent", &["group", group], None, ADMIN_TIMEOUT)?;
    Ok(output.status.success())
}

/// Groups the user belongs to, primary first, per `id -nG`.
pub fn user_groups(runner: &Runner, user: &str) -> Result<Vec<String>> {
    let output = runner.run_checked("id", &["-nG", user], ADMIN_TIMEOUT)?;
    Ok(stdout_text(&output)
        .split_whitespace()
        .map(str::to_string)
        .collect())
}

/// Create the system account with the device group, or converge an
/// existing one. An account that exists but has lost its device group
/// membership gets it back.
pub fn ensure_service_account(runner: &Runner, user: &str, group: &str) -> Result<AccountOutcome> {
    if !group_exists(runner, group)? {
        return Err(SetupError::GroupAssignFailed {
            user: user.to_string(),
            group: group.to_string(),
            reason: "group does not exist on this host".to_string(),
        });
    }

    if user_exists(runner, user)? {
        if user_groups(runner, user)?.iter().any(|g| g == group) {
            return Ok(AccountOutcome::Present);
        }
        match runner.run_checked("usermod", &["-aG", group, user], ADMIN_TIMEOUT) {
            Ok(_) => return Ok(AccountOutcome::MembershipRepaired),
            Err(SetupError::CommandFailed { stderr, .. }) => {
                return Err(SetupError::GroupAssignFailed {
                    user: user.to_string(),
                    group: group.to_string(),
                    reason: stderr,
                });
            }
            Err(e) => return Err(e),
        }
    }

    // -r system account, -M no home, login shell disabled
    let args = ["-r", "-M", "-s", "/usr/sbin/nologin", "-G", group, user];
    match runner.run_checked("useradd", &args, ADMIN_TIMEOUT) {
        Ok(_) => Ok(AccountOutcome::Created),
        Err(SetupError::CommandFailed { stderr, .. }) => Err(SetupError::AccountCreateFailed {
            user: user.to_string(),
            reason: stderr,
        }),
        Err(e) => Err(e),
    }
}

/// Delete the account. Returns false when it was already absent.
pub fn remove_service_account(runner: &Runner, user: &str) -> Result<bool> {
    if !user_exists(runner, user)? {
        return Ok(false);
    }
    match runner.run_checked("userdel", &[user], ADMIN_TIMEOUT) {
        Ok(_) => Ok(true),
        Err(SetupError::CommandFailed { stderr, .. }) => Err(SetupError::AccountRemoveFailed {
            user: user.to_string(),
            reason: stderr,
        }),
        Err(e) => Err(e),
    }
}

/// uid and gid of the account, for ownership of staged files.
pub fn resolve_ids(runner: &Runner, user: &str) -> Result<(u32, u32)> {
    let uid = id_number(runner, "-u", user)?;
    let gid = id_number(runner, "-g", user)?;
    Ok((uid, gid))
}

fn id_number(runner: &Runner, flag: &str, user: &str) -> Result<u32> {
    let output = match runner.run_checked("id", &[flag, user], ADMIN_TIMEOUT) {
        Ok(o) => o,
        Err(SetupError::CommandFailed { stderr, .. }) => {
            return Err(SetupError::AccountLookupFailed {
                user: user.to_string(),
                reason: stderr,
            });
        }
        Err(e) => return Err(e),
    };
    let text = stdout_text(&output);
    text.parse::<u32>()
        .map_err(|_| SetupError::AccountLookupFailed {
            user: user.to_string(),
            reason: format!("unexpected id output: {text}"),
        })
}
