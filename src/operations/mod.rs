//! High-level install and uninstall workflows
//!
//! InstallOperation converges the host toward the installed state;
//! UninstallOperation reverses it in strict stop, disable, remove order.
//! Both print what they did per step and support a dry-run plan derived
//! from a fresh probe.

pub mod install;
pub mod uninstall;
