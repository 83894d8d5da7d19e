//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - install: Install command arguments
//! - uninstall: Uninstall command arguments
//! - status: Status command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod install;
pub mod status;
pub mod uninstall;

pub use completions::CompletionsArgs;
pub use install::InstallArgs;
pub use status::StatusArgs;
pub use uninstall::UninstallArgs;

/// bridgectl - RustBridge host provisioning
///
/// Install, inspect and remove the RustBridge gateway service on this host.
#[derive(Parser, Debug)]
#[command(
    name = "bridgectl",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install and manage the RustBridge gateway service",
    long_about = "bridgectl provisions the RustBridge Modbus-to-MQTT gateway onto a Linux host: \
                  it builds or reuses the release binary, creates the service account with serial \
                  device access, stages the binary and configuration into system paths, and \
                  registers the systemd unit. Uninstall reverses the whole thing in strict order.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  sudo bridgectl install                \x1b[90m# Install or converge the service\x1b[0m\n   \
                  bridgectl install --dry-run           \x1b[90m# Preview without touching the host\x1b[0m\n   \
                  sudo bridgectl uninstall              \x1b[90m# Remove the service, keep config\x1b[0m\n   \
                  sudo bridgectl uninstall --purge-config --purge-user --yes\n                                         \x1b[90m# Remove everything, no prompts\x1b[0m\n   \
                  bridgectl status                      \x1b[90m# Show what is installed\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Gateway project checkout (defaults to current directory)
    #[arg(long, short = 'p', global = true, env = "BRIDGECTL_PROJECT", value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Echo external commands as they run
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install the gateway service onto this host
    Install(InstallArgs),

    /// Stop and remove the gateway service
    Uninstall(UninstallArgs),

    /// Show what is currently installed
    Status(StatusArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
