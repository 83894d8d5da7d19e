//! bridgectl - provisioning tool for the RustBridge gateway
//!
//! Installs the Modbus-to-MQTT gateway as a systemd service: builds or
//! reuses the release binary, provisions the service account with serial
//! device access, stages the binary and configuration into system paths,
//! and registers the unit. Uninstall reverses everything in strict
//! stop-disable-remove order.

use clap::Parser;

mod account;
mod artifact;
mod cli;
mod commands;
mod error;
mod exec;
mod layout;
mod operations;
mod privilege;
mod probe;
mod stage;
mod supervisor;
mod ui;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Root check for commands that mutate the host. Dry runs only probe,
    // so they pass; status, version and completions never need it.
    let needs_root = match &cli.command {
        Commands::Install(args) => !args.dry_run,
        Commands::Uninstall(args) => !args.dry_run,
        _ => false,
    };

    if needs_root {
        if let Err(e) = privilege::require_root() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(cli.project_root, cli.verbose, args),
        Commands::Uninstall(args) => commands::uninstall::run(cli.project_root, cli.verbose, args),
        Commands::Status(args) => commands::status::run(cli.project_root, cli.verbose, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
