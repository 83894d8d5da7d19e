//! Status command implementation
//!
//! Reports the six install predicates without judging them; the exit
//! code stays zero whatever the host looks like.

use std::path::{Path, PathBuf};

use console::Style;

use crate::cli::StatusArgs;
use crate::error::{Result, SetupError};
use crate::exec::Runner;
use crate::layout::{Layout, SERVICE_NAME, SERVICE_USER};
use crate::probe::{InstallState, ProbeState};

pub fn run(project_root: Option<PathBuf>, verbose: bool, args: StatusArgs) -> Result<()> {
    let layout = Layout::new(project_root);
    let runner = Runner::new(verbose);
    let state = InstallState::discover(&runner, &layout);

    if args.json {
        let json =
            serde_json::to_string_pretty(&state).map_err(|e| SetupError::IoError {
                message: format!("failed to serialize status: {e}"),
            })?;
        println!("{json}");
        return Ok(());
    }

    println!(
        "{}",
        Style::new()
            .bold()
            .apply_to(format!("{SERVICE_NAME} on this host"))
    );
    println!();
    path_row("Binary", &layout.installed_binary(), state.binary_present);
    path_row("Config", &layout.installed_config(), state.config_present);
    probe_row(
        "Service account",
        &format!("{SERVICE_USER} (system user)"),
        state.user_exists,
    );
    path_row("Unit file", &layout.unit_path(), state.unit_present);
    probe_row("Active", &Layout::unit_name(), state.service_active);
    probe_row("Enabled at boot", &Layout::unit_name(), state.service_enabled);
    println!();

    if state.fully_installed() {
        println!(
            "{}",
            Style::new().green().bold().apply_to("Fully installed")
        );
    } else if state.nothing_installed() {
        println!("{}", Style::new().dim().apply_to("Not installed"));
    } else {
        println!(
            "{}",
            Style::new()
                .yellow()
                .bold()
                .apply_to("Partially installed")
        );
        println!("Run `sudo bridgectl install` to converge.");
    }

    Ok(())
}

fn path_row(label: &str, path: &Path, present: bool) {
    let mark = if present {
        Style::new().green().apply_to("present")
    } else {
        Style::new().dim().apply_to("absent")
    };
    println!(
        "  {} {}  {}",
        Style::new().bold().apply_to(format!("{label:<16}")),
        mark,
        Style::new().dim().apply_to(path.display().to_string())
    );
}

fn probe_row(label: &str, subject: &str, state: ProbeState) {
    let mark = match state {
        ProbeState::Yes => Style::new().green().apply_to("yes"),
        ProbeState::No => Style::new().dim().apply_to("no"),
        ProbeState::Unknown => Style::new().yellow().apply_to("unknown"),
    };
    println!(
        "  {} {}  {}",
        Style::new().bold().apply_to(format!("{label:<16}")),
        mark,
        Style::new().dim().apply_to(subject)
    );
}
