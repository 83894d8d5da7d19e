//! Version command implementation

use crate::error::Result;
use crate::layout::{Layout, SERVICE_NAME};

/// Run version command
pub fn run() -> Result<()> {
    println!("bridgectl {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", rustc_version());
    println!("  Profile: {}", build_profile());
    println!();
    println!("Manages: {} ({})", SERVICE_NAME, Layout::unit_name());

    Ok(())
}

fn rustc_version() -> &'static str {
    // This will be the version of rustc used to compile
    env!("CARGO_PKG_RUST_VERSION")
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
