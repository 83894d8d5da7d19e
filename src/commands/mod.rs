//! Command implementations for the bridgectl CLI

pub mod completions;
pub mod install;
pub mod status;
pub mod uninstall;
pub mod version;
