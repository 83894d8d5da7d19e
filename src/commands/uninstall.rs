//! Uninstall command implementation

use std::path::PathBuf;

use crate::cli::UninstallArgs;
use crate::error::Result;
use crate::exec::Runner;
use crate::layout::Layout;
use crate::operations::uninstall::UninstallOperation;

pub fn run(project_root: Option<PathBuf>, verbose: bool, args: UninstallArgs) -> Result<()> {
    let layout = Layout::new(project_root);
    let runner = Runner::new(verbose);
    UninstallOperation::new(layout, runner).execute(&args)
}
