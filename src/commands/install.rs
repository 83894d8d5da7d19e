//! Install command implementation

use std::path::PathBuf;

use crate::cli::InstallArgs;
use crate::error::Result;
use crate::exec::Runner;
use crate::layout::Layout;
use crate::operations::install::InstallOperation;

pub fn run(project_root: Option<PathBuf>, verbose: bool, args: InstallArgs) -> Result<()> {
    let layout = Layout::new(project_root);
    let runner = Runner::new(verbose);
    InstallOperation::new(layout, runner).execute(&args)
}
