use clap::Parser;

/// Arguments for the uninstall command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Remove the service, keep config and account:\n    sudo bridgectl uninstall\n\n\
                  Remove without prompting, keeping data:\n    sudo bridgectl uninstall --yes\n\n\
                  Remove everything for automation:\n    sudo bridgectl uninstall --purge-config --purge-user --yes\n\n\
                  Preview without touching the host:\n    bridgectl uninstall --dry-run")]
pub struct UninstallArgs {
    /// Also delete /etc/rustbridge without asking
    #[arg(long)]
    pub purge_config: bool,

    /// Also delete the rustbridge system account without asking
    #[arg(long)]
    pub purge_user: bool,

    /// Answer remaining prompts with their defaults (keeps config and account)
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Show what would be removed without changing the host
    #[arg(long)]
    pub dry_run: bool,
}
