use clap::Parser;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Install (builds the release binary if needed):\n    sudo bridgectl install\n\n\
                  Preview without touching the host:\n    bridgectl install --dry-run\n\n\
                  Install from a checkout elsewhere:\n    sudo bridgectl install --project-root /opt/src/rustbridge")]
pub struct InstallArgs {
    /// Show what would be done without changing the host
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_install_defaults() {
        let cli = super::super::Cli::try_parse_from(["bridgectl", "install"]).unwrap();
        match cli.command {
            super::super::Commands::Install(args) => assert!(!args.dry_run),
            _ => panic!("Expected Install command"),
        }
    }

    #[test]
    fn test_cli_parsing_install_dry_run() {
        let cli = super::super::Cli::try_parse_from(["bridgectl", "install", "--dry-run"]).unwrap();
        match cli.command {
            super::super::Commands::Install(args) => assert!(args.dry_run),
            _ => panic!("Expected Install command"),
        }
    }

    #[test]
    fn test_cli_parsing_install_rejects_positional() {
        assert!(super::super::Cli::try_parse_from(["bridgectl", "install", "something"]).is_err());
    }
}
