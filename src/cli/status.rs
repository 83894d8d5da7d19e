use clap::Parser;

/// Arguments for the status command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Human-readable summary:\n    bridgectl status\n\n\
                  Machine-readable snapshot for fleet tooling:\n    bridgectl status --json")]
pub struct StatusArgs {
    /// Emit the snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_status_json() {
        let cli = super::super::Cli::try_parse_from(["bridgectl", "status", "--json"]).unwrap();
        match cli.command {
            super::super::Commands::Status(args) => assert!(args.json),
            _ => panic!("Expected Status command"),
        }
    }
}
