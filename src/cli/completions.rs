use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    bridgectl completions bash > ~/.bash_completion.d/bridgectl\n\n\
                  Generate zsh completions:\n    bridgectl completions zsh > ~/.zfunc/_bridgectl\n\n\
                  Generate fish completions:\n    bridgectl completions fish > ~/.config/fish/completions/bridgectl.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
