//! Shell completion generation command.

use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;

/// Name of the installed binary
const BIN_NAME: &str = "fleetbook";

/// Generate shell completion scripts
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Where the generated script usually goes, per shell.
fn install_hint(shell: Shell) -> Option<&'static str> {
    match shell {
        Shell::Bash => Some(
            "fleetbook completions bash > ~/.local/share/bash-completion/completions/fleetbook",
        ),
        Shell::Zsh => Some("fleetbook completions zsh > ~/.zsh/completions/_fleetbook"),
        Shell::Fish => {
            Some("fleetbook completions fish > ~/.config/fish/completions/fleetbook.fish")
        }
        Shell::PowerShell => {
            Some("fleetbook completions powershell | Out-String | Invoke-Expression")
        }
        _ => None,
    }
}

impl CompletionsCommand {
    /// Execute the completions command.
    ///
    /// The script goes to stdout; the install hint goes to stderr so it can
    /// be piped straight into a file.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        if !global.quiet {
            if let Some(hint) = install_hint(self.shell) {
                eprintln!("# To install {} completions:", self.shell);
                eprintln!("#   {hint}");
            }
        }

        let mut cmd = Cli::command();
        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());

        Ok(())
    }
}
