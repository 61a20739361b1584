use clap::Subcommand;

use crate::cli::subcommands::{AuthCommands, ExtractCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Employer and candidate sessions.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Job-posting extraction.
    Extract {
        #[command(subcommand)]
        action: ExtractCommands,
    },
}
