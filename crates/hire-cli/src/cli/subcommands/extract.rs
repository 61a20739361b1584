use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Job-posting extraction commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ExtractCommands {
    /// Submit a posting for extraction.
    Submit(ExtractSubmitArgs),
    /// Read a job's current status once.
    Status(ExtractJobArgs),
    /// Poll a job until it completes or fails.
    Wait(ExtractJobArgs),
}

#[derive(Clone, Debug, Args)]
#[command(group(
    clap::ArgGroup::new("source")
        .required(true)
        .args(["text", "file", "url"]),
))]
pub struct ExtractSubmitArgs {
    /// Posting text.
    #[arg(long)]
    pub text: Option<String>,
    /// File containing the posting text.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// URL of a published posting.
    #[arg(long)]
    pub url: Option<String>,
    /// Keep polling until the job is terminal.
    #[arg(long)]
    pub wait: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ExtractJobArgs {
    /// Extraction job id.
    pub id: String,
}
