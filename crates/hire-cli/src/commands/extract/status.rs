use hire_core::ExtractionStatus;

use crate::bootstrap::Context;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::extract::ExtractJobArgs;
use crate::output::output;

pub async fn handle_status(
    args: &ExtractJobArgs,
    ctx: &Context,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let status = ctx.extraction.status(&args.id).await?;
    output(&status, flags.format)
}

pub async fn handle_wait(
    args: &ExtractJobArgs,
    ctx: &Context,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let result = ctx
        .extraction
        .poll(&args.id, |status| report_progress(status, flags))
        .await?;
    output(&result, flags.format)
}

/// One progress line on stderr per status read, unless `--quiet`.
pub fn report_progress(status: &ExtractionStatus, flags: &GlobalFlags) {
    if !flags.quiet {
        eprintln!("job {}: {}", status.id, status.status);
    }
}
