pub(crate) mod status;
mod submit;

use crate::bootstrap::Context;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::ExtractCommands;

/// Handle `hire extract <subcommand>`.
pub async fn handle(
    action: &ExtractCommands,
    ctx: &Context,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ExtractCommands::Submit(args) => submit::handle(args, ctx, flags).await,
        ExtractCommands::Status(args) => status::handle_status(args, ctx, flags).await,
        ExtractCommands::Wait(args) => status::handle_wait(args, ctx, flags).await,
    }
}
