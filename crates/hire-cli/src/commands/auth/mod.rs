mod login;
mod logout;
mod refresh;
mod status;
mod validate;

use crate::bootstrap::Context;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;

/// Handle `hire auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    ctx: &Context,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::handle_login(args, ctx, flags).await,
        AuthCommands::Signup(args) => login::handle_signup(args, ctx, flags).await,
        AuthCommands::Logout(args) => logout::handle(args, ctx, flags),
        AuthCommands::Status => status::handle(ctx, flags),
        AuthCommands::Refresh(args) => refresh::handle(args, ctx, flags).await,
        AuthCommands::Validate(args) => validate::handle(args, ctx, flags).await,
    }
}
