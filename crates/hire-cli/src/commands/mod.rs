pub mod auth;
pub mod extract;

use crate::bootstrap::Context;
use crate::cli::{Commands, GlobalFlags};

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &Context, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => auth::handle(&action, ctx, flags).await,
        Commands::Extract { action } => extract::handle(&action, ctx, flags).await,
    }
}
