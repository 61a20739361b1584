use hire_core::SessionKind;
use serde::Serialize;

use crate::bootstrap::Context;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthKindArgs;
use crate::output::output;

#[derive(Serialize)]
struct AuthRefreshResponse {
    kind: SessionKind,
    refreshed: bool,
    expires_at: Option<String>,
}

pub async fn handle(args: &AuthKindArgs, ctx: &Context, flags: &GlobalFlags) -> anyhow::Result<()> {
    let Some(_) = ctx.api.session().refresh(args.kind).await else {
        anyhow::bail!(
            "could not refresh the {} session; sign in again with `hire auth login --kind {}`",
            args.kind,
            args.kind
        );
    };
    let status = ctx.api.store().status(args.kind);
    output(
        &AuthRefreshResponse {
            kind: args.kind,
            refreshed: true,
            expires_at: status.expires_at.map(|at| at.to_rfc3339()),
        },
        flags.format,
    )
}
