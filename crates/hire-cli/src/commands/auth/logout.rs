use hire_core::SessionKind;
use serde::Serialize;

use crate::bootstrap::Context;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLogoutArgs;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: Vec<SessionKind>,
}

pub fn handle(args: &AuthLogoutArgs, ctx: &Context, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.api.session();
    let cleared = match args.kind {
        Some(kind) if !args.all => {
            session.logout(kind);
            vec![kind]
        }
        _ => {
            session.logout_all();
            SessionKind::ALL.to_vec()
        }
    };
    output(&AuthLogoutResponse { cleared }, flags.format)
}
