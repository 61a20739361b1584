use hire_auth::{AuthError, Validation};
use hire_core::SessionKind;
use serde::Serialize;

use crate::bootstrap::Context;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthKindArgs;
use crate::output::output;

#[derive(Serialize)]
struct AuthValidateResponse {
    kind: SessionKind,
    #[serde(flatten)]
    validation: Validation,
}

pub async fn handle(args: &AuthKindArgs, ctx: &Context, flags: &GlobalFlags) -> anyhow::Result<()> {
    let Some(token) = ctx.api.store().get_access(args.kind) else {
        return Err(AuthError::NotAuthenticated(args.kind).into());
    };
    let validation = ctx.api.session().validate(&token).await;
    output(
        &AuthValidateResponse {
            kind: args.kind,
            validation,
        },
        flags.format,
    )
}
