use hire_auth::{Credential, LoginResponse, Registration};
use hire_core::SessionKind;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::bootstrap::Context;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::{AuthLoginArgs, AuthSignupArgs};
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    kind: SessionKind,
    subject_id: String,
    expires_at: Option<String>,
    storage: &'static str,
    profile: Map<String, Value>,
}

pub async fn handle_login(
    args: &AuthLoginArgs,
    ctx: &Context,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let credential = credential(args)?;
    let login = ctx.api.session().login(args.kind, &credential).await?;
    output(&response(ctx, args.kind, login), flags.format)
}

pub async fn handle_signup(
    args: &AuthSignupArgs,
    ctx: &Context,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let registration = Registration {
        credential: credential(&args.login)?,
        name: args.name.clone(),
    };
    let login = ctx.api.session().signup(args.login.kind, &registration).await?;
    output(&response(ctx, args.login.kind, login), flags.format)
}

fn credential(args: &AuthLoginArgs) -> anyhow::Result<Credential> {
    let password = args.password.clone();
    match (&args.email, &args.mobile) {
        (Some(email), None) => Ok(Credential::Email {
            email: email.clone(),
            password,
        }),
        (None, Some(mobile_number)) => Ok(Credential::Mobile {
            mobile_number: mobile_number.clone(),
            password,
        }),
        _ => anyhow::bail!("pass exactly one of --email or --mobile"),
    }
}

fn response(ctx: &Context, kind: SessionKind, login: LoginResponse) -> AuthLoginResponse {
    let status = ctx.api.store().status(kind);
    AuthLoginResponse {
        authenticated: true,
        kind,
        subject_id: login.subject_id,
        expires_at: status.expires_at.map(|at| at.to_rfc3339()),
        storage: status.storage,
        profile: login.profile,
    }
}
