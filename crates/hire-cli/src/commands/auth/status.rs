use hire_auth::SessionStatus;
use hire_core::SessionKind;
use serde::Serialize;

use crate::bootstrap::Context;
use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    active: Option<SessionKind>,
    sessions: Vec<SessionStatus>,
}

pub fn handle(ctx: &Context, flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = ctx.api.store();
    let status = AuthStatusResponse {
        active: store.active_kind(),
        sessions: SessionKind::ALL.into_iter().map(|kind| store.status(kind)).collect(),
    };
    output(&status, flags.format)
}
