use clap::{Args, Subcommand};
use hire_core::SessionKind;

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in as an employer (email) or candidate (mobile number).
    Login(AuthLoginArgs),
    /// Create an account and sign in.
    Signup(AuthSignupArgs),
    /// Drop stored tokens for one kind, or for both with --all.
    Logout(AuthLogoutArgs),
    /// Show both sessions.
    Status,
    /// Exchange the refresh token for a new access token.
    Refresh(AuthKindArgs),
    /// Ask the backend whether the stored access token is live.
    Validate(AuthKindArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AuthKindArgs {
    /// Session kind: employer or candidate.
    #[arg(long, default_value = "employer")]
    pub kind: SessionKind,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    /// Session kind: employer or candidate.
    #[arg(long, default_value = "employer")]
    pub kind: SessionKind,
    /// Employer email address.
    #[arg(long, conflicts_with = "mobile", required_unless_present = "mobile")]
    pub email: Option<String>,
    /// Candidate mobile number.
    #[arg(long)]
    pub mobile: Option<String>,
    /// Account password.
    #[arg(long)]
    pub password: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuthSignupArgs {
    #[command(flatten)]
    pub login: AuthLoginArgs,
    /// Display name for the new account.
    #[arg(long)]
    pub name: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLogoutArgs {
    /// Session kind to sign out of.
    #[arg(long, conflicts_with = "all")]
    pub kind: Option<SessionKind>,
    /// Sign out of both sessions.
    #[arg(long)]
    pub all: bool,
}
