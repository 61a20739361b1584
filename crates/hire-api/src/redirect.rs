//! Where a user goes once a session cannot be recovered.

use hire_config::AuthConfig;
use hire_core::SessionKind;

/// Navigation to the kind-appropriate login surface.
pub trait LoginRedirect: Send + Sync {
    fn redirect_to_login(&self, kind: SessionKind);
}

/// Reports the login URL through the log; the terminal is the only surface.
#[derive(Debug, Clone, Default)]
pub struct LogRedirect {
    auth: AuthConfig,
}

impl LogRedirect {
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            auth: config.clone(),
        }
    }

    #[must_use]
    pub fn login_url(&self, kind: SessionKind) -> &str {
        self.auth.login_url(kind)
    }
}

impl LoginRedirect for LogRedirect {
    fn redirect_to_login(&self, kind: SessionKind) {
        tracing::warn!(
            %kind,
            login_url = self.login_url(kind),
            "session could not be recovered; sign in again",
        );
    }
}
