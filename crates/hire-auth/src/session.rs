use std::sync::Arc;

use hire_core::{SessionKind, TokenPair};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;

use crate::error::AuthError;
use crate::models::{
    Credential, LoginResponse, RefreshRequest, RefreshResponse, Registration, Validation,
};
use crate::token_store::TokenStore;
use crate::transport::{Transport, bearer, error_message, json_request};

/// Login, signup, logout, refresh, and remote validation against the auth API.
///
/// Keeps the [`TokenStore`] in sync with every successful exchange. Requests
/// made here go straight to the transport; they never pass through the
/// interceptor chain, so a refresh can never trigger another refresh.
#[derive(Clone)]
pub struct AuthSession {
    transport: Arc<dyn Transport>,
    store: TokenStore,
    base_url: String,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("store", &self.store)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl AuthSession {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: TokenStore,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            store,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub const fn store(&self) -> &TokenStore {
        &self.store
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange a credential for a token pair and persist it under `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::CredentialMismatch`] before any network call if the
    /// credential shape does not fit `kind`; otherwise propagates transport,
    /// status, and decode failures unchanged. Nothing is retried here.
    pub async fn login(
        &self,
        kind: SessionKind,
        credential: &Credential,
    ) -> Result<LoginResponse, AuthError> {
        check_credential(kind, credential)?;
        let url = self.url(&format!("/auth/{kind}/login"))?;
        let request = json_request(Method::POST, url, credential)
            .map_err(|e| AuthError::Decode(format!("encode credential: {e}")))?;
        let login: LoginResponse = self.send_json(request).await?;
        self.store.store(kind, &login.token_pair());
        tracing::info!(%kind, subject_id = %login.subject_id, "signed in");
        Ok(login)
    }

    /// Create an account and persist its first token pair under `kind`.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::login`].
    pub async fn signup(
        &self,
        kind: SessionKind,
        registration: &Registration,
    ) -> Result<LoginResponse, AuthError> {
        check_credential(kind, &registration.credential)?;
        let url = self.url(&format!("/auth/{kind}/signup"))?;
        let request = json_request(Method::POST, url, registration)
            .map_err(|e| AuthError::Decode(format!("encode registration: {e}")))?;
        let login: LoginResponse = self.send_json(request).await?;
        self.store.store(kind, &login.token_pair());
        tracing::info!(%kind, subject_id = %login.subject_id, "account created");
        Ok(login)
    }

    /// Drop the stored tokens of `kind`. The backend is not contacted.
    pub fn logout(&self, kind: SessionKind) {
        self.store.clear(kind);
        tracing::info!(%kind, "signed out");
    }

    /// Drop both kinds' tokens.
    pub fn logout_all(&self) {
        self.store.clear_all();
        tracing::info!("signed out of all sessions");
    }

    /// Exchange the stored refresh token of `kind` for a new access token.
    ///
    /// The refresh token itself is kept as is. Returns `None` when no refresh
    /// token is stored, and also when the exchange fails, in which case both
    /// tokens of `kind` are cleared so the user must sign in again.
    pub async fn refresh(&self, kind: SessionKind) -> Option<String> {
        let Some(refresh_token) = self.store.get_refresh(kind) else {
            tracing::warn!(%kind, "no refresh token stored; cannot refresh");
            return None;
        };

        match self.exchange_refresh(&refresh_token).await {
            Ok(access_token) => {
                self.store.store(kind, &TokenPair::new(access_token.clone(), refresh_token));
                tracing::debug!(%kind, "access token refreshed");
                Some(access_token)
            }
            Err(error) => {
                tracing::warn!(%kind, %error, "token refresh failed; clearing session");
                self.store.clear(kind);
                None
            }
        }
    }

    /// Ask the backend whether `access_token` is live. Never fails.
    pub async fn validate(&self, access_token: &str) -> Validation {
        match self.request_validation(access_token).await {
            Ok(validation) => validation,
            Err(error) => {
                tracing::debug!(%error, "token validation failed");
                Validation::invalid()
            }
        }
    }

    async fn exchange_refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let url = self.url("/auth/refresh")?;
        let request = json_request(Method::POST, url, &RefreshRequest { refresh_token })
            .map_err(|e| AuthError::Decode(format!("encode refresh request: {e}")))?;
        let response: RefreshResponse = self.send_json(request).await?;
        Ok(response.access_token)
    }

    async fn request_validation(&self, access_token: &str) -> Result<Validation, AuthError> {
        let url = self.url("/auth/validate")?;
        let mut request = reqwest::Request::new(Method::GET, url);
        let header = bearer(access_token)
            .ok_or_else(|| AuthError::Decode("token is not a valid header value".into()))?;
        request
            .headers_mut()
            .insert(reqwest::header::AUTHORIZATION, header);
        self.send_json(request).await
    }

    fn url(&self, path: &str) -> Result<Url, AuthError> {
        let raw = format!("{}{path}", self.base_url);
        Url::parse(&raw).map_err(|e| AuthError::InvalidUrl(format!("{raw}: {e}")))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::Request,
    ) -> Result<T, AuthError> {
        let response = self.transport.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Api {
                status: status.as_u16(),
                message: error_message(status, response.text().await.unwrap_or_default()),
            });
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| AuthError::Decode(e.to_string()))
    }
}

fn check_credential(kind: SessionKind, credential: &Credential) -> Result<(), AuthError> {
    if credential.kind() == kind {
        Ok(())
    } else {
        Err(AuthError::CredentialMismatch {
            kind,
            expected: Credential::expected_for(kind),
        })
    }
}
