use std::sync::Arc;

use hire_auth::transport::{bearer, json_request};
use hire_auth::{AuthSession, TokenStore, Transport, storage};
use hire_config::HireConfig;
use hire_core::SessionKind;
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::redirect::{LogRedirect, LoginRedirect};
use crate::refresh_gate::RefreshGate;
use crate::request_id::{self, REQUEST_ID_HEADER};
use crate::routing;

/// HTTP client that runs every request through the auth interceptor chain.
///
/// Request phase: correlation id, session selection, proactive refresh,
/// bearer plus legacy id headers. Response phase: a single
/// refresh-and-retry on `401 Unauthorized`, then a login redirect.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: AuthSession,
    refresh: RefreshGate,
    redirect: Arc<dyn LoginRedirect>,
    base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("session", &self.session)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Whether a request has already spent its one retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Original,
    Retry,
}

impl ApiClient {
    /// Build a client around `transport`, sharing it with the auth session.
    pub fn new(
        transport: Arc<dyn Transport>,
        store: TokenStore,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let session = AuthSession::new(transport.clone(), store, base_url.clone());
        Self {
            refresh: RefreshGate::new(session.clone()),
            transport,
            session,
            redirect: Arc::new(LogRedirect::default()),
            base_url,
        }
    }

    #[must_use]
    pub fn with_redirect(mut self, redirect: Arc<dyn LoginRedirect>) -> Self {
        self.redirect = redirect;
        self
    }

    /// Production client: reqwest with the configured timeout and user agent,
    /// token storage per `auth.storage`, and log-based login redirects.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying reqwest client cannot be built.
    pub fn from_config(config: &HireConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(config.api.user_agent.clone())
            .timeout(config.api.timeout())
            .build()?;
        let store = TokenStore::new(storage::from_config(&config.auth));
        tracing::debug!(
            base_url = config.api.base_url(),
            storage = store.backend_name(),
            "api client configured",
        );
        Ok(Self::new(Arc::new(http), store, config.api.base_url())
            .with_redirect(Arc::new(LogRedirect::from_config(&config.auth))))
    }

    #[must_use]
    pub const fn session(&self) -> &AuthSession {
        &self.session
    }

    #[must_use]
    pub const fn store(&self) -> &TokenStore {
        self.session.store()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/extract`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the joined string does not parse.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}{path}", self.base_url);
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// Send `request` through the interceptor chain.
    ///
    /// Non-success statuses other than an unrecovered `401` come back as
    /// ordinary responses.
    ///
    /// # Errors
    ///
    /// [`ApiError::Http`] for transport failures. [`ApiError::Unauthorized`]
    /// when a `401` could not be recovered by one refresh and retry; the
    /// login redirect has fired by then.
    pub async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response, ApiError> {
        let path = request.url().path().to_string();
        let request = self.prepare(request).await;
        let retry_copy = request.try_clone();

        let response = self.dispatch(request, Attempt::Original).await?;
        if response.status() != StatusCode::UNAUTHORIZED || routing::skips_auth(&path) {
            return Ok(response);
        }

        let kind = routing::kind_for_path(&path);
        tracing::debug!(%kind, %path, "unauthorized; refreshing before a single retry");
        let Some(token) = self.refresh.refresh(kind).await else {
            return Err(self.give_up(kind));
        };
        let Some(mut retry) = retry_copy else {
            tracing::warn!(%path, "request body cannot be replayed; not retrying");
            return Err(self.give_up(kind));
        };
        if let Some(header) = bearer(&token) {
            retry.headers_mut().insert(AUTHORIZATION, header);
        }

        match self.dispatch(retry, Attempt::Retry).await {
            Ok(response) if response.status().is_success() => Ok(response),
            Ok(response) => {
                self.redirect.redirect_to_login(kind);
                if response.status() == StatusCode::UNAUTHORIZED {
                    Err(ApiError::Unauthorized { kind })
                } else {
                    Err(ApiError::from_response(response).await)
                }
            }
            Err(error) => {
                self.redirect.redirect_to_login(kind);
                Err(error)
            }
        }
    }

    /// `GET path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Anything [`Self::send`] returns, plus [`ApiError::Status`] for other
    /// non-success statuses and [`ApiError::Decode`] for a mismatched body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = reqwest::Request::new(Method::GET, self.url(path)?);
        self.send_json(request).await
    }

    /// `POST path` with a JSON body and decode the JSON reply.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_json`].
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = json_request(Method::POST, self.url(path)?, body)
            .map_err(|e| ApiError::Decode(format!("encode request body: {e}")))?;
        self.send_json(request).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::Request,
    ) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Request phase of the chain.
    async fn prepare(&self, mut request: reqwest::Request) -> reqwest::Request {
        let request_id = request_id::generate();
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            request
                .headers_mut()
                .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }

        let path = request.url().path().to_string();
        if routing::skips_auth(&path) {
            return request;
        }

        if let Some(header) = self.resolve_token(&path).await.as_deref().and_then(bearer) {
            request.headers_mut().insert(AUTHORIZATION, header);
        }

        for kind in SessionKind::ALL {
            let Some(subject_id) = self.store().subject_id(kind) else {
                continue;
            };
            if let Ok(value) = HeaderValue::from_str(&subject_id) {
                request
                    .headers_mut()
                    .insert(HeaderName::from_static(kind.legacy_id_header()), value);
            }
        }
        request
    }

    /// Pick the session for `path` and refresh its token first if it is
    /// close to expiry. A failed refresh leaves the original token in place.
    async fn resolve_token(&self, path: &str) -> Option<String> {
        let (kind, token) = routing::choose_token(path, self.store())?;
        if !TokenStore::needs_refresh(&token) {
            return Some(token);
        }
        tracing::debug!(%kind, "access token near expiry; refreshing before send");
        Some(self.refresh.refresh(kind).await.unwrap_or(token))
    }

    async fn dispatch(
        &self,
        request: reqwest::Request,
        attempt: Attempt,
    ) -> Result<reqwest::Response, ApiError> {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        tracing::debug!(
            method = %request.method(),
            url = %request.url(),
            %request_id,
            retry = attempt == Attempt::Retry,
            "sending request",
        );
        let response = self.transport.execute(request).await?;
        tracing::debug!(status = response.status().as_u16(), %request_id, "response received");
        Ok(response)
    }

    fn give_up(&self, kind: SessionKind) -> ApiError {
        self.redirect.redirect_to_login(kind);
        ApiError::Unauthorized { kind }
    }
}
