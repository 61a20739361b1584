//! Test doubles: unsigned token builders and a scriptable [`Transport`].
//!
//! Enabled for this crate's unit tests and, through the `testing` feature,
//! for downstream crates' tests.

use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use futures_util::future::BoxFuture;
use hire_core::SessionKind;
use reqwest::header::HeaderMap;
use reqwest::{Method, Url};
use serde_json::Value;

use crate::transport::Transport;

/// Unsigned access token for `kind` with the given `exp`.
#[must_use]
pub fn make_token(kind: SessionKind, subject: &str, expires_at: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = serde_json::json!({
        "sub": subject,
        "sessionKind": kind,
        "tokenKind": "access",
        "exp": expires_at,
        "iat": expires_at - 3600,
    });
    let payload = URL_SAFE_NO_PAD.encode(payload.to_string());
    let signature = URL_SAFE_NO_PAD.encode("unsigned");
    format!("{header}.{payload}.{signature}")
}

/// Unsigned access token expiring `secs` after `now` (negative for the past).
#[must_use]
pub fn make_token_expiring_in(kind: SessionKind, subject: &str, now: i64, secs: i64) -> String {
    make_token(kind, subject, now + secs)
}

/// What the fake saw for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: Url,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RecordedRequest {
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Token from an `Authorization: Bearer` header.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        self.header("authorization")
            .and_then(|v| v.strip_prefix("Bearer "))
    }
}

/// Canned response produced by a [`FakeTransport`] handler.
#[derive(Debug, Clone)]
pub struct FakeResponse {
    pub status: u16,
    pub body: Value,
}

impl FakeResponse {
    #[must_use]
    pub const fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    #[must_use]
    pub const fn status(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    fn into_response(self) -> reqwest::Response {
        let mut response = http::Response::new(self.body.to_string());
        *response.status_mut() = http::StatusCode::from_u16(self.status)
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
        response.headers_mut().insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        reqwest::Response::from(response)
    }
}

type Handler = dyn Fn(&RecordedRequest) -> FakeResponse + Send + Sync;

/// Transport that answers from a closure and records every request.
pub struct FakeTransport {
    handler: Box<Handler>,
    requests: Mutex<Vec<RecordedRequest>>,
    latency: Option<Duration>,
}

impl FakeTransport {
    pub fn new(handler: impl Fn(&RecordedRequest) -> FakeResponse + Send + Sync + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
            latency: None,
        }
    }

    /// Delay every response, so concurrent callers overlap.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Every request seen so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests whose path ends with `suffix`.
    pub fn count(&self, suffix: &str) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.path.ends_with(suffix))
            .count()
    }
}

impl Transport for FakeTransport {
    fn execute(
        &self,
        request: reqwest::Request,
    ) -> BoxFuture<'static, Result<reqwest::Response, reqwest::Error>> {
        let recorded = RecordedRequest {
            method: request.method().clone(),
            path: request.url().path().to_string(),
            url: request.url().clone(),
            headers: request.headers().clone(),
            body: request
                .body()
                .and_then(reqwest::Body::as_bytes)
                .and_then(|bytes| serde_json::from_slice(bytes).ok()),
        };
        let response = (self.handler)(&recorded);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(recorded);

        let latency = self.latency;
        Box::pin(async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            Ok(response.into_response())
        })
    }
}
