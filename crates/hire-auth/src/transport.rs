//! The single seam through which every HTTP request leaves the client.
//!
//! Production code uses [`reqwest::Client`]; tests substitute a fake that
//! fabricates responses and records what was sent.

use futures_util::future::BoxFuture;

/// Sends a fully built request and yields the raw response.
///
/// Implementations must not interpret status codes; a 401 is an `Ok` response.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: reqwest::Request,
    ) -> BoxFuture<'static, Result<reqwest::Response, reqwest::Error>>;
}

impl Transport for reqwest::Client {
    fn execute(
        &self,
        request: reqwest::Request,
    ) -> BoxFuture<'static, Result<reqwest::Response, reqwest::Error>> {
        let client = self.clone();
        Box::pin(async move { client.execute(request).await })
    }
}

/// Build a request carrying a JSON body.
///
/// # Errors
///
/// Returns `serde_json::Error` if `body` cannot be serialized.
pub fn json_request<T: serde::Serialize + ?Sized>(
    method: reqwest::Method,
    url: reqwest::Url,
    body: &T,
) -> Result<reqwest::Request, serde_json::Error> {
    let bytes = serde_json::to_vec(body)?;
    let mut request = reqwest::Request::new(method, url);
    request.headers_mut().insert(
        reqwest::header::CONTENT_TYPE,
        reqwest::header::HeaderValue::from_static("application/json"),
    );
    *request.body_mut() = Some(bytes.into());
    Ok(request)
}

/// Format a bearer `Authorization` header value.
///
/// Returns `None` if the token contains bytes not allowed in a header.
#[must_use]
pub fn bearer(token: &str) -> Option<reqwest::header::HeaderValue> {
    reqwest::header::HeaderValue::from_str(&format!("Bearer {token}")).ok()
}

/// Human-readable failure text: the backend's `message`/`detail` field if
/// present, else the raw body, else the status reason.
pub fn error_message(status: reqwest::StatusCode, body: String) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(&body).ok();
    parsed
        .as_ref()
        .and_then(|v| v.get("message").or_else(|| v.get("detail")))
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            }
        })
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn error_message_prefers_backend_message() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"message":"nope"}"#.into()),
            "nope"
        );
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, "plain".into()),
            "plain"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, String::new()),
            "Not Found"
        );
    }

    #[test]
    fn bearer_rejects_control_characters() {
        assert!(bearer("abc").is_some());
        assert!(bearer("line\nbreak").is_none());
    }
}
