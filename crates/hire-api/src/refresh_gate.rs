//! Single-flight token refresh.
//!
//! Concurrent requests that all find the same session needing a refresh
//! share one exchange with the backend and receive the same result.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use futures_util::FutureExt as _;
use futures_util::future::{BoxFuture, Shared};
use hire_auth::AuthSession;
use hire_core::SessionKind;

type InflightRefresh = Shared<BoxFuture<'static, Option<String>>>;

#[derive(Clone)]
pub struct RefreshGate {
    session: AuthSession,
    inflight: Arc<Mutex<HashMap<SessionKind, InflightRefresh>>>,
}

impl RefreshGate {
    #[must_use]
    pub fn new(session: AuthSession) -> Self {
        Self {
            session,
            inflight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Refresh `kind`, joining an exchange already in flight if there is one.
    ///
    /// Same contract as [`AuthSession::refresh`]: `None` means the session
    /// could not be refreshed (and has been cleared if an exchange failed).
    pub async fn refresh(&self, kind: SessionKind) -> Option<String> {
        let shared = {
            let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(existing) = inflight.get(&kind) {
                tracing::debug!(%kind, "joining in-flight token refresh");
                existing.clone()
            } else {
                let session = self.session.clone();
                let exchange: BoxFuture<'static, Option<String>> =
                    Box::pin(async move { session.refresh(kind).await });
                let shared = exchange.shared();
                inflight.insert(kind, shared.clone());
                shared
            }
        };

        let token = shared.clone().await;

        let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        if inflight
            .get(&kind)
            .is_some_and(|current| current.ptr_eq(&shared))
        {
            inflight.remove(&kind);
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use hire_auth::TokenStore;
    use hire_auth::claims::now_secs;
    use hire_auth::testing::{FakeResponse, FakeTransport, make_token};
    use hire_core::TokenPair;
    use serde_json::json;

    use super::*;

    fn gate_with(transport: &Arc<FakeTransport>) -> RefreshGate {
        let store = TokenStore::in_memory();
        store.store(SessionKind::Employer, &TokenPair::new("old", "er"));
        store.store(SessionKind::Candidate, &TokenPair::new("old", "cr"));
        RefreshGate::new(AuthSession::new(transport.clone(), store, "https://api.hire.test"))
    }

    #[tokio::test]
    async fn concurrent_refreshes_share_one_exchange() {
        let fresh = make_token(SessionKind::Employer, "e", now_secs() + 3600);
        let reply = json!({"accessToken": fresh});
        let transport = Arc::new(
            FakeTransport::new(move |_| FakeResponse::ok(reply.clone()))
                .with_latency(Duration::from_millis(20)),
        );
        let gate = gate_with(&transport);

        let (a, b, c) = tokio::join!(
            gate.refresh(SessionKind::Employer),
            gate.refresh(SessionKind::Employer),
            gate.refresh(SessionKind::Employer),
        );

        assert_eq!(transport.count("/auth/refresh"), 1);
        assert_eq!(a.as_deref(), Some(fresh.as_str()));
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[tokio::test]
    async fn different_kinds_refresh_independently() {
        let transport = Arc::new(
            FakeTransport::new(|_| FakeResponse::ok(json!({"accessToken": "new"})))
                .with_latency(Duration::from_millis(10)),
        );
        let gate = gate_with(&transport);

        let _ = tokio::join!(
            gate.refresh(SessionKind::Employer),
            gate.refresh(SessionKind::Candidate),
        );

        assert_eq!(transport.count("/auth/refresh"), 2);
    }

    #[tokio::test]
    async fn sequential_refreshes_each_hit_the_backend() {
        let transport = Arc::new(FakeTransport::new(|_| {
            FakeResponse::ok(json!({"accessToken": "new"}))
        }));
        let gate = gate_with(&transport);

        gate.refresh(SessionKind::Employer).await;
        gate.refresh(SessionKind::Employer).await;

        assert_eq!(transport.count("/auth/refresh"), 2);
    }
}
