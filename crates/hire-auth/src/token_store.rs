use std::sync::Arc;

use chrono::{DateTime, Utc};
use hire_core::{SessionKind, TokenClaims, TokenKind, TokenPair};
use serde::Serialize;

use crate::claims;
use crate::storage::{MemoryStore, SessionStore};

/// Per-kind token pair storage with expiry inspection.
///
/// Wraps an injectable [`SessionStore`] so the same logic runs against the OS
/// keychain, a credentials file, or an in-memory fake. No method touches the
/// network and none can fail.
#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("backend", &self.backend.backend_name())
            .finish()
    }
}

/// Display snapshot of one session kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub kind: SessionKind,
    pub signed_in: bool,
    pub subject_id: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub expired: bool,
    pub needs_refresh: bool,
    pub has_refresh_token: bool,
    pub storage: &'static str,
}

impl TokenStore {
    #[must_use]
    pub fn new(backend: Arc<dyn SessionStore>) -> Self {
        Self { backend }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::default()))
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    /// Overwrite both tokens of `kind`. No shape validation.
    pub fn store(&self, kind: SessionKind, pair: &TokenPair) {
        self.backend.set(kind, TokenKind::Access, &pair.access_token);
        self.backend.set(kind, TokenKind::Refresh, &pair.refresh_token);
        tracing::debug!(%kind, "stored token pair");
    }

    #[must_use]
    pub fn get_access(&self, kind: SessionKind) -> Option<String> {
        self.backend.get(kind, TokenKind::Access)
    }

    #[must_use]
    pub fn get_refresh(&self, kind: SessionKind) -> Option<String> {
        self.backend.get(kind, TokenKind::Refresh)
    }

    /// Remove both tokens of `kind`.
    pub fn clear(&self, kind: SessionKind) {
        self.backend.remove(kind, TokenKind::Access);
        self.backend.remove(kind, TokenKind::Refresh);
        tracing::debug!(%kind, "cleared token pair");
    }

    /// Remove both kinds' tokens.
    pub fn clear_all(&self) {
        for kind in SessionKind::ALL {
            self.clear(kind);
        }
    }

    #[must_use]
    pub fn decode(token: &str) -> Option<TokenClaims> {
        claims::decode(token)
    }

    #[must_use]
    pub fn is_expired(token: &str) -> bool {
        claims::is_expired(token)
    }

    #[must_use]
    pub fn needs_refresh(token: &str) -> bool {
        claims::needs_refresh(token)
    }

    /// Stored access token of `kind`, only if it is not expired.
    #[must_use]
    pub fn valid_access(&self, kind: SessionKind) -> Option<String> {
        self.get_access(kind)
            .filter(|token| !claims::is_expired(token))
    }

    /// The kind holding a non-expired access token; employer wins a tie.
    #[must_use]
    pub fn active_kind(&self) -> Option<SessionKind> {
        SessionKind::ALL
            .into_iter()
            .find(|&kind| self.valid_access(kind).is_some())
    }

    /// Subject id decoded from the stored access token of `kind`.
    #[must_use]
    pub fn subject_id(&self, kind: SessionKind) -> Option<String> {
        self.get_access(kind)
            .as_deref()
            .and_then(claims::decode)
            .map(|claims| claims.subject)
    }

    #[must_use]
    pub fn status(&self, kind: SessionKind) -> SessionStatus {
        let access = self.get_access(kind);
        let decoded = access.as_deref().and_then(claims::decode);
        SessionStatus {
            kind,
            signed_in: access.is_some(),
            subject_id: decoded.as_ref().map(|c| c.subject.clone()),
            expires_at: decoded.as_ref().and_then(TokenClaims::expires_at_utc),
            expired: access.as_deref().is_none_or(claims::is_expired),
            needs_refresh: access.as_deref().is_none_or(claims::needs_refresh),
            has_refresh_token: self.get_refresh(kind).is_some(),
            storage: self.backend_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::storage::UnavailableStore;
    use crate::testing::make_token_expiring_in;

    fn pair(kind: SessionKind, subject: &str, secs: i64) -> TokenPair {
        let now = claims::now_secs();
        TokenPair::new(
            make_token_expiring_in(kind, subject, now, secs),
            format!("refresh-{subject}"),
        )
    }

    #[test]
    fn store_is_idempotent() {
        let store = TokenStore::in_memory();
        let p = pair(SessionKind::Employer, "emp_1", 3600);
        store.store(SessionKind::Employer, &p);
        store.store(SessionKind::Employer, &p);
        assert_eq!(store.get_access(SessionKind::Employer), Some(p.access_token));
        assert_eq!(store.get_refresh(SessionKind::Employer), Some(p.refresh_token));
    }

    #[test]
    fn clear_after_many_stores_leaves_nothing() {
        let store = TokenStore::in_memory();
        for i in 0..3 {
            let next = pair(SessionKind::Candidate, &format!("c{i}"), 60);
            store.store(SessionKind::Candidate, &next);
        }
        store.clear(SessionKind::Candidate);
        assert!(store.get_access(SessionKind::Candidate).is_none());
        assert!(store.get_refresh(SessionKind::Candidate).is_none());
    }

    #[test]
    fn kinds_are_isolated() {
        let store = TokenStore::in_memory();
        let a = pair(SessionKind::Employer, "emp_1", 3600);
        let b = pair(SessionKind::Candidate, "cand_1", 3600);
        store.store(SessionKind::Employer, &a);
        store.store(SessionKind::Candidate, &b);
        assert_eq!(store.get_access(SessionKind::Employer), Some(a.access_token));
        assert_eq!(store.get_access(SessionKind::Candidate), Some(b.access_token.clone()));

        store.clear(SessionKind::Employer);
        assert!(store.get_access(SessionKind::Employer).is_none());
        assert_eq!(store.get_access(SessionKind::Candidate), Some(b.access_token));
    }

    #[test]
    fn clear_all_removes_both_kinds() {
        let store = TokenStore::in_memory();
        store.store(SessionKind::Employer, &pair(SessionKind::Employer, "e", 3600));
        store.store(SessionKind::Candidate, &pair(SessionKind::Candidate, "c", 3600));
        store.clear_all();
        assert!(store.active_kind().is_none());
        assert!(store.get_refresh(SessionKind::Employer).is_none());
        assert!(store.get_refresh(SessionKind::Candidate).is_none());
    }

    #[test]
    fn active_kind_prefers_employer() {
        let store = TokenStore::in_memory();
        assert_eq!(store.active_kind(), None);

        store.store(SessionKind::Candidate, &pair(SessionKind::Candidate, "c", 3600));
        assert_eq!(store.active_kind(), Some(SessionKind::Candidate));

        store.store(SessionKind::Employer, &pair(SessionKind::Employer, "e", 3600));
        assert_eq!(store.active_kind(), Some(SessionKind::Employer));
    }

    #[test]
    fn active_kind_skips_expired_tokens() {
        let store = TokenStore::in_memory();
        store.store(SessionKind::Employer, &pair(SessionKind::Employer, "e", 10));
        store.store(SessionKind::Candidate, &pair(SessionKind::Candidate, "c", 3600));
        assert_eq!(store.active_kind(), Some(SessionKind::Candidate));
    }

    #[test]
    fn unavailable_storage_degrades_to_nothing() {
        let store = TokenStore::new(Arc::new(UnavailableStore));
        store.store(SessionKind::Employer, &pair(SessionKind::Employer, "e", 3600));
        assert!(store.get_access(SessionKind::Employer).is_none());
        assert!(store.active_kind().is_none());
        store.clear_all();
        assert_eq!(store.backend_name(), "unavailable");
    }

    #[test]
    fn status_reports_decoded_subject() {
        let store = TokenStore::in_memory();
        store.store(SessionKind::Candidate, &pair(SessionKind::Candidate, "cand_7", 120));
        let status = store.status(SessionKind::Candidate);
        assert!(status.signed_in);
        assert_eq!(status.subject_id.as_deref(), Some("cand_7"));
        assert!(!status.expired);
        assert!(status.needs_refresh);
        assert!(status.has_refresh_token);
        assert_eq!(status.storage, "memory");

        let empty = store.status(SessionKind::Employer);
        assert!(!empty.signed_in);
        assert!(empty.expired);
        assert_eq!(store.subject_id(SessionKind::Employer), None);
    }
}
