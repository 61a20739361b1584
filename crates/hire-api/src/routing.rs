//! Path heuristics that decide which session a request speaks for.

use hire_auth::TokenStore;
use hire_core::SessionKind;

/// Path segment marking candidate-scoped routes.
const CANDIDATE_MARKER: &str = "/candidate";

const AUTH_PREFIX: &str = "/auth/";

const VALIDATE_PATH: &str = "/auth/validate";

/// Requests to the auth API carry no interceptor auth, except token
/// validation, which needs a bearer header.
#[must_use]
pub fn skips_auth(path: &str) -> bool {
    path.contains(AUTH_PREFIX) && !path.contains(VALIDATE_PATH)
}

#[must_use]
pub fn is_candidate_scoped(path: &str) -> bool {
    path.contains(CANDIDATE_MARKER)
}

/// Binary kind inference used when a response reports an auth failure.
#[must_use]
pub fn kind_for_path(path: &str) -> SessionKind {
    if is_candidate_scoped(path) {
        SessionKind::Candidate
    } else {
        SessionKind::Employer
    }
}

/// Pick the session kind and stored access token to attach to a request.
///
/// Among non-expired tokens: a candidate-scoped path takes the candidate
/// token first, then the employer token, then the candidate token. When no
/// stored token is still valid, the path's own kind is tried first among
/// expired ones, so the caller can refresh it before sending.
#[must_use]
pub fn choose_token(path: &str, store: &TokenStore) -> Option<(SessionKind, String)> {
    let valid_order: &[SessionKind] = if is_candidate_scoped(path) {
        &[SessionKind::Candidate, SessionKind::Employer]
    } else {
        &[SessionKind::Employer, SessionKind::Candidate]
    };
    let valid = valid_order
        .iter()
        .find_map(|&kind| store.valid_access(kind).map(|token| (kind, token)));
    if valid.is_some() {
        return valid;
    }

    let inferred = kind_for_path(path);
    [inferred, inferred.other()]
        .into_iter()
        .find_map(|kind| store.get_access(kind).map(|token| (kind, token)))
}

#[cfg(test)]
mod tests {
    use hire_auth::claims::now_secs;
    use hire_auth::testing::make_token_expiring_in;
    use hire_core::TokenPair;

    use super::*;

    fn store_with(employer: Option<i64>, candidate: Option<i64>) -> TokenStore {
        let store = TokenStore::in_memory();
        let now = now_secs();
        if let Some(secs) = employer {
            let access = make_token_expiring_in(SessionKind::Employer, "e", now, secs);
            store.store(SessionKind::Employer, &TokenPair::new(access, "er"));
        }
        if let Some(secs) = candidate {
            let access = make_token_expiring_in(SessionKind::Candidate, "c", now, secs);
            store.store(SessionKind::Candidate, &TokenPair::new(access, "cr"));
        }
        store
    }

    fn chosen(path: &str, store: &TokenStore) -> Option<SessionKind> {
        choose_token(path, store).map(|(kind, _)| kind)
    }

    #[test]
    fn auth_paths_skip_except_validate() {
        assert!(skips_auth("/api/auth/employer/login"));
        assert!(skips_auth("/api/auth/refresh"));
        assert!(!skips_auth("/api/auth/validate"));
        assert!(!skips_auth("/api/jobs"));
    }

    #[test]
    fn kind_inference_is_binary() {
        assert_eq!(kind_for_path("/api/candidate/applications"), SessionKind::Candidate);
        assert_eq!(kind_for_path("/api/jobs/42"), SessionKind::Employer);
    }

    #[test]
    fn candidate_route_prefers_candidate_token() {
        let store = store_with(Some(3600), Some(3600));
        assert_eq!(chosen("/api/candidate/profile", &store), Some(SessionKind::Candidate));
        assert_eq!(chosen("/api/jobs", &store), Some(SessionKind::Employer));
    }

    #[test]
    fn candidate_route_falls_back_to_employer() {
        let store = store_with(Some(3600), None);
        assert_eq!(chosen("/api/candidate/profile", &store), Some(SessionKind::Employer));
    }

    #[test]
    fn employer_route_falls_back_to_candidate() {
        let store = store_with(None, Some(3600));
        assert_eq!(chosen("/api/jobs", &store), Some(SessionKind::Candidate));

        let store = store_with(Some(5), Some(3600));
        assert_eq!(chosen("/api/jobs", &store), Some(SessionKind::Candidate));
    }

    #[test]
    fn expired_tokens_are_chosen_only_when_nothing_is_valid() {
        let store = store_with(Some(-1), None);
        assert_eq!(chosen("/api/jobs", &store), Some(SessionKind::Employer));
        assert_eq!(chosen("/api/candidate/x", &store), Some(SessionKind::Employer));

        let store = store_with(Some(-1), Some(-1));
        assert_eq!(chosen("/api/candidate/x", &store), Some(SessionKind::Candidate));
    }

    #[test]
    fn nothing_stored_chooses_nothing() {
        let store = TokenStore::in_memory();
        assert_eq!(chosen("/api/jobs", &store), None);
    }
}
