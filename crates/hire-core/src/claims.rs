use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::session::{SessionKind, TokenKind};

/// Claims carried in the payload segment of an access or refresh token.
///
/// Decoded client-side without signature verification; the backend is the
/// only authority on whether a token is genuine. Identity-specific fields
/// (company id, candidate name, ...) land in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    /// Subject id (`sub` claim).
    #[serde(rename = "sub")]
    pub subject: String,
    pub session_kind: SessionKind,
    #[serde(default, alias = "tokenType")]
    pub token_kind: TokenKind,
    /// Expiry as Unix seconds (`exp` claim).
    #[serde(rename = "exp")]
    pub expires_at: i64,
    /// Issue time as Unix seconds (`iat` claim).
    #[serde(rename = "iat", default)]
    pub issued_at: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenClaims {
    /// Expiry as a timestamp. `None` if `exp` is out of chrono's range.
    #[must_use]
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }

    /// Seconds of validity left at `now`, floored at zero.
    #[must_use]
    pub fn remaining_secs(&self, now: i64) -> i64 {
        (self.expires_at - now).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_standard_and_custom_claims() {
        let claims: TokenClaims = serde_json::from_str(
            r#"{"sub":"emp_1","sessionKind":"employer","tokenKind":"access",
                "exp":200,"iat":100,"companyId":"c_9"}"#,
        )
        .unwrap();
        assert_eq!(claims.subject, "emp_1");
        assert_eq!(claims.session_kind, SessionKind::Employer);
        assert_eq!(claims.token_kind, TokenKind::Access);
        assert_eq!(claims.extra.get("companyId"), Some(&Value::from("c_9")));
    }

    #[test]
    fn token_type_alias_and_default() {
        let refresh: TokenClaims = serde_json::from_str(
            r#"{"sub":"c","sessionKind":"candidate","tokenType":"refresh","exp":1}"#,
        )
        .unwrap();
        assert_eq!(refresh.token_kind, TokenKind::Refresh);
        assert_eq!(refresh.issued_at, 0);

        let bare: TokenClaims =
            serde_json::from_str(r#"{"sub":"c","sessionKind":"candidate","exp":1}"#).unwrap();
        assert_eq!(bare.token_kind, TokenKind::Access);
    }

    #[test]
    fn remaining_secs_floors_at_zero() {
        let claims: TokenClaims =
            serde_json::from_str(r#"{"sub":"c","sessionKind":"candidate","exp":1000}"#).unwrap();
        assert_eq!(claims.remaining_secs(900), 100);
        assert_eq!(claims.remaining_secs(5000), 0);
    }
}
