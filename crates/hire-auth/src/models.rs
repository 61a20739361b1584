//! Wire shapes of the authentication endpoints.

use hire_core::{SessionKind, TokenPair};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sign-in credential. Employers sign in by email, candidates by mobile number.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Credential {
    Email {
        email: String,
        password: String,
    },
    Mobile {
        #[serde(rename = "mobileNumber")]
        mobile_number: String,
        password: String,
    },
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email { email, .. } => f
                .debug_struct("Email")
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
            Self::Mobile { mobile_number, .. } => f
                .debug_struct("Mobile")
                .field("mobile_number", mobile_number)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

impl Credential {
    /// The kind this credential shape signs in.
    #[must_use]
    pub const fn kind(&self) -> SessionKind {
        match self {
            Self::Email { .. } => SessionKind::Employer,
            Self::Mobile { .. } => SessionKind::Candidate,
        }
    }

    /// Human label of the identifier expected for `kind`.
    #[must_use]
    pub const fn expected_for(kind: SessionKind) -> &'static str {
        match kind {
            SessionKind::Employer => "an email address",
            SessionKind::Candidate => "a mobile number",
        }
    }
}

/// Account creation payload: a credential plus a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    #[serde(flatten)]
    pub credential: Credential,
    pub name: String,
}

/// Successful login or signup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub subject_id: String,
    /// Profile fields returned alongside the tokens.
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl LoginResponse {
    #[must_use]
    pub fn token_pair(&self) -> TokenPair {
        TokenPair::new(self.access_token.clone(), self.refresh_token.clone())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshResponse {
    pub access_token: String,
}

/// Backend verdict on an access token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_kind: Option<SessionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validation {
    #[must_use]
    pub fn invalid() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_serialize_to_backend_shape() {
        let email = Credential::Email {
            email: "hr@acme.test".into(),
            password: "pw".into(),
        };
        assert_eq!(
            serde_json::to_value(&email).unwrap(),
            serde_json::json!({"email": "hr@acme.test", "password": "pw"})
        );

        let mobile = Credential::Mobile {
            mobile_number: "+15550100".into(),
            password: "pw".into(),
        };
        assert_eq!(
            serde_json::to_value(&mobile).unwrap(),
            serde_json::json!({"mobileNumber": "+15550100", "password": "pw"})
        );
    }

    #[test]
    fn registration_flattens_credential() {
        let registration = Registration {
            credential: Credential::Mobile {
                mobile_number: "+15550100".into(),
                password: "pw".into(),
            },
            name: "Ada".into(),
        };
        assert_eq!(
            serde_json::to_value(&registration).unwrap(),
            serde_json::json!({"mobileNumber": "+15550100", "password": "pw", "name": "Ada"})
        );
    }

    #[test]
    fn debug_redacts_password() {
        let credential = Credential::Email {
            email: "hr@acme.test".into(),
            password: "hunter2".into(),
        };
        let rendered = format!("{credential:?}");
        assert!(rendered.contains("hr@acme.test"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn credential_kinds() {
        let email = Credential::Email {
            email: String::new(),
            password: String::new(),
        };
        assert_eq!(email.kind(), SessionKind::Employer);
    }
}
