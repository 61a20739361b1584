//! Session kinds and token pairs.
//!
//! Two identities can be signed in at the same time: an employer (the primary
//! session) and a candidate (the secondary session). Each owns its own token
//! pair and is refreshed independently.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// SessionKind
// ---------------------------------------------------------------------------

/// Which identity a token pair belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    /// Organization-side identity. Wins every tie-break.
    #[serde(alias = "primary")]
    Employer,
    /// Individual-side identity.
    #[serde(alias = "secondary")]
    Candidate,
}

impl SessionKind {
    /// Both kinds, primary first.
    pub const ALL: [Self; 2] = [Self::Employer, Self::Candidate];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employer => "employer",
            Self::Candidate => "candidate",
        }
    }

    /// Header carrying the plain subject id for endpoints that predate bearer auth.
    #[must_use]
    pub const fn legacy_id_header(self) -> &'static str {
        match self {
            Self::Employer => "x-employer-id",
            Self::Candidate => "x-candidate-id",
        }
    }

    /// The other kind.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Employer => Self::Candidate,
            Self::Candidate => Self::Employer,
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "employer" | "primary" => Ok(Self::Employer),
            "candidate" | "secondary" => Ok(Self::Candidate),
            _ => Err(CoreError::UnknownSessionKind(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// TokenKind
// ---------------------------------------------------------------------------

/// Role of a token within a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    #[default]
    Access,
    Refresh,
}

impl TokenKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TokenPair
// ---------------------------------------------------------------------------

/// Access and refresh token issued together for one session kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Token string for the given role.
    #[must_use]
    pub fn get(&self, role: TokenKind) -> &str {
        match role {
            TokenKind::Access => &self.access_token,
            TokenKind::Refresh => &self.refresh_token,
        }
    }
}
