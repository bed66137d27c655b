//! Authentication types for JWT and tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a token is good for.
///
/// Access tokens authenticate API calls; refresh tokens are only
/// accepted by the token rotation endpoint. Encoding the kind in the
/// claims keeps a leaked refresh token from doubling as an API
/// credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived API credential.
    Access,
    /// Long-lived credential for token rotation only.
    Refresh,
}

/// JWT claims carried by both token kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Company ID (tenant context).
    pub company: Uuid,
    /// User's role (`admin` or `user`).
    pub role: String,
    /// Token kind.
    pub kind: TokenKind,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(
        user_id: Uuid,
        company_id: Uuid,
        role: &str,
        kind: TokenKind,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            company: company_id,
            role: role.to_string(),
            kind,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the company ID from claims.
    #[must_use]
    pub const fn company_id(&self) -> Uuid {
        self.company
    }

    /// Whether this token authenticates API calls.
    #[must_use]
    pub fn is_access(&self) -> bool {
        self.kind == TokenKind::Access
    }

    /// Whether this token may be exchanged for a fresh pair.
    #[must_use]
    pub fn is_refresh(&self) -> bool {
        self.kind == TokenKind::Refresh
    }
}

/// Token pair returned after successful authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access token (short-lived).
    pub access_token: String,
    /// Refresh token (long-lived).
    pub refresh_token: String,
    /// Access token expiration in seconds.
    pub expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair.
    #[must_use]
    pub const fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_accessors() {
        let user_id = Uuid::new_v4();
        let company_id = Uuid::new_v4();
        let claims = Claims::new(user_id, company_id, "admin", TokenKind::Access, Utc::now());

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.company_id(), company_id);
        assert_eq!(claims.role, "admin");
        assert!(claims.is_access());
        assert!(!claims.is_refresh());
    }

    #[test]
    fn test_refresh_kind() {
        let claims = Claims::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "user",
            TokenKind::Refresh,
            Utc::now(),
        );
        assert!(claims.is_refresh());
        assert!(!claims.is_access());
    }
}
