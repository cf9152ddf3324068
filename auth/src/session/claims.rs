use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a session token.
///
/// The token is stateless: the subject is the identity identifier and the
/// expiry is absolute. Nothing else is embedded, so the server resolves the
/// identity record on every request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (identity identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl SessionClaims {
    /// Create session claims for an identity with an expiry `ttl_days` from now.
    ///
    /// # Arguments
    /// * `identity_id` - Unique identity identifier
    /// * `ttl_days` - Days until the session expires
    pub fn for_identity(identity_id: impl ToString, ttl_days: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::days(ttl_days);

        Self {
            sub: identity_id.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Build claims with an explicit expiry timestamp.
    ///
    /// Used by tests to simulate clock advancement.
    pub fn with_expiration(identity_id: impl ToString, exp: i64) -> Self {
        Self {
            sub: identity_id.to_string(),
            exp,
            iat: Utc::now().timestamp(),
        }
    }
}
