use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::reset::ResetTokenGenerator;
use crate::reset::ResetTokenPair;
use crate::session::JwtHandler;
use crate::session::SessionClaims;
use crate::session::SessionTokenError;

/// Authentication coordinator combining password verification and session
/// token generation.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    session_ttl_days: i64,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Session token error: {0}")]
    SessionTokenError(#[from] SessionTokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for session token signing
    /// * `session_ttl_days` - Session lifetime in days
    pub fn new(jwt_secret: &[u8], session_ttl_days: i64) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            session_ttl_days,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// Malformed stored hashes verify false.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and generate a session token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `identity_id` - Identity to bind the session to
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `SessionTokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        identity_id: impl ToString,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_session(identity_id)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Generate a session token without password verification.
    ///
    /// Used after signup, where the password was just set by the caller.
    ///
    /// # Errors
    /// * `SessionTokenError` - Token generation failed
    pub fn issue_session(&self, identity_id: impl ToString) -> Result<String, SessionTokenError> {
        let claims = SessionClaims::for_identity(identity_id, self.session_ttl_days);
        self.jwt_handler.encode(&claims)
    }

    /// Validate a session token and return the embedded identity identifier.
    ///
    /// # Errors
    /// * `TokenExpired` - Expiry has passed
    /// * `InvalidToken` - Signature mismatch or malformed token
    pub fn validate_session(&self, token: &str) -> Result<String, SessionTokenError> {
        self.jwt_handler.decode(token).map(|claims| claims.sub)
    }

    /// Issue a password-reset token pair.
    ///
    /// The plaintext goes to the user; only the hash may be persisted.
    pub fn issue_reset_token(&self) -> ResetTokenPair {
        ResetTokenGenerator::issue()
    }

    /// Digest a submitted reset token for lookup against the stored hash.
    pub fn hash_reset_token(&self, plaintext: &str) -> String {
        ResetTokenGenerator::hash(plaintext)
    }
}
