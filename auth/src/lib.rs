//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for the job board:
//! - Password hashing (Argon2id)
//! - Session token generation and validation (JWT)
//! - Single-use password-reset tokens, persisted as digests
//! - Authentication coordination
//!
//! The service crate defines its own domain traits and adapts these
//! implementations, so domain logic never depends on a concrete algorithm.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{JwtHandler, SessionClaims};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = SessionClaims::for_identity("user123", 10);
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", 10);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! // Validate token
//! let identity_id = auth.validate_session(&result.access_token).unwrap();
//! assert_eq!(identity_id, "user123");
//! ```

pub mod authenticator;
pub mod password;
pub mod reset;
pub mod session;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use reset::ResetTokenGenerator;
pub use reset::ResetTokenPair;
pub use session::JwtHandler;
pub use session::SessionClaims;
pub use session::SessionTokenError;
