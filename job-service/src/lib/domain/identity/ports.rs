use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::identity::models::AuthenticatedSession;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::SignupCommand;
use crate::domain::identity::models::UpdateProfileCommand;
use crate::identity::errors::IdentityError;
use crate::identity::errors::MailError;

/// Port for identity domain service operations.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new identity and open a session for it.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn signup(&self, command: SignupCommand) -> Result<AuthenticatedSession, IdentityError>;

    /// Authenticate by email and password and open a session.
    ///
    /// # Errors
    /// * `NotFound` - No identity with this email
    /// * `InvalidCredentials` - Password does not verify
    /// * `DatabaseError` - Database operation failed
    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<AuthenticatedSession, IdentityError>;

    /// Retrieve an identity by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_identity(&self, id: &IdentityId) -> Result<Identity, IdentityError>;

    /// Update profile fields; omitted fields stay unchanged.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        id: &IdentityId,
        command: UpdateProfileCommand,
    ) -> Result<Identity, IdentityError>;

    /// Replace the password after verifying the current one.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `InvalidCredentials` - Current password does not verify
    /// * `DatabaseError` - Database operation failed
    async fn change_password(
        &self,
        id: &IdentityId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), IdentityError>;

    /// Issue a reset token for the identity with this email and mail it out.
    ///
    /// Overwrites any pending reset token. Mail delivery failure is logged,
    /// not surfaced.
    ///
    /// # Errors
    /// * `NotFound` - No identity with this email
    /// * `DatabaseError` - Database operation failed
    async fn request_password_reset(&self, email: &EmailAddress) -> Result<(), IdentityError>;

    /// Consume a reset token and set a new password.
    ///
    /// Consumption is atomic: the password is replaced and the stored token
    /// digest and expiry are cleared in the same persistence operation, so a
    /// token can never be spent twice.
    ///
    /// # Errors
    /// * `InvalidOrExpiredResetToken` - No identity holds a live matching token
    /// * `DatabaseError` - Database operation failed
    async fn reset_password(
        &self,
        token_plaintext: &str,
        new_password: &str,
    ) -> Result<(), IdentityError>;
}

/// Persistence operations for the identity aggregate.
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Persist a new identity.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError>;

    /// Retrieve an identity by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError>;

    /// Retrieve an identity by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError>;

    /// Update an existing identity.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, identity: Identity) -> Result<Identity, IdentityError>;

    /// Store a reset token digest and expiry, replacing any pending one.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `DatabaseError` - Database operation failed
    async fn save_reset_token(
        &self,
        id: &IdentityId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), IdentityError>;

    /// Atomically consume a live reset token.
    ///
    /// In one conditional update: match an identity whose stored digest
    /// equals `token_hash` and whose expiry is in the future, set its
    /// password hash to `new_password_hash`, and clear both reset fields.
    /// Returns the updated identity, or None when no identity matched.
    /// Under a race exactly one caller gets Some.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn consume_reset_token(
        &self,
        token_hash: &str,
        new_password_hash: &str,
    ) -> Result<Option<Identity>, IdentityError>;
}

/// Outbound mail delivery.
///
/// Fire-and-forget: the domain never depends on delivery success beyond
/// logging the failure.
#[async_trait]
pub trait MailSender: Send + Sync + 'static {
    /// Send a message.
    ///
    /// # Errors
    /// * `SendFailed` - The relay rejected or never received the message
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}
