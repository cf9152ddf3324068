use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;

use crate::domain::identity::models::AuthenticatedSession;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::SignupCommand;
use crate::domain::identity::models::UpdateProfileCommand;
use crate::identity::errors::IdentityError;
use crate::identity::ports::IdentityRepository;
use crate::identity::ports::IdentityServicePort;
use crate::identity::ports::MailSender;

/// How long a password-reset token stays valid.
const RESET_TOKEN_TTL_MINUTES: i64 = 10;

/// Domain service implementation for identity operations.
///
/// Orchestrates the credential store, the password hasher, the token
/// service, and the mail sender. All collaborators are injected at
/// construction, so tests can substitute fakes.
pub struct IdentityService<IR, MS>
where
    IR: IdentityRepository,
    MS: MailSender,
{
    repository: Arc<IR>,
    mail_sender: Arc<MS>,
    authenticator: Arc<auth::Authenticator>,
    frontend_url: String,
}

impl<IR, MS> IdentityService<IR, MS>
where
    IR: IdentityRepository,
    MS: MailSender,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Identity persistence implementation
    /// * `mail_sender` - Outbound mail implementation
    /// * `authenticator` - Password hashing and token issuance
    /// * `frontend_url` - Base URL embedded in reset links
    pub fn new(
        repository: Arc<IR>,
        mail_sender: Arc<MS>,
        authenticator: Arc<auth::Authenticator>,
        frontend_url: String,
    ) -> Self {
        Self {
            repository,
            mail_sender,
            authenticator,
            frontend_url,
        }
    }

    fn reset_mail_body(&self, reset_url: &str) -> String {
        format!(
            "<h1>You requested a password reset</h1>\
             <p>Click this <a href=\"{}\">link</a> to reset your password</p>\
             <p>This link will expire in {} minutes</p>\
             <p>If you didn't request this, please ignore this email</p>",
            reset_url, RESET_TOKEN_TTL_MINUTES
        )
    }
}

#[async_trait]
impl<IR, MS> IdentityServicePort for IdentityService<IR, MS>
where
    IR: IdentityRepository,
    MS: MailSender,
{
    async fn signup(&self, command: SignupCommand) -> Result<AuthenticatedSession, IdentityError> {
        if let Some(existing) = self.repository.find_by_email(command.email.as_str()).await? {
            return Err(IdentityError::EmailAlreadyExists(
                existing.email.as_str().to_string(),
            ));
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;

        let identity = Identity {
            id: IdentityId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            role: command.role,
            phone: None,
            skills: Vec::new(),
            company_id: None,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: Utc::now(),
        };

        let created = self.repository.create(identity).await?;
        let token = self.authenticator.issue_session(created.id)?;

        Ok(AuthenticatedSession {
            token,
            identity: created,
        })
    }

    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<AuthenticatedSession, IdentityError> {
        let identity = self
            .repository
            .find_by_email(email.as_str())
            .await?
            .ok_or_else(|| IdentityError::NotFound(email.as_str().to_string()))?;

        let result = self
            .authenticator
            .authenticate(password, &identity.password_hash, identity.id)
            .map_err(|e| match e {
                auth::AuthenticationError::InvalidCredentials => IdentityError::InvalidCredentials,
                auth::AuthenticationError::PasswordError(err) => {
                    IdentityError::Hashing(err.to_string())
                }
                auth::AuthenticationError::SessionTokenError(err) => {
                    IdentityError::Unknown(format!("Session token error: {}", err))
                }
            })?;

        Ok(AuthenticatedSession {
            token: result.access_token,
            identity,
        })
    }

    async fn get_identity(&self, id: &IdentityId) -> Result<Identity, IdentityError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(IdentityError::NotFound(id.to_string()))
    }

    async fn update_profile(
        &self,
        id: &IdentityId,
        command: UpdateProfileCommand,
    ) -> Result<Identity, IdentityError> {
        let mut identity = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(IdentityError::NotFound(id.to_string()))?;

        if let Some(new_name) = command.name {
            identity.name = new_name;
        }

        if let Some(new_email) = command.email {
            identity.email = new_email;
        }

        if let Some(new_phone) = command.phone {
            identity.phone = Some(new_phone);
        }

        if let Some(new_skills) = command.skills {
            identity.skills = new_skills;
        }

        self.repository.update(identity).await
    }

    async fn change_password(
        &self,
        id: &IdentityId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        let mut identity = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(IdentityError::NotFound(id.to_string()))?;

        if !self
            .authenticator
            .verify_password(old_password, &identity.password_hash)
        {
            return Err(IdentityError::InvalidCredentials);
        }

        identity.password_hash = self.authenticator.hash_password(new_password)?;
        self.repository.update(identity).await?;

        Ok(())
    }

    async fn request_password_reset(&self, email: &EmailAddress) -> Result<(), IdentityError> {
        let identity = self
            .repository
            .find_by_email(email.as_str())
            .await?
            .ok_or_else(|| IdentityError::NotFound(email.as_str().to_string()))?;

        let pair = self.authenticator.issue_reset_token();
        let expires_at = Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES);

        // Overwrites any pending token: at most one is live per identity
        self.repository
            .save_reset_token(&identity.id, &pair.hash, expires_at)
            .await?;

        let reset_url = format!(
            "{}/reset-password/{}",
            self.frontend_url.trim_end_matches('/'),
            pair.plaintext
        );

        if let Err(e) = self
            .mail_sender
            .send(
                identity.email.as_str(),
                "Password Reset Request",
                &self.reset_mail_body(&reset_url),
            )
            .await
        {
            tracing::error!(
                identity_id = %identity.id,
                "Failed to send password reset mail: {}",
                e
            );
        }

        Ok(())
    }

    async fn reset_password(
        &self,
        token_plaintext: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        let token_hash = self.authenticator.hash_reset_token(token_plaintext);
        let new_password_hash = self.authenticator.hash_password(new_password)?;

        self.repository
            .consume_reset_token(&token_hash, &new_password_hash)
            .await?
            .ok_or(IdentityError::InvalidOrExpiredResetToken)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::identity::models::Role;
    use crate::identity::errors::MailError;

    mock! {
        pub TestIdentityRepository {}

        #[async_trait]
        impl IdentityRepository for TestIdentityRepository {
            async fn create(&self, identity: Identity) -> Result<Identity, IdentityError>;
            async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError>;
            async fn update(&self, identity: Identity) -> Result<Identity, IdentityError>;
            async fn save_reset_token(
                &self,
                id: &IdentityId,
                token_hash: &str,
                expires_at: DateTime<Utc>,
            ) -> Result<(), IdentityError>;
            async fn consume_reset_token(
                &self,
                token_hash: &str,
                new_password_hash: &str,
            ) -> Result<Option<Identity>, IdentityError>;
        }
    }

    mock! {
        pub TestMailSender {}

        #[async_trait]
        impl MailSender for TestMailSender {
            async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
        }
    }

    fn authenticator() -> Arc<auth::Authenticator> {
        Arc::new(auth::Authenticator::new(
            b"test-secret-key-for-jwt-signing-at-least-32-bytes",
            10,
        ))
    }

    fn service(
        repository: MockTestIdentityRepository,
        mail_sender: MockTestMailSender,
    ) -> IdentityService<MockTestIdentityRepository, MockTestMailSender> {
        IdentityService::new(
            Arc::new(repository),
            Arc::new(mail_sender),
            authenticator(),
            "http://localhost:5173".to_string(),
        )
    }

    fn candidate(email: &str, password_hash: &str) -> Identity {
        Identity {
            id: IdentityId::new(),
            name: "Test Person".to_string(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: password_hash.to_string(),
            role: Role::Candidate,
            phone: None,
            skills: Vec::new(),
            company_id: None,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_signup_success() {
        let mut repository = MockTestIdentityRepository::new();
        let mail_sender = MockTestMailSender::new();

        repository
            .expect_find_by_email()
            .withf(|email| email == "ada@example.com")
            .times(1)
            .returning(|_| Ok(None));

        repository
            .expect_create()
            .withf(|identity| {
                identity.email.as_str() == "ada@example.com"
                    && identity.role == Role::Employer
                    && identity.password_hash.starts_with("$argon2")
                    && identity.reset_token_hash.is_none()
            })
            .times(1)
            .returning(|identity| Ok(identity));

        let service = service(repository, mail_sender);

        let command = SignupCommand::new(
            "Ada".to_string(),
            EmailAddress::new("ada@example.com".to_string()).unwrap(),
            "pass_word!".to_string(),
            Role::Employer,
        );

        let session = service.signup(command).await.expect("signup failed");

        assert!(!session.token.is_empty());
        assert_eq!(session.identity.role, Role::Employer);

        // Token binds to the created identity
        let subject = authenticator()
            .validate_session(&session.token)
            .expect("token should validate");
        assert_eq!(subject, session.identity.id.to_string());
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let mut repository = MockTestIdentityRepository::new();
        let mail_sender = MockTestMailSender::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(candidate("ada@example.com", "$argon2id$stored"))));

        repository.expect_create().times(0);

        let service = service(repository, mail_sender);

        let command = SignupCommand::new(
            "Ada".to_string(),
            EmailAddress::new("ada@example.com".to_string()).unwrap(),
            "pass_word!".to_string(),
            Role::Candidate,
        );

        let result = service.signup(command).await;
        assert!(matches!(
            result.unwrap_err(),
            IdentityError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repository = MockTestIdentityRepository::new();
        let mail_sender = MockTestMailSender::new();

        let password_hash = authenticator().hash_password("pass_word!").unwrap();
        let identity = candidate("ada@example.com", &password_hash);
        let identity_id = identity.id;

        repository
            .expect_find_by_email()
            .withf(|email| email == "ada@example.com")
            .times(1)
            .returning(move |_| Ok(Some(identity.clone())));

        let service = service(repository, mail_sender);

        let email = EmailAddress::new("ada@example.com".to_string()).unwrap();
        let session = service.login(&email, "pass_word!").await.expect("login failed");

        assert_eq!(session.identity.id, identity_id);
        assert!(!session.token.is_empty());
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repository = MockTestIdentityRepository::new();
        let mail_sender = MockTestMailSender::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository, mail_sender);

        let email = EmailAddress::new("ghost@example.com".to_string()).unwrap();
        let result = service.login(&email, "pass_word!").await;

        assert!(matches!(result.unwrap_err(), IdentityError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestIdentityRepository::new();
        let mail_sender = MockTestMailSender::new();

        let password_hash = authenticator().hash_password("Correct_Password!").unwrap();
        let identity = candidate("ada@example.com", &password_hash);

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(identity.clone())));

        let service = service(repository, mail_sender);

        let email = EmailAddress::new("ada@example.com".to_string()).unwrap();
        let result = service.login(&email, "Wrong_Password!").await;

        assert!(matches!(
            result.unwrap_err(),
            IdentityError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_request_password_reset_persists_digest_and_mails_plaintext() {
        let mut repository = MockTestIdentityRepository::new();
        let mut mail_sender = MockTestMailSender::new();

        let identity = candidate("ada@example.com", "$argon2id$stored");

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(identity.clone())));

        repository
            .expect_save_reset_token()
            .withf(|_, token_hash, expires_at| {
                // SHA-256 hex digest, expiring in the near future
                token_hash.len() == 64 && *expires_at > Utc::now()
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        mail_sender
            .expect_send()
            .withf(|to, subject, body| {
                to == "ada@example.com"
                    && subject == "Password Reset Request"
                    && body.contains("/reset-password/")
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = service(repository, mail_sender);

        let email = EmailAddress::new("ada@example.com".to_string()).unwrap();
        service
            .request_password_reset(&email)
            .await
            .expect("reset request failed");
    }

    #[tokio::test]
    async fn test_request_password_reset_unknown_email() {
        let mut repository = MockTestIdentityRepository::new();
        let mut mail_sender = MockTestMailSender::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        mail_sender.expect_send().times(0);

        let service = service(repository, mail_sender);

        let email = EmailAddress::new("ghost@example.com".to_string()).unwrap();
        let result = service.request_password_reset(&email).await;

        assert!(matches!(result.unwrap_err(), IdentityError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_request_password_reset_tolerates_mail_failure() {
        let mut repository = MockTestIdentityRepository::new();
        let mut mail_sender = MockTestMailSender::new();

        let identity = candidate("ada@example.com", "$argon2id$stored");

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(identity.clone())));
        repository
            .expect_save_reset_token()
            .times(1)
            .returning(|_, _, _| Ok(()));

        mail_sender
            .expect_send()
            .times(1)
            .returning(|_, _, _| Err(MailError::SendFailed("relay down".to_string())));

        let service = service(repository, mail_sender);

        let email = EmailAddress::new("ada@example.com".to_string()).unwrap();
        // Delivery is fire-and-forget: the operation still succeeds
        assert!(service.request_password_reset(&email).await.is_ok());
    }

    #[tokio::test]
    async fn test_reset_password_consumes_token() {
        let mut repository = MockTestIdentityRepository::new();
        let mail_sender = MockTestMailSender::new();

        let expected_hash = auth::ResetTokenGenerator::hash("submitted-token");

        repository
            .expect_consume_reset_token()
            .withf(move |token_hash, new_password_hash| {
                token_hash == expected_hash && new_password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|_, _| Ok(Some(candidate("ada@example.com", "$argon2id$new"))));

        let service = service(repository, mail_sender);

        service
            .reset_password("submitted-token", "new_pass_word!")
            .await
            .expect("reset failed");
    }

    #[tokio::test]
    async fn test_reset_password_invalid_or_spent_token() {
        let mut repository = MockTestIdentityRepository::new();
        let mail_sender = MockTestMailSender::new();

        repository
            .expect_consume_reset_token()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = service(repository, mail_sender);

        let result = service.reset_password("stale-token", "new_pass_word!").await;
        assert!(matches!(
            result.unwrap_err(),
            IdentityError::InvalidOrExpiredResetToken
        ));
    }

    #[tokio::test]
    async fn test_change_password_success() {
        let mut repository = MockTestIdentityRepository::new();
        let mail_sender = MockTestMailSender::new();

        let old_hash = authenticator().hash_password("old_pass!").unwrap();
        let identity = candidate("ada@example.com", &old_hash);
        let identity_id = identity.id;

        repository
            .expect_find_by_id()
            .withf(move |id| *id == identity_id)
            .times(1)
            .returning(move |_| Ok(Some(identity.clone())));

        let old_hash_check = old_hash.clone();
        repository
            .expect_update()
            .withf(move |identity| {
                identity.password_hash.starts_with("$argon2")
                    && identity.password_hash != old_hash_check
            })
            .times(1)
            .returning(|identity| Ok(identity));

        let service = service(repository, mail_sender);

        service
            .change_password(&identity_id, "old_pass!", "new_pass!")
            .await
            .expect("change password failed");
    }

    #[tokio::test]
    async fn test_change_password_wrong_old_password() {
        let mut repository = MockTestIdentityRepository::new();
        let mail_sender = MockTestMailSender::new();

        let old_hash = authenticator().hash_password("old_pass!").unwrap();
        let identity = candidate("ada@example.com", &old_hash);
        let identity_id = identity.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(identity.clone())));
        repository.expect_update().times(0);

        let service = service(repository, mail_sender);

        let result = service
            .change_password(&identity_id, "not_the_old_pass", "new_pass!")
            .await;
        assert!(matches!(
            result.unwrap_err(),
            IdentityError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_update_profile_partial() {
        let mut repository = MockTestIdentityRepository::new();
        let mail_sender = MockTestMailSender::new();

        let identity = candidate("ada@example.com", "$argon2id$stored");
        let identity_id = identity.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(identity.clone())));

        repository
            .expect_update()
            .withf(|identity| {
                identity.name == "Ada Lovelace"
                    && identity.email.as_str() == "ada@example.com"
                    && identity.skills == vec!["rust".to_string()]
            })
            .times(1)
            .returning(|identity| Ok(identity));

        let service = service(repository, mail_sender);

        let command = UpdateProfileCommand {
            name: Some("Ada Lovelace".to_string()),
            email: None,
            phone: None,
            skills: Some(vec!["rust".to_string()]),
        };

        let updated = service
            .update_profile(&identity_id, command)
            .await
            .expect("update failed");
        assert_eq!(updated.name, "Ada Lovelace");
    }
}
