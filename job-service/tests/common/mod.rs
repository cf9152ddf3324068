use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::DateTime;
use chrono::Utc;
use job_service::application::errors::ApplicationError;
use job_service::application::ports::ApplicationRepository;
use job_service::application::ports::ApplicationServicePort;
use job_service::domain::application::models::Application;
use job_service::domain::application::models::ApplicationId;
use job_service::domain::application::models::ApplicationStatus;
use job_service::domain::application::service::ApplicationService;
use job_service::domain::identity::models::Identity;
use job_service::domain::identity::models::IdentityId;
use job_service::domain::identity::service::IdentityService;
use job_service::domain::job::models::Job;
use job_service::domain::job::models::JobFilter;
use job_service::domain::job::models::JobId;
use job_service::domain::job::service::JobService;
use job_service::domain::ticket::models::Ticket;
use job_service::domain::ticket::service::TicketService;
use job_service::identity::errors::IdentityError;
use job_service::identity::errors::MailError;
use job_service::identity::ports::IdentityRepository;
use job_service::identity::ports::IdentityServicePort;
use job_service::identity::ports::MailSender;
use job_service::inbound::http::router::create_router;
use job_service::job::errors::JobError;
use job_service::job::ports::JobRepository;
use job_service::job::ports::JobServicePort;
use job_service::ticket::errors::TicketError;
use job_service::ticket::ports::TicketRepository;
use job_service::ticket::ports::TicketServicePort;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns the real router over in-memory adapters.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub mailbox: Arc<RecordingMailSender>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(TEST_JWT_SECRET, 10));

        let identity_repository = Arc::new(InMemoryIdentityRepository::new());
        let job_repository = Arc::new(InMemoryJobRepository::new());
        let application_repository = Arc::new(InMemoryApplicationRepository::new());
        let ticket_repository = Arc::new(InMemoryTicketRepository::new());
        let mailbox = Arc::new(RecordingMailSender::new());

        let identity_service: Arc<dyn IdentityServicePort> = Arc::new(IdentityService::new(
            identity_repository,
            Arc::clone(&mailbox),
            Arc::clone(&authenticator),
            "http://localhost:5173".to_string(),
        ));
        let job_service: Arc<dyn JobServicePort> =
            Arc::new(JobService::new(Arc::clone(&job_repository)));
        let application_service: Arc<dyn ApplicationServicePort> = Arc::new(
            ApplicationService::new(application_repository, job_repository),
        );
        let ticket_service: Arc<dyn TicketServicePort> =
            Arc::new(TicketService::new(ticket_repository));

        let router = create_router(
            identity_service,
            job_service,
            application_service,
            ticket_service,
            authenticator,
        );

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            mailbox,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Most recent mail handed to the relay, if any.
    pub fn last_mail(&self) -> Option<SentMail> {
        self.mailbox.sent.lock().unwrap().last().cloned()
    }
}

/// A mail captured instead of delivered.
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl SentMail {
    /// Pull the plaintext reset token out of the reset link.
    pub fn reset_token(&self) -> Option<String> {
        let tail = self.body.split("/reset-password/").nth(1)?;
        let token = tail.split('"').next()?;
        Some(token.to_string())
    }
}

/// Mail sender that records instead of sending.
pub struct RecordingMailSender {
    pub sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MailSender for RecordingMailSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// Identity store over a mutex-guarded map.
///
/// The mutex gives the same effective guarantees the database constraints
/// do: unique emails, and atomic reset-token consumption.
pub struct InMemoryIdentityRepository {
    identities: Mutex<HashMap<uuid::Uuid, Identity>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self {
            identities: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        let mut identities = self.identities.lock().unwrap();

        if identities
            .values()
            .any(|existing| existing.email.as_str() == identity.email.as_str())
        {
            return Err(IdentityError::EmailAlreadyExists(
                identity.email.as_str().to_string(),
            ));
        }

        identities.insert(identity.id.0, identity.clone());
        Ok(identity)
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError> {
        Ok(self.identities.lock().unwrap().get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        Ok(self
            .identities
            .lock()
            .unwrap()
            .values()
            .find(|identity| identity.email.as_str() == email)
            .cloned())
    }

    async fn update(&self, identity: Identity) -> Result<Identity, IdentityError> {
        let mut identities = self.identities.lock().unwrap();

        if identities
            .values()
            .any(|existing| existing.id != identity.id
                && existing.email.as_str() == identity.email.as_str())
        {
            return Err(IdentityError::EmailAlreadyExists(
                identity.email.as_str().to_string(),
            ));
        }

        if !identities.contains_key(&identity.id.0) {
            return Err(IdentityError::NotFound(identity.id.to_string()));
        }

        identities.insert(identity.id.0, identity.clone());
        Ok(identity)
    }

    async fn save_reset_token(
        &self,
        id: &IdentityId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), IdentityError> {
        let mut identities = self.identities.lock().unwrap();

        let identity = identities
            .get_mut(&id.0)
            .ok_or(IdentityError::NotFound(id.to_string()))?;

        identity.reset_token_hash = Some(token_hash.to_string());
        identity.reset_token_expires_at = Some(expires_at);
        Ok(())
    }

    async fn consume_reset_token(
        &self,
        token_hash: &str,
        new_password_hash: &str,
    ) -> Result<Option<Identity>, IdentityError> {
        let mut identities = self.identities.lock().unwrap();
        let now = Utc::now();

        let matched = identities.values_mut().find(|identity| {
            identity.reset_token_hash.as_deref() == Some(token_hash)
                && identity.reset_token_expires_at.map_or(false, |t| t > now)
        });

        match matched {
            Some(identity) => {
                identity.password_hash = new_password_hash.to_string();
                identity.reset_token_hash = None;
                identity.reset_token_expires_at = None;
                Ok(Some(identity.clone()))
            }
            None => Ok(None),
        }
    }
}

/// Job store over a mutex-guarded map.
pub struct InMemoryJobRepository {
    jobs: Mutex<HashMap<uuid::Uuid, Job>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(HashMap::new()),
        }
    }

    fn matches(job: &Job, filter: &JobFilter) -> bool {
        if let Some(search) = &filter.search {
            let needle = search.to_lowercase();
            if !job.title.to_lowercase().contains(&needle)
                && !job.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(category) = &filter.category {
            if &job.category != category {
                return false;
            }
        }
        if let Some(location) = &filter.location {
            if job.location.as_deref() != Some(location.as_str()) {
                return false;
            }
        }
        if let Some(salary) = filter.salary {
            if job.salary != Some(salary) {
                return false;
            }
        }
        if let Some(employment_type) = filter.employment_type {
            if job.employment_type != employment_type {
                return false;
            }
        }
        if let Some(work_experience) = &filter.work_experience {
            if &job.work_experience != work_experience {
                return false;
            }
        }
        if let Some(cutoff) = filter.posted_within.and_then(|w| w.cutoff(Utc::now())) {
            if job.posted_at < cutoff {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn create(&self, job: Job) -> Result<Job, JobError> {
        self.jobs.lock().unwrap().insert(job.id.0, job.clone());
        Ok(job)
    }

    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, JobError> {
        Ok(self.jobs.lock().unwrap().get(&id.0).cloned())
    }

    async fn find_filtered(&self, filter: &JobFilter) -> Result<(Vec<Job>, i64), JobError> {
        let jobs = self.jobs.lock().unwrap();

        let mut matched: Vec<Job> = jobs
            .values()
            .filter(|job| Self::matches(job, filter))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));

        let total = matched.len() as i64;
        let page: Vec<Job> = matched
            .into_iter()
            .skip(filter.offset() as usize)
            .take(filter.limit() as usize)
            .collect();

        Ok((page, total))
    }

    async fn find_by_employer(&self, employer_id: &IdentityId) -> Result<Vec<Job>, JobError> {
        let mut owned: Vec<Job> = self
            .jobs
            .lock()
            .unwrap()
            .values()
            .filter(|job| job.employer_id == *employer_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        Ok(owned)
    }

    async fn update(&self, job: Job) -> Result<Job, JobError> {
        let mut jobs = self.jobs.lock().unwrap();
        if !jobs.contains_key(&job.id.0) {
            return Err(JobError::NotFound(job.id.to_string()));
        }
        jobs.insert(job.id.0, job.clone());
        Ok(job)
    }

    async fn delete(&self, id: &JobId) -> Result<(), JobError> {
        let mut jobs = self.jobs.lock().unwrap();
        if jobs.remove(&id.0).is_none() {
            return Err(JobError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Application store over a mutex-guarded map.
///
/// Enforces the (candidate, job) uniqueness the database constraint would.
pub struct InMemoryApplicationRepository {
    applications: Mutex<HashMap<uuid::Uuid, Application>>,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self {
            applications: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn create(&self, application: Application) -> Result<Application, ApplicationError> {
        let mut applications = self.applications.lock().unwrap();

        if applications.values().any(|existing| {
            existing.candidate_id == application.candidate_id
                && existing.job_id == application.job_id
        }) {
            return Err(ApplicationError::AlreadyApplied);
        }

        applications.insert(application.id.0, application.clone());
        Ok(application)
    }

    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationError> {
        Ok(self.applications.lock().unwrap().get(&id.0).cloned())
    }

    async fn find_by_candidate_and_job(
        &self,
        candidate_id: &IdentityId,
        job_id: &JobId,
    ) -> Result<Option<Application>, ApplicationError> {
        Ok(self
            .applications
            .lock()
            .unwrap()
            .values()
            .find(|application| {
                application.candidate_id == *candidate_id && application.job_id == *job_id
            })
            .cloned())
    }

    async fn find_by_candidate(
        &self,
        candidate_id: &IdentityId,
    ) -> Result<Vec<Application>, ApplicationError> {
        let mut owned: Vec<Application> = self
            .applications
            .lock()
            .unwrap()
            .values()
            .filter(|application| application.candidate_id == *candidate_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
        Ok(owned)
    }

    async fn find_by_job(&self, job_id: &JobId) -> Result<Vec<Application>, ApplicationError> {
        let mut owned: Vec<Application> = self
            .applications
            .lock()
            .unwrap()
            .values()
            .filter(|application| application.job_id == *job_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
        Ok(owned)
    }

    async fn list_all(&self) -> Result<Vec<Application>, ApplicationError> {
        let mut all: Vec<Application> = self
            .applications
            .lock()
            .unwrap()
            .values()
            .cloned()
            .collect();
        all.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
        Ok(all)
    }

    async fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, ApplicationError> {
        let mut applications = self.applications.lock().unwrap();

        let application = applications
            .get_mut(&id.0)
            .ok_or(ApplicationError::NotFound(id.to_string()))?;

        application.status = status;
        application.updated_at = Utc::now();
        Ok(application.clone())
    }
}

/// Ticket store over a mutex-guarded vec.
pub struct InMemoryTicketRepository {
    tickets: Mutex<Vec<Ticket>>,
}

impl InMemoryTicketRepository {
    pub fn new() -> Self {
        Self {
            tickets: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn create(&self, ticket: Ticket) -> Result<Ticket, TicketError> {
        self.tickets.lock().unwrap().push(ticket.clone());
        Ok(ticket)
    }

    async fn list_all(&self) -> Result<Vec<Ticket>, TicketError> {
        let mut all = self.tickets.lock().unwrap().clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}
