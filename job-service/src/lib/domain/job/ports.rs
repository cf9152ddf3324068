use async_trait::async_trait;

use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::job::models::CreateJobCommand;
use crate::domain::job::models::Job;
use crate::domain::job::models::JobFilter;
use crate::domain::job::models::JobId;
use crate::domain::job::models::JobPage;
use crate::domain::job::models::UpdateJobCommand;
use crate::job::errors::JobError;

/// Port for job domain service operations.
#[async_trait]
pub trait JobServicePort: Send + Sync + 'static {
    /// Create a posting owned by the acting identity.
    ///
    /// # Errors
    /// * `AccessDenied` - Acting identity is neither employer nor admin
    /// * `DatabaseError` - Database operation failed
    async fn post_job(&self, acting: &Identity, command: CreateJobCommand)
        -> Result<Job, JobError>;

    /// Search postings with filters and pagination. Public.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn search_jobs(&self, filter: JobFilter) -> Result<JobPage, JobError>;

    /// List postings owned by the acting identity.
    ///
    /// # Errors
    /// * `AccessDenied` - Acting identity is neither employer nor admin
    /// * `DatabaseError` - Database operation failed
    async fn list_my_jobs(&self, acting: &Identity) -> Result<Vec<Job>, JobError>;

    /// Update a posting; owner or admin only.
    ///
    /// # Errors
    /// * `NotFound` - Job does not exist
    /// * `AccessDenied` - Acting identity neither owns the job nor is admin
    /// * `DatabaseError` - Database operation failed
    async fn update_job(
        &self,
        acting: &Identity,
        id: &JobId,
        command: UpdateJobCommand,
    ) -> Result<Job, JobError>;

    /// Delete a posting; owner or admin only.
    ///
    /// # Errors
    /// * `NotFound` - Job does not exist
    /// * `AccessDenied` - Acting identity neither owns the job nor is admin
    /// * `DatabaseError` - Database operation failed
    async fn delete_job(&self, acting: &Identity, id: &JobId) -> Result<(), JobError>;
}

/// Persistence operations for the job aggregate.
#[async_trait]
pub trait JobRepository: Send + Sync + 'static {
    /// Persist a new posting.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, job: Job) -> Result<Job, JobError>;

    /// Retrieve a posting by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, JobError>;

    /// Retrieve one page of postings matching the filter, newest first,
    /// together with the total match count.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_filtered(&self, filter: &JobFilter) -> Result<(Vec<Job>, i64), JobError>;

    /// Retrieve all postings owned by an employer.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_employer(&self, employer_id: &IdentityId) -> Result<Vec<Job>, JobError>;

    /// Update an existing posting.
    ///
    /// # Errors
    /// * `NotFound` - Job does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, job: Job) -> Result<Job, JobError>;

    /// Remove a posting.
    ///
    /// # Errors
    /// * `NotFound` - Job does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &JobId) -> Result<(), JobError>;
}
