use async_trait::async_trait;

use crate::application::errors::ApplicationError;
use crate::domain::application::models::Application;
use crate::domain::application::models::ApplicationId;
use crate::domain::application::models::ApplicationStatus;
use crate::domain::application::models::ResumeLink;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::job::models::JobId;

/// Port for application domain service operations.
#[async_trait]
pub trait ApplicationServicePort: Send + Sync + 'static {
    /// Submit an application for a job on behalf of the acting identity.
    ///
    /// The stored status is always `pending`, whatever the caller supplied.
    ///
    /// # Errors
    /// * `AlreadyApplied` - An application for this (candidate, job) exists
    /// * `JobNotFound` - Job does not exist
    /// * `DatabaseError` - Database operation failed
    async fn apply(
        &self,
        acting: &Identity,
        job_id: &JobId,
        resume_url: ResumeLink,
    ) -> Result<Application, ApplicationError>;

    /// Move an application to a new status.
    ///
    /// Permitted to admins and to the employer owning the application's
    /// job. Any source status may move to any target status.
    ///
    /// # Errors
    /// * `NotFound` - Application does not exist
    /// * `JobNotFound` - The application's job no longer resolves
    /// * `AccessDenied` - Acting identity neither owns the job nor is admin
    /// * `DatabaseError` - Database operation failed
    async fn set_status(
        &self,
        id: &ApplicationId,
        new_status: ApplicationStatus,
        acting: &Identity,
    ) -> Result<Application, ApplicationError>;

    /// List the acting identity's own applications, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_for_candidate(
        &self,
        acting: &Identity,
    ) -> Result<Vec<Application>, ApplicationError>;

    /// List applications for a job; owner or admin only, newest first.
    ///
    /// # Errors
    /// * `JobNotFound` - Job does not exist
    /// * `AccessDenied` - Acting identity neither owns the job nor is admin
    /// * `DatabaseError` - Database operation failed
    async fn list_for_job(
        &self,
        acting: &Identity,
        job_id: &JobId,
    ) -> Result<Vec<Application>, ApplicationError>;

    /// List every application; admin only.
    ///
    /// # Errors
    /// * `AccessDenied` - Acting identity is not admin
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self, acting: &Identity) -> Result<Vec<Application>, ApplicationError>;
}

/// Persistence operations for the application aggregate.
#[async_trait]
pub trait ApplicationRepository: Send + Sync + 'static {
    /// Persist a new application.
    ///
    /// Storage enforces uniqueness of (candidate, job): under a race with
    /// another insert for the same pair, exactly one succeeds and the other
    /// maps to `AlreadyApplied`.
    ///
    /// # Errors
    /// * `AlreadyApplied` - An application for this (candidate, job) exists
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, application: Application) -> Result<Application, ApplicationError>;

    /// Retrieve an application by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationError>;

    /// Retrieve the application a candidate made for a job, if any.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_candidate_and_job(
        &self,
        candidate_id: &IdentityId,
        job_id: &JobId,
    ) -> Result<Option<Application>, ApplicationError>;

    /// Retrieve a candidate's applications, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_candidate(
        &self,
        candidate_id: &IdentityId,
    ) -> Result<Vec<Application>, ApplicationError>;

    /// Retrieve a job's applications, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_job(&self, job_id: &JobId) -> Result<Vec<Application>, ApplicationError>;

    /// Retrieve every application, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Application>, ApplicationError>;

    /// Persist a status change.
    ///
    /// # Errors
    /// * `NotFound` - Application does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, ApplicationError>;
}
