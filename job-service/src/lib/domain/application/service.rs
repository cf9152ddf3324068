use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::ApplicationError;
use super::models::Application;
use super::models::ApplicationId;
use super::models::ApplicationStatus;
use super::models::ResumeLink;
use super::ports::ApplicationRepository;
use super::ports::ApplicationServicePort;
use crate::domain::authz;
use crate::domain::identity::models::Identity;
use crate::domain::job::models::JobId;
use crate::domain::job::ports::JobRepository;

/// Concrete implementation of ApplicationServicePort.
///
/// Needs the job repository as well: creation validates the job exists, and
/// status changes authorize against the job's owning employer.
pub struct ApplicationService<AR, JR>
where
    AR: ApplicationRepository,
    JR: JobRepository,
{
    applications: Arc<AR>,
    jobs: Arc<JR>,
}

impl<AR, JR> ApplicationService<AR, JR>
where
    AR: ApplicationRepository,
    JR: JobRepository,
{
    pub fn new(applications: Arc<AR>, jobs: Arc<JR>) -> Self {
        Self { applications, jobs }
    }
}

#[async_trait]
impl<AR, JR> ApplicationServicePort for ApplicationService<AR, JR>
where
    AR: ApplicationRepository,
    JR: JobRepository,
{
    async fn apply(
        &self,
        acting: &Identity,
        job_id: &JobId,
        resume_url: ResumeLink,
    ) -> Result<Application, ApplicationError> {
        // Lookup-before-insert; the unique (candidate, job) constraint in
        // storage closes the remaining race window.
        if self
            .applications
            .find_by_candidate_and_job(&acting.id, job_id)
            .await?
            .is_some()
        {
            return Err(ApplicationError::AlreadyApplied);
        }

        self.jobs
            .find_by_id(job_id)
            .await
            .map_err(|e| ApplicationError::Unknown(e.to_string()))?
            .ok_or(ApplicationError::JobNotFound(job_id.to_string()))?;

        let now = Utc::now();
        let application = Application {
            id: ApplicationId::new(),
            candidate_id: acting.id,
            job_id: *job_id,
            resume_url,
            // Always starts pending, whatever the caller sent
            status: ApplicationStatus::Pending,
            applied_at: now,
            created_at: now,
            updated_at: now,
        };

        self.applications.create(application).await
    }

    async fn set_status(
        &self,
        id: &ApplicationId,
        new_status: ApplicationStatus,
        acting: &Identity,
    ) -> Result<Application, ApplicationError> {
        let application = self
            .applications
            .find_by_id(id)
            .await?
            .ok_or(ApplicationError::NotFound(id.to_string()))?;

        let job = self
            .jobs
            .find_by_id(&application.job_id)
            .await
            .map_err(|e| ApplicationError::Unknown(e.to_string()))?
            .ok_or(ApplicationError::JobNotFound(application.job_id.to_string()))?;

        authz::require_owner_or_admin(acting, &job.employer_id)?;

        self.applications.update_status(id, new_status).await
    }

    async fn list_for_candidate(
        &self,
        acting: &Identity,
    ) -> Result<Vec<Application>, ApplicationError> {
        self.applications.find_by_candidate(&acting.id).await
    }

    async fn list_for_job(
        &self,
        acting: &Identity,
        job_id: &JobId,
    ) -> Result<Vec<Application>, ApplicationError> {
        let job = self
            .jobs
            .find_by_id(job_id)
            .await
            .map_err(|e| ApplicationError::Unknown(e.to_string()))?
            .ok_or(ApplicationError::JobNotFound(job_id.to_string()))?;

        authz::require_owner_or_admin(acting, &job.employer_id)?;

        self.applications.find_by_job(job_id).await
    }

    async fn list_all(&self, acting: &Identity) -> Result<Vec<Application>, ApplicationError> {
        authz::require_any_role(acting, authz::ADMIN_ONLY)?;

        self.applications.list_all().await
    }
}
