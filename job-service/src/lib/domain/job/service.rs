use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::JobError;
use super::models::CreateJobCommand;
use super::models::Job;
use super::models::JobFilter;
use super::models::JobId;
use super::models::JobPage;
use super::models::UpdateJobCommand;
use super::models::DEFAULT_WORK_EXPERIENCE;
use super::ports::JobRepository;
use super::ports::JobServicePort;
use crate::domain::authz;
use crate::domain::identity::models::Identity;

/// Concrete implementation of JobServicePort.
///
/// Generic over the repository for testability.
pub struct JobService<JR>
where
    JR: JobRepository,
{
    repository: Arc<JR>,
}

impl<JR> JobService<JR>
where
    JR: JobRepository,
{
    pub fn new(repository: Arc<JR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<JR> JobServicePort for JobService<JR>
where
    JR: JobRepository,
{
    async fn post_job(
        &self,
        acting: &Identity,
        command: CreateJobCommand,
    ) -> Result<Job, JobError> {
        authz::require_any_role(acting, authz::EMPLOYER_OR_ADMIN)?;

        let job = Job {
            id: JobId::new(),
            title: command.title,
            description: command.description,
            location: command.location,
            category: command.category,
            employer_id: acting.id,
            company_name: command.company_name,
            salary: command.salary,
            skills_required: command.skills_required,
            apply_link: command.apply_link,
            employment_type: command.employment_type,
            work_experience: command
                .work_experience
                .unwrap_or_else(|| DEFAULT_WORK_EXPERIENCE.to_string()),
            posted_at: Utc::now(),
        };

        self.repository.create(job).await
    }

    async fn search_jobs(&self, filter: JobFilter) -> Result<JobPage, JobError> {
        let (jobs, total_jobs) = self.repository.find_filtered(&filter).await?;

        let limit = filter.limit();
        let total_pages = (total_jobs + limit - 1) / limit;

        Ok(JobPage {
            jobs,
            total_jobs,
            total_pages,
            current_page: filter.page(),
        })
    }

    async fn list_my_jobs(&self, acting: &Identity) -> Result<Vec<Job>, JobError> {
        authz::require_any_role(acting, authz::EMPLOYER_OR_ADMIN)?;

        self.repository.find_by_employer(&acting.id).await
    }

    async fn update_job(
        &self,
        acting: &Identity,
        id: &JobId,
        command: UpdateJobCommand,
    ) -> Result<Job, JobError> {
        let mut job = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(JobError::NotFound(id.to_string()))?;

        authz::require_owner_or_admin(acting, &job.employer_id)?;

        if let Some(title) = command.title {
            job.title = title;
        }
        if let Some(description) = command.description {
            job.description = description;
        }
        if let Some(location) = command.location {
            job.location = Some(location);
        }
        if let Some(category) = command.category {
            job.category = category;
        }
        if let Some(company_name) = command.company_name {
            job.company_name = Some(company_name);
        }
        if let Some(salary) = command.salary {
            job.salary = Some(salary);
        }
        if let Some(skills_required) = command.skills_required {
            job.skills_required = skills_required;
        }
        if let Some(apply_link) = command.apply_link {
            job.apply_link = Some(apply_link);
        }
        if let Some(employment_type) = command.employment_type {
            job.employment_type = employment_type;
        }
        if let Some(work_experience) = command.work_experience {
            job.work_experience = work_experience;
        }

        self.repository.update(job).await
    }

    async fn delete_job(&self, acting: &Identity, id: &JobId) -> Result<(), JobError> {
        let job = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(JobError::NotFound(id.to_string()))?;

        authz::require_owner_or_admin(acting, &job.employer_id)?;

        self.repository.delete(&job.id).await
    }
}
