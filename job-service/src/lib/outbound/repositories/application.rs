use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::application::errors::ApplicationError;
use crate::application::ports::ApplicationRepository;
use crate::domain::application::models::Application;
use crate::domain::application::models::ApplicationId;
use crate::domain::application::models::ApplicationStatus;
use crate::domain::application::models::ResumeLink;
use crate::domain::identity::models::IdentityId;
use crate::domain::job::models::JobId;

const APPLICATION_COLUMNS: &str =
    "id, candidate_id, job_id, resume_url, status, applied_at, created_at, updated_at";

pub struct PostgresApplicationRepository {
    pool: PgPool,
}

impl PostgresApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(e: sqlx::Error) -> ApplicationError {
    ApplicationError::DatabaseError(e.to_string())
}

fn row_to_application(row: &PgRow) -> Result<Application, ApplicationError> {
    let status: String = row.try_get("status").map_err(db_err)?;

    Ok(Application {
        id: ApplicationId(row.try_get("id").map_err(db_err)?),
        candidate_id: IdentityId(row.try_get("candidate_id").map_err(db_err)?),
        job_id: JobId(row.try_get("job_id").map_err(db_err)?),
        resume_url: ResumeLink::new(row.try_get("resume_url").map_err(db_err)?)?,
        status: ApplicationStatus::from_str(&status)?,
        applied_at: row.try_get("applied_at").map_err(db_err)?,
        created_at: row.try_get("created_at").map_err(db_err)?,
        updated_at: row.try_get("updated_at").map_err(db_err)?,
    })
}

#[async_trait]
impl ApplicationRepository for PostgresApplicationRepository {
    async fn create(&self, application: Application) -> Result<Application, ApplicationError> {
        sqlx::query(
            r#"
            INSERT INTO applications
                (id, candidate_id, job_id, resume_url, status, applied_at, created_at,
                 updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(application.id.0)
        .bind(application.candidate_id.0)
        .bind(application.job_id.0)
        .bind(application.resume_url.as_str())
        .bind(application.status.as_str())
        .bind(application.applied_at)
        .bind(application.created_at)
        .bind(application.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The unique (candidate, job) constraint settles concurrent
            // duplicate applies: the losing insert lands here.
            if let Some(db_error) = e.as_database_error() {
                if db_error.is_unique_violation()
                    && db_error.constraint() == Some("applications_candidate_id_job_id_key")
                {
                    return ApplicationError::AlreadyApplied;
                }
            }
            ApplicationError::DatabaseError(e.to_string())
        })?;

        Ok(application)
    }

    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM applications WHERE id = $1",
            APPLICATION_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(row_to_application).transpose()
    }

    async fn find_by_candidate_and_job(
        &self,
        candidate_id: &IdentityId,
        job_id: &JobId,
    ) -> Result<Option<Application>, ApplicationError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM applications WHERE candidate_id = $1 AND job_id = $2",
            APPLICATION_COLUMNS
        ))
        .bind(candidate_id.0)
        .bind(job_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(row_to_application).transpose()
    }

    async fn find_by_candidate(
        &self,
        candidate_id: &IdentityId,
    ) -> Result<Vec<Application>, ApplicationError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM applications WHERE candidate_id = $1 ORDER BY applied_at DESC",
            APPLICATION_COLUMNS
        ))
        .bind(candidate_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_application).collect()
    }

    async fn find_by_job(&self, job_id: &JobId) -> Result<Vec<Application>, ApplicationError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM applications WHERE job_id = $1 ORDER BY applied_at DESC",
            APPLICATION_COLUMNS
        ))
        .bind(job_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_application).collect()
    }

    async fn list_all(&self) -> Result<Vec<Application>, ApplicationError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM applications ORDER BY applied_at DESC",
            APPLICATION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_application).collect()
    }

    async fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, ApplicationError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE applications
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(id.0)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref()
            .map(row_to_application)
            .transpose()?
            .ok_or(ApplicationError::NotFound(id.to_string()))
    }
}
