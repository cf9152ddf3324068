use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;
use sqlx::Row;

use crate::domain::identity::models::IdentityId;
use crate::domain::job::models::EmploymentType;
use crate::domain::job::models::Job;
use crate::domain::job::models::JobFilter;
use crate::domain::job::models::JobId;
use crate::job::errors::JobError;
use crate::job::ports::JobRepository;

const JOB_COLUMNS: &str = "id, title, description, location, category, employer_id, \
     company_name, salary, skills_required, apply_link, employment_type, work_experience, \
     posted_at";

pub struct PostgresJobRepository {
    pool: PgPool,
}

impl PostgresJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(e: sqlx::Error) -> JobError {
    JobError::DatabaseError(e.to_string())
}

fn row_to_job(row: &PgRow) -> Result<Job, JobError> {
    let employment_type: String = row.try_get("employment_type").map_err(db_err)?;

    Ok(Job {
        id: JobId(row.try_get("id").map_err(db_err)?),
        title: row.try_get("title").map_err(db_err)?,
        description: row.try_get("description").map_err(db_err)?,
        location: row.try_get("location").map_err(db_err)?,
        category: row.try_get("category").map_err(db_err)?,
        employer_id: IdentityId(row.try_get("employer_id").map_err(db_err)?),
        company_name: row.try_get("company_name").map_err(db_err)?,
        salary: row.try_get("salary").map_err(db_err)?,
        skills_required: row.try_get("skills_required").map_err(db_err)?,
        apply_link: row.try_get("apply_link").map_err(db_err)?,
        employment_type: EmploymentType::from_str(&employment_type)?,
        work_experience: row.try_get("work_experience").map_err(db_err)?,
        posted_at: row.try_get("posted_at").map_err(db_err)?,
    })
}

/// Append the WHERE clauses implied by the filter.
///
/// Shared between the page query and the count query so the two always
/// agree on what matches.
fn push_filter_clauses(builder: &mut QueryBuilder<'_, Postgres>, filter: &JobFilter) {
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(category) = &filter.category {
        builder.push(" AND category = ").push_bind(category.clone());
    }
    if let Some(location) = &filter.location {
        builder.push(" AND location = ").push_bind(location.clone());
    }
    if let Some(salary) = filter.salary {
        builder.push(" AND salary = ").push_bind(salary);
    }
    if let Some(employment_type) = filter.employment_type {
        builder
            .push(" AND employment_type = ")
            .push_bind(employment_type.as_str());
    }
    if let Some(work_experience) = &filter.work_experience {
        builder
            .push(" AND work_experience = ")
            .push_bind(work_experience.clone());
    }
    if let Some(cutoff) = filter.posted_within.and_then(|w| w.cutoff(Utc::now())) {
        builder.push(" AND posted_at >= ").push_bind(cutoff);
    }
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn create(&self, job: Job) -> Result<Job, JobError> {
        sqlx::query(
            r#"
            INSERT INTO jobs
                (id, title, description, location, category, employer_id, company_name,
                 salary, skills_required, apply_link, employment_type, work_experience,
                 posted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(job.id.0)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.location)
        .bind(&job.category)
        .bind(job.employer_id.0)
        .bind(&job.company_name)
        .bind(job.salary)
        .bind(&job.skills_required)
        .bind(&job.apply_link)
        .bind(job.employment_type.as_str())
        .bind(&job.work_experience)
        .bind(job.posted_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(job)
    }

    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, JobError> {
        let row = sqlx::query(&format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(row_to_job).transpose()
    }

    async fn find_filtered(&self, filter: &JobFilter) -> Result<(Vec<Job>, i64), JobError> {
        let mut count_builder =
            QueryBuilder::new("SELECT COUNT(*) FROM jobs WHERE 1 = 1");
        push_filter_clauses(&mut count_builder, filter);

        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        let mut page_builder = QueryBuilder::new(format!(
            "SELECT {} FROM jobs WHERE 1 = 1",
            JOB_COLUMNS
        ));
        push_filter_clauses(&mut page_builder, filter);
        page_builder
            .push(" ORDER BY posted_at DESC LIMIT ")
            .push_bind(filter.limit())
            .push(" OFFSET ")
            .push_bind(filter.offset());

        let rows = page_builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        let jobs = rows
            .iter()
            .map(row_to_job)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((jobs, total))
    }

    async fn find_by_employer(&self, employer_id: &IdentityId) -> Result<Vec<Job>, JobError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM jobs WHERE employer_id = $1 ORDER BY posted_at DESC",
            JOB_COLUMNS
        ))
        .bind(employer_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_job).collect()
    }

    async fn update(&self, job: Job) -> Result<Job, JobError> {
        let result = sqlx::query(
            r#"
            UPDATE jobs
            SET title = $2, description = $3, location = $4, category = $5,
                company_name = $6, salary = $7, skills_required = $8, apply_link = $9,
                employment_type = $10, work_experience = $11
            WHERE id = $1
            "#,
        )
        .bind(job.id.0)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.location)
        .bind(&job.category)
        .bind(&job.company_name)
        .bind(job.salary)
        .bind(&job.skills_required)
        .bind(&job.apply_link)
        .bind(job.employment_type.as_str())
        .bind(&job.work_experience)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(JobError::NotFound(job.id.to_string()));
        }

        Ok(job)
    }

    async fn delete(&self, id: &JobId) -> Result<(), JobError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(JobError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
