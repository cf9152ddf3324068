use std::str::FromStr;

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::job::models::EmploymentType;
use crate::domain::job::models::JobId;
use crate::domain::job::models::UpdateJobCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::JobData;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a job (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub company_name: Option<String>,
    pub salary: Option<i64>,
    pub skills_required: Option<Vec<String>>,
    pub apply_link: Option<String>,
    pub employment_type: Option<String>,
    pub work_experience: Option<String>,
}

impl UpdateJobRequest {
    fn try_into_command(self) -> Result<UpdateJobCommand, ApiError> {
        let employment_type = self
            .employment_type
            .as_deref()
            .map(EmploymentType::from_str)
            .transpose()
            .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

        Ok(UpdateJobCommand {
            title: self.title,
            description: self.description,
            location: self.location,
            category: self.category,
            company_name: self.company_name,
            salary: self.salary,
            skills_required: self.skills_required,
            apply_link: self.apply_link,
            employment_type,
            work_experience: self.work_experience,
        })
    }
}

pub async fn update_job(
    State(state): State<AppState>,
    Extension(AuthenticatedIdentity(identity)): Extension<AuthenticatedIdentity>,
    Path(job_id): Path<String>,
    Json(req): Json<UpdateJobRequest>,
) -> Result<ApiSuccess<JobData>, ApiError> {
    let job_id = JobId::from_string(&job_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let command = req.try_into_command()?;

    state
        .job_service
        .update_job(&identity, &job_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref job| ApiSuccess::new(StatusCode::OK, job.into()))
}
