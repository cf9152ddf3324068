use std::str::FromStr;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::job::models::CreateJobCommand;
use crate::domain::job::models::EmploymentType;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::JobData;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

/// HTTP request body for posting a job (raw JSON)
#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub category: String,
    pub company_name: Option<String>,
    pub salary: Option<i64>,
    #[serde(default)]
    pub skills_required: Vec<String>,
    pub apply_link: Option<String>,
    pub employment_type: Option<String>,
    pub work_experience: Option<String>,
}

impl CreateJobRequest {
    fn try_into_command(self) -> Result<CreateJobCommand, ApiError> {
        let employment_type = self
            .employment_type
            .as_deref()
            .map(EmploymentType::from_str)
            .transpose()
            .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?
            .unwrap_or_default();

        Ok(CreateJobCommand {
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

pub async fn post_job(
    State(state): State<AppState>,
    Extension(AuthenticatedIdentity(identity)): Extension<AuthenticatedIdentity>,
    Json(req): Json<CreateJobRequest>,
) -> Result<ApiSuccess<JobData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .job_service
        .post_job(&identity, command)
        .await
        .map_err(ApiError::from)
        .map(|ref job| ApiSuccess::new(StatusCode::CREATED, job.into()))
}
