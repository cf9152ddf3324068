use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::application::models::ResumeLink;
use crate::domain::job::models::JobId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ApplicationData;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn apply(
    State(state): State<AppState>,
    Extension(AuthenticatedIdentity(identity)): Extension<AuthenticatedIdentity>,
    Path(job_id): Path<String>,
    Json(body): Json<ApplyRequest>,
) -> Result<ApiSuccess<ApplicationData>, ApiError> {
    let job_id = JobId::from_string(&job_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let resume = ResumeLink::new(body.resume).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .application_service
        .apply(&identity, &job_id, resume)
        .await
        .map_err(ApiError::from)
        .map(|ref application| ApiSuccess::new(StatusCode::CREATED, application.into()))
}

/// HTTP request body for applying to a job: a link to the resume,
/// not an upload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApplyRequest {
    #[serde(default)]
    resume: String,
}
