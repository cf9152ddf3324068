use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::job::models::JobId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn delete_job(
    State(state): State<AppState>,
    Extension(AuthenticatedIdentity(identity)): Extension<AuthenticatedIdentity>,
    Path(job_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let job_id = JobId::from_string(&job_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state.job_service.delete_job(&identity, &job_id).await?;

    Ok(ApiSuccess::new(StatusCode::OK, MessageData::new("Job removed")))
}
