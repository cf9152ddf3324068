use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::job::models::JobId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ApplicationData;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn job_applications(
    State(state): State<AppState>,
    Extension(AuthenticatedIdentity(identity)): Extension<AuthenticatedIdentity>,
    Path(job_id): Path<String>,
) -> Result<ApiSuccess<Vec<ApplicationData>>, ApiError> {
    let job_id = JobId::from_string(&job_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .application_service
        .list_for_job(&identity, &job_id)
        .await
        .map_err(ApiError::from)
        .map(|applications| {
            ApiSuccess::new(
                StatusCode::OK,
                applications.iter().map(ApplicationData::from).collect(),
            )
        })
}
