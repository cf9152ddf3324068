use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::JobData;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn my_jobs(
    State(state): State<AppState>,
    Extension(AuthenticatedIdentity(identity)): Extension<AuthenticatedIdentity>,
) -> Result<ApiSuccess<Vec<JobData>>, ApiError> {
    state
        .job_service
        .list_my_jobs(&identity)
        .await
        .map_err(ApiError::from)
        .map(|jobs| {
            ApiSuccess::new(StatusCode::OK, jobs.iter().map(JobData::from).collect())
        })
}
