use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ApplicationData;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn list_applications(
    State(state): State<AppState>,
    Extension(AuthenticatedIdentity(identity)): Extension<AuthenticatedIdentity>,
) -> Result<ApiSuccess<Vec<ApplicationData>>, ApiError> {
    state
        .application_service
        .list_all(&identity)
        .await
        .map_err(ApiError::from)
        .map(|applications| {
            ApiSuccess::new(
                StatusCode::OK,
                applications.iter().map(ApplicationData::from).collect(),
            )
        })
}
