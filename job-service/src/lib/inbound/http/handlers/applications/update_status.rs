use std::str::FromStr;

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::application::models::ApplicationId;
use crate::domain::application::models::ApplicationStatus;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ApplicationData;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn update_status(
    State(state): State<AppState>,
    Extension(AuthenticatedIdentity(identity)): Extension<AuthenticatedIdentity>,
    Path(application_id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<ApiSuccess<ApplicationData>, ApiError> {
    let application_id = ApplicationId::from_string(&application_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    // Rejected here, before anything is loaded: the stored status is
    // untouched by an invalid value
    let new_status = ApplicationStatus::from_str(&body.status)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .application_service
        .set_status(&application_id, new_status, &identity)
        .await
        .map_err(ApiError::from)
        .map(|ref application| ApiSuccess::new(StatusCode::OK, application.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateStatusRequest {
    status: String,
}
