use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::UpdateProfileCommand;
use crate::identity::errors::IdentityError;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::IdentityData;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating the caller's profile (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Option<Vec<String>>,
}

impl UpdateProfileRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, IdentityError> {
        let email = self.email.map(EmailAddress::new).transpose()?;

        Ok(UpdateProfileCommand {
            name: self.name,
            email,
            phone: self.phone,
            skills: self.skills,
        })
    }
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(AuthenticatedIdentity(identity)): Extension<AuthenticatedIdentity>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<ApiSuccess<IdentityData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .identity_service
        .update_profile(&identity.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref updated| ApiSuccess::new(StatusCode::OK, updated.into()))
}
