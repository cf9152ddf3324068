use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::IdentityData;
use crate::inbound::http::middleware::AuthenticatedIdentity;

pub async fn get_profile(
    Extension(AuthenticatedIdentity(identity)): Extension<AuthenticatedIdentity>,
) -> Result<ApiSuccess<IdentityData>, ApiError> {
    // The middleware already resolved the record; this is a pure projection
    Ok(ApiSuccess::new(StatusCode::OK, (&identity).into()))
}
