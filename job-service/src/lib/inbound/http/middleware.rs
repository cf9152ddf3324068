use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::identity::errors::IdentityError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the resolved identity through the request.
///
/// A session token alone is not enough: the embedded identifier must still
/// resolve to a live identity record, and role checks need that record.
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity(pub Identity);

/// Middleware that validates bearer tokens and resolves the identity.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Extract token from Authorization header
    let token = extract_token_from_header(&req)?;

    let identity_id = state.authenticator.validate_session(token).map_err(|e| {
        tracing::warn!("Session token validation failed: {}", e);
        unauthorized("Invalid or expired token")
    })?;

    let identity_id = IdentityId::from_string(&identity_id).map_err(|e| {
        tracing::error!("Failed to parse identity ID from token: {}", e);
        unauthorized("Invalid token format")
    })?;

    // The token is only as good as the identity it points at
    let identity = state
        .identity_service
        .get_identity(&identity_id)
        .await
        .map_err(|e| match e {
            IdentityError::NotFound(_) => unauthorized("Invalid or expired token"),
            other => {
                tracing::error!("Failed to resolve identity for session: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Internal server error"
                    })),
                )
                    .into_response()
            }
        })?;

    req.extensions_mut().insert(AuthenticatedIdentity(identity));

    Ok(next.run(req).await)
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": message
        })),
    )
        .into_response()
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    if !auth_str.starts_with("Bearer ") {
        return Err(unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>",
        ));
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
