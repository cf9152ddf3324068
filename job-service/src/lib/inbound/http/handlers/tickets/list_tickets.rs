use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::TicketData;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn list_tickets(
    State(state): State<AppState>,
    Extension(AuthenticatedIdentity(identity)): Extension<AuthenticatedIdentity>,
) -> Result<ApiSuccess<Vec<TicketData>>, ApiError> {
    state
        .ticket_service
        .list_all(&identity)
        .await
        .map_err(ApiError::from)
        .map(|tickets| {
            ApiSuccess::new(StatusCode::OK, tickets.iter().map(TicketData::from).collect())
        })
}
