use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::ticket::models::CreateTicketCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::TicketData;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn create_ticket(
    State(state): State<AppState>,
    Extension(AuthenticatedIdentity(identity)): Extension<AuthenticatedIdentity>,
    Json(body): Json<CreateTicketRequest>,
) -> Result<ApiSuccess<TicketData>, ApiError> {
    let command = CreateTicketCommand {
        name: body.name,
        email: body.email,
        phone: body.phone,
        topic: body.topic,
        feedback: body.feedback,
    };

    state
        .ticket_service
        .submit(&identity, command)
        .await
        .map_err(ApiError::from)
        .map(|ref ticket| ApiSuccess::new(StatusCode::CREATED, ticket.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTicketRequest {
    name: String,
    email: String,
    phone: String,
    topic: String,
    feedback: String,
}
