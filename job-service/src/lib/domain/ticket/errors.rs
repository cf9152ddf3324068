use thiserror::Error;

use crate::domain::authz::errors::AccessError;

/// Error for support ticket operations
#[derive(Debug, Clone, Error)]
pub enum TicketError {
    #[error(transparent)]
    AccessDenied(#[from] AccessError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
