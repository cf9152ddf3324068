use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::identity::models::IdentityId;

/// Ticket unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TicketId(pub Uuid);

impl TicketId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Support ticket submitted by an authenticated identity.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub id: TicketId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub topic: String,
    pub feedback: String,
    pub identity_id: IdentityId,
    pub created_at: DateTime<Utc>,
}

/// Command to submit a support ticket.
#[derive(Debug)]
pub struct CreateTicketCommand {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub topic: String,
    pub feedback: String,
}
