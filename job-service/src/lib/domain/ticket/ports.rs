use async_trait::async_trait;

use crate::domain::identity::models::Identity;
use crate::domain::ticket::models::CreateTicketCommand;
use crate::domain::ticket::models::Ticket;
use crate::ticket::errors::TicketError;

/// Port for support ticket operations.
#[async_trait]
pub trait TicketServicePort: Send + Sync + 'static {
    /// Submit a ticket linked to the acting identity.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn submit(
        &self,
        acting: &Identity,
        command: CreateTicketCommand,
    ) -> Result<Ticket, TicketError>;

    /// List every ticket, newest first; admin only.
    ///
    /// # Errors
    /// * `AccessDenied` - Acting identity is not admin
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self, acting: &Identity) -> Result<Vec<Ticket>, TicketError>;
}

/// Persistence operations for tickets.
#[async_trait]
pub trait TicketRepository: Send + Sync + 'static {
    /// Persist a new ticket.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, ticket: Ticket) -> Result<Ticket, TicketError>;

    /// Retrieve every ticket, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Ticket>, TicketError>;
}
