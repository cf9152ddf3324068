use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::TicketError;
use super::models::CreateTicketCommand;
use super::models::Ticket;
use super::models::TicketId;
use super::ports::TicketRepository;
use super::ports::TicketServicePort;
use crate::domain::authz;
use crate::domain::identity::models::Identity;

/// Concrete implementation of TicketServicePort.
pub struct TicketService<TR>
where
    TR: TicketRepository,
{
    repository: Arc<TR>,
}

impl<TR> TicketService<TR>
where
    TR: TicketRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TicketServicePort for TicketService<TR>
where
    TR: TicketRepository,
{
    async fn submit(
        &self,
        acting: &Identity,
        command: CreateTicketCommand,
    ) -> Result<Ticket, TicketError> {
        let ticket = Ticket {
            id: TicketId::new(),
            name: command.name,
            email: command.email,
            phone: command.phone,
            topic: command.topic,
            feedback: command.feedback,
            identity_id: acting.id,
            created_at: Utc::now(),
        };

        self.repository.create(ticket).await
    }

    async fn list_all(&self, acting: &Identity) -> Result<Vec<Ticket>, TicketError> {
        authz::require_any_role(acting, authz::ADMIN_ONLY)?;

        self.repository.list_all().await
    }
}
