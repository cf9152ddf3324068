use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::identity::models::IdentityId;
use crate::domain::ticket::models::Ticket;
use crate::domain::ticket::models::TicketId;
use crate::ticket::errors::TicketError;
use crate::ticket::ports::TicketRepository;

pub struct PostgresTicketRepository {
    pool: PgPool,
}

impl PostgresTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(e: sqlx::Error) -> TicketError {
    TicketError::DatabaseError(e.to_string())
}

fn row_to_ticket(row: &PgRow) -> Result<Ticket, TicketError> {
    Ok(Ticket {
        id: TicketId(row.try_get("id").map_err(db_err)?),
        name: row.try_get("name").map_err(db_err)?,
        email: row.try_get("email").map_err(db_err)?,
        phone: row.try_get("phone").map_err(db_err)?,
        topic: row.try_get("topic").map_err(db_err)?,
        feedback: row.try_get("feedback").map_err(db_err)?,
        identity_id: IdentityId(row.try_get("identity_id").map_err(db_err)?),
        created_at: row.try_get("created_at").map_err(db_err)?,
    })
}

#[async_trait]
impl TicketRepository for PostgresTicketRepository {
    async fn create(&self, ticket: Ticket) -> Result<Ticket, TicketError> {
        sqlx::query(
            r#"
            INSERT INTO tickets (id, name, email, phone, topic, feedback, identity_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(ticket.id.0)
        .bind(&ticket.name)
        .bind(&ticket.email)
        .bind(&ticket.phone)
        .bind(&ticket.topic)
        .bind(&ticket.feedback)
        .bind(ticket.identity_id.0)
        .bind(ticket.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(ticket)
    }

    async fn list_all(&self) -> Result<Vec<Ticket>, TicketError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, phone, topic, feedback, identity_id, created_at
            FROM tickets
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_ticket).collect()
    }
}
