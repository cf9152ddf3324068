use std::str::FromStr;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::Role;
use crate::identity::errors::IdentityError;
use crate::identity::ports::IdentityRepository;

const IDENTITY_COLUMNS: &str = "id, name, email, password_hash, role, phone, skills, \
     company_id, reset_token_hash, reset_token_expires_at, created_at";

pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(e: sqlx::Error) -> IdentityError {
    IdentityError::DatabaseError(e.to_string())
}

fn row_to_identity(row: &PgRow) -> Result<Identity, IdentityError> {
    let role: String = row.try_get("role").map_err(db_err)?;

    Ok(Identity {
        id: IdentityId(row.try_get("id").map_err(db_err)?),
        name: row.try_get("name").map_err(db_err)?,
        email: EmailAddress::new(row.try_get("email").map_err(db_err)?)?,
        password_hash: row.try_get("password_hash").map_err(db_err)?,
        role: Role::from_str(&role)?,
        phone: row.try_get("phone").map_err(db_err)?,
        skills: row.try_get("skills").map_err(db_err)?,
        company_id: row.try_get("company_id").map_err(db_err)?,
        reset_token_hash: row.try_get("reset_token_hash").map_err(db_err)?,
        reset_token_expires_at: row.try_get("reset_token_expires_at").map_err(db_err)?,
        created_at: row.try_get("created_at").map_err(db_err)?,
    })
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        sqlx::query(
            r#"
            INSERT INTO identities
                (id, name, email, password_hash, role, phone, skills, company_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(identity.id.0)
        .bind(&identity.name)
        .bind(identity.email.as_str())
        .bind(&identity.password_hash)
        .bind(identity.role.as_str())
        .bind(&identity.phone)
        .bind(&identity.skills)
        .bind(identity.company_id)
        .bind(identity.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_error) = e.as_database_error() {
                if db_error.is_unique_violation()
                    && db_error.constraint() == Some("identities_email_key")
                {
                    return IdentityError::EmailAlreadyExists(
                        identity.email.as_str().to_string(),
                    );
                }
            }
            IdentityError::DatabaseError(e.to_string())
        })?;

        Ok(identity)
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM identities WHERE id = $1",
            IDENTITY_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(row_to_identity).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM identities WHERE email = $1",
            IDENTITY_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(row_to_identity).transpose()
    }

    async fn update(&self, identity: Identity) -> Result<Identity, IdentityError> {
        let result = sqlx::query(
            r#"
            UPDATE identities
            SET name = $2, email = $3, password_hash = $4, phone = $5, skills = $6,
                company_id = $7
            WHERE id = $1
            "#,
        )
        .bind(identity.id.0)
        .bind(&identity.name)
        .bind(identity.email.as_str())
        .bind(&identity.password_hash)
        .bind(&identity.phone)
        .bind(&identity.skills)
        .bind(identity.company_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_error) = e.as_database_error() {
                if db_error.is_unique_violation()
                    && db_error.constraint() == Some("identities_email_key")
                {
                    return IdentityError::EmailAlreadyExists(
                        identity.email.as_str().to_string(),
                    );
                }
            }
            IdentityError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(IdentityError::NotFound(identity.id.to_string()));
        }

        Ok(identity)
    }

    async fn save_reset_token(
        &self,
        id: &IdentityId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), IdentityError> {
        let result = sqlx::query(
            r#"
            UPDATE identities
            SET reset_token_hash = $2, reset_token_expires_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(token_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(IdentityError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn consume_reset_token(
        &self,
        token_hash: &str,
        new_password_hash: &str,
    ) -> Result<Option<Identity>, IdentityError> {
        // Single conditional update: the password replacement and the token
        // clearing are one statement, so a raced second consumer matches
        // zero rows.
        let row = sqlx::query(&format!(
            r#"
            UPDATE identities
            SET password_hash = $2, reset_token_hash = NULL, reset_token_expires_at = NULL
            WHERE reset_token_hash = $1 AND reset_token_expires_at > NOW()
            RETURNING {}
            "#,
            IDENTITY_COLUMNS
        ))
        .bind(token_hash)
        .bind(new_password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(row_to_identity).transpose()
    }
}
