//! Session repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::models::Session;

/// Session repository
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a freshly issued token.
    pub async fn create(
        &self,
        token: &str,
        username: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session> {
        let row = sqlx::query(
            r#"
            INSERT INTO sessions (token, username, expires_at)
            VALUES ($1, $2, $3)
            RETURNING token, username, expires_at, created_at
            "#,
        )
        .bind(token)
        .bind(username)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(Session {
            token: row.get("token"),
            username: row.get("username"),
            expires_at: row.get("expires_at"),
            created_at: row.get("created_at"),
        })
    }

    /// Look up a session row by token. Expiry is evaluated by the caller
    /// so an expired-but-present row can be distinguished from a missing one.
    pub async fn find(&self, token: &str) -> Result<Option<Session>> {
        let row = sqlx::query(
            r#"
            SELECT token, username, expires_at, created_at
            FROM sessions
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Session {
            token: row.get("token"),
            username: row.get("username"),
            expires_at: row.get("expires_at"),
            created_at: row.get("created_at"),
        }))
    }

    /// Delete a token. Deleting an absent token is not an error.
    pub async fn delete(&self, token: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Remove rows past their expiry. Validation never depends on this;
    /// it only keeps the table from growing without bound.
    pub async fn delete_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
