//! User repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{NewUser, User};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

fn user_from_row(row: &sqlx::postgres::PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        registration_ip: row.get("registration_ip"),
        registration_time: row.get("registration_time"),
        last_login_ip: row.get("last_login_ip"),
        last_login_time: row.get("last_login_time"),
        login_count: row.get("login_count"),
    }
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user row. A uniqueness violation surfaces as the
    /// underlying `sqlx::Error` so the caller can classify the conflict.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        info!("Creating new user: {}", new_user.username);

        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, registration_ip)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, registration_ip,
                      registration_time, last_login_ip, last_login_time, login_count
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.registration_ip)
        .fetch_one(&self.pool)
        .await?;

        Ok(user_from_row(&row))
    }

    /// Find a user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, registration_ip,
                   registration_time, last_login_ip, last_login_time, login_count
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Advisory existence check; the unique constraint is the final arbiter.
    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Advisory existence check; the unique constraint is the final arbiter.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Update login telemetry after a successful authentication.
    pub async fn record_login(&self, username: &str, client_ip: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_login_ip = $2, last_login_time = NOW(), login_count = login_count + 1
            WHERE username = $1
            "#,
        )
        .bind(username)
        .bind(client_ip)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
