//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub registration_ip: String,
    pub registration_time: DateTime<Utc>,
    pub last_login_ip: Option<String>,
    pub last_login_time: Option<DateTime<Utc>>,
    pub login_count: i64,
}

/// New user creation payload. `password_hash` is the finished argon2 PHC
/// string; plain passwords never reach the repository layer.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub registration_ip: String,
}
