use anyhow::Result;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

mod config;
mod cookie;
mod error;
mod models;
mod password;
mod repositories;
mod routes;
mod service;
mod sweeper;
mod token;
mod validation;

use std::net::SocketAddr;

use common::database;

use crate::{
    config::AuthConfig,
    cookie::CookieConfig,
    password::PasswordHasher,
    repositories::{SessionRepository, UserRepository},
    service::AuthService,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub cookies: CookieConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting authentication service");

    let config = AuthConfig::from_env();

    // Initialize database connection pool
    let db_config = database::DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    database::run_migrations(&pool).await?;

    let users = UserRepository::new(pool.clone());
    let sessions = SessionRepository::new(pool.clone());
    let hasher = PasswordHasher::new(
        config.argon2_m_cost,
        config.argon2_t_cost,
        config.argon2_p_cost,
    )?;

    let auth_service = AuthService::new(users, sessions.clone(), hasher);

    // The scheduler stops when dropped, so hold it for the server lifetime.
    let _sweeper = match &config.sweep_schedule {
        Some(schedule) => Some(sweeper::start(schedule, sessions).await?),
        None => {
            warn!("Session sweeper disabled; relying on lazy expiry only");
            None
        }
    };

    let app_state = AppState {
        auth_service,
        cookies: CookieConfig::from_env(),
    };

    info!("Authentication service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Authentication service listening on {}", config.bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
