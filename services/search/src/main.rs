use anyhow::Result;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod error;
mod language;
mod models;
mod repository;
mod routes;
mod service;

use common::database;
use sqlx::PgPool;

use crate::{config::SearchConfig, repository::PageRepository, service::SearchService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub search_service: SearchService,
    pub config: SearchConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_max_level(Level::INFO)
        .init();

    info!("Starting search service");

    let config = SearchConfig::from_env();
    if config.crawler_api_key.is_none() {
        warn!("CRAWLER_API_KEY not set; bulk ingestion is disabled");
    }

    // Initialize database connection pool
    let db_config = database::DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    database::run_migrations(&pool).await?;

    let search_service = SearchService::new(PageRepository::new(pool.clone()));

    let app_state = AppState {
        db_pool: pool,
        search_service,
        config: config.clone(),
    };

    info!("Search service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Search service listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
