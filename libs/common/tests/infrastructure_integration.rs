//! Integration tests for the shared infrastructure
//!
//! These tests verify that the PostgreSQL database is reachable, that the
//! embedded migrations apply cleanly, and that the search-vector trigger
//! fires on page writes. They skip when `DATABASE_URL` is not set.

use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use sqlx::Row;

#[tokio::test]
async fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set, skipping infrastructure integration test");
        return Ok(());
    }

    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    assert!(health_check(&pool).await?, "Database health check failed");

    run_migrations(&pool).await?;

    // A write through any path must leave content_tsv consistent with
    // (language, content).
    sqlx::query(
        r#"
        INSERT INTO pages (title, url, language, content)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (title) DO UPDATE
        SET url = EXCLUDED.url, language = EXCLUDED.language, content = EXCLUDED.content
        "#,
    )
    .bind("__infra_test_page")
    .bind("https://example.com/__infra_test_page")
    .bind("en")
    .bind("trigger consistency probe")
    .execute(&pool)
    .await?;

    let row = sqlx::query(
        "SELECT content_tsv IS NOT NULL AS has_vector FROM pages WHERE title = $1",
    )
    .bind("__infra_test_page")
    .fetch_one(&pool)
    .await?;

    let has_vector: bool = row.get("has_vector");
    assert!(has_vector, "search-vector trigger did not populate content_tsv");

    sqlx::query("DELETE FROM pages WHERE title = $1")
        .bind("__infra_test_page")
        .execute(&pool)
        .await?;

    Ok(())
}
