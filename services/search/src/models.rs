//! Search service models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Page returned by the search endpoint
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Page {
    pub title: String,
    pub url: String,
    pub language: String,
    pub last_updated: DateTime<Utc>,
    pub content: String,
}

/// Query parameters accepted by the search endpoint
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub language: Option<String>,
}

/// One record in a bulk ingestion batch. Fields default to empty so a
/// malformed record is counted instead of failing the whole payload.
#[derive(Debug, Clone, Deserialize)]
pub struct PageRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    pub language: Option<String>,
    #[serde(default)]
    pub content: String,
}

/// Body of a bulk ingestion request
#[derive(Debug, Deserialize)]
pub struct BatchPagesRequest {
    pub pages: Vec<PageRecord>,
}

/// Outcome of a bulk ingestion batch
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub success_count: usize,
    pub error_count: usize,
    pub total: usize,
}
