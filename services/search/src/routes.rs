//! Search service routes

use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    http::HeaderMap,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tracing::info;

use crate::{
    AppState,
    auth::{CurrentUser, require_session},
    error::SearchError,
    language::Language,
    models::{BatchPagesRequest, SearchParams},
};

/// Create the router for the search service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/search", get(search))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/batch-pages", post(batch_pages))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "search-service"
    }))
}

/// Hybrid search endpoint. Requires a valid session cookie.
pub async fn search(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, SearchError> {
    let language = Language::from_param(params.language.as_deref());
    let query = params.q.unwrap_or_default();

    info!("Search by {} (language {})", user.0, language.code());

    let pages = state.search_service.search(&query, language).await?;

    Ok(Json(pages))
}

/// Bulk ingestion endpoint for the crawler. The whole batch is rejected
/// only when the key is missing or wrong; malformed records are counted
/// individually.
pub async fn batch_pages(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<BatchPagesRequest>,
) -> Result<impl IntoResponse, SearchError> {
    let expected = state
        .config
        .crawler_api_key
        .as_deref()
        .ok_or(SearchError::Configuration("CRAWLER_API_KEY"))?;

    let provided = headers.get("x-api-key").and_then(|v| v.to_str().ok());
    if provided != Some(expected) {
        return Err(SearchError::Unauthorized);
    }

    let report = state.search_service.ingest_batch(&payload.pages).await?;

    info!(
        "Ingested batch: {} ok, {} rejected of {}",
        report.success_count, report.error_count, report.total
    );

    Ok(Json(report))
}
