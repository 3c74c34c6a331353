//! Session-cookie authentication for the search endpoint

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use sqlx::Row;
use tracing::error;

use crate::{AppState, error::SearchError};

/// Name of the cookie carrying the session token, as issued by the auth
/// service.
pub const SESSION_COOKIE: &str = "session_token";

/// Username resolved from the session cookie, injected into request
/// extensions for handlers behind the middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

/// Resolve the `session_token` cookie against the session store and reject
/// missing or expired sessions. Expiry is a clock comparison; rows past
/// their expiry are treated as absent whether or not they still exist.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, SearchError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(SearchError::Unauthorized)?;

    let row = sqlx::query("SELECT username FROM sessions WHERE token = $1 AND expires_at > NOW()")
        .bind(&token)
        .fetch_optional(&state.db_pool)
        .await
        .map_err(|e| {
            error!("Session lookup failed: {:#}", e);
            SearchError::Storage
        })?;

    let username: String = row.ok_or(SearchError::Unauthorized)?.get("username");
    req.extensions_mut().insert(CurrentUser(username));

    Ok(next.run(req).await)
}
