//! Authentication service routes

use std::net::SocketAddr;

use axum::{
    Form, Json, Router,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AppState, cookie::SESSION_COOKIE, error::AuthError};

/// Form body for user registration
#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirmation: String,
}

/// Form body for user login
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Response for operations that issue a session
#[derive(Serialize)]
pub struct SessionResponse {
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

/// Create the router for the authentication service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/session", get(session))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "auth-service"
    }))
}

/// User registration endpoint. Issues a session on success (auto-login).
pub async fn register(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<impl IntoResponse, AuthError> {
    let ip = client_ip(&headers, addr);

    let session = state
        .auth_service
        .register(
            &form.username,
            &form.email,
            &form.password,
            &form.password_confirmation,
            &ip,
        )
        .await?;

    let jar = jar.add(state.cookies.session_cookie(session.token.clone()));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(SessionResponse {
            username: session.username,
            expires_at: session.expires_at,
        }),
    ))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, AuthError> {
    let ip = client_ip(&headers, addr);

    let session = state
        .auth_service
        .login(&form.username, &form.password, &ip)
        .await?;

    let jar = jar.add(state.cookies.session_cookie(session.token.clone()));

    Ok((
        jar,
        Json(SessionResponse {
            username: session.username,
            expires_at: session.expires_at,
        }),
    ))
}

/// Logout endpoint. Always clears the session cookie.
pub async fn logout(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    jar: CookieJar,
) -> impl IntoResponse {
    let ip = client_ip(&headers, addr);
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());

    state.auth_service.logout(token.as_deref(), &ip).await;

    let jar = jar.add(state.cookies.removal_cookie());

    (jar, Json(serde_json::json!({"message": "Logged out"})))
}

/// Resolve the current session to its username. Pure read.
pub async fn session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthError> {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());

    let username = state.auth_service.validate_session(token.as_deref()).await?;

    Ok(Json(serde_json::json!({"username": username})))
}

/// Client address for telemetry: the first `X-Forwarded-For` entry when the
/// service sits behind a proxy, otherwise the peer address.
fn client_ip(headers: &HeaderMap, addr: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| addr.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_ip_prefers_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.9, 10.0.0.1".parse().unwrap());
        let addr: SocketAddr = "127.0.0.1:9999".parse().unwrap();

        assert_eq!(client_ip(&headers, addr), "203.0.113.9");
    }

    #[test]
    fn client_ip_falls_back_to_peer_address() {
        let headers = HeaderMap::new();
        let addr: SocketAddr = "192.0.2.7:1234".parse().unwrap();

        assert_eq!(client_ip(&headers, addr), "192.0.2.7");
    }
}
