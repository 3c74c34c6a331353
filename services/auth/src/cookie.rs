//! Session cookie construction

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session_token";

/// Cookie lifetime in seconds (24 hours, matching the session expiry).
pub const SESSION_MAX_AGE_SECS: i64 = 86_400;

/// Cookie policy shared by every handler that sets or clears the session.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// Whether the `Secure` attribute is set. On unless explicitly
    /// overridden for plain-HTTP development.
    pub secure: bool,
}

impl CookieConfig {
    /// Create a new CookieConfig from environment variables
    ///
    /// # Environment Variables
    /// - `COOKIE_INSECURE`: set to `true`/`1` to drop the `Secure` attribute
    pub fn from_env() -> Self {
        let insecure = std::env::var("COOKIE_INSECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self { secure: !insecure }
    }

    /// Cookie set on registration and login.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .path("/")
            .max_age(Duration::seconds(SESSION_MAX_AGE_SECS))
            .build()
    }

    /// Cookie set on logout; the negative Max-Age tells the client to
    /// discard the session cookie.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .path("/")
            .max_age(Duration::seconds(-1))
            .build()
    }
}
