//! Session cookie construction and parsing for the `token` credential.

use std::time::Duration;

pub const SESSION_COOKIE: &str = "token";

/// Builds the `Set-Cookie` value carrying a freshly signed session token.
/// Max-Age tracks the JWT TTL so the cookie never outlives the credential.
pub fn session_cookie(token: &str, ttl: Duration, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Max-Age={}; Path=/; HttpOnly; SameSite=Strict",
        ttl.as_secs()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Expires the session cookie immediately (logout).
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", Duration::ZERO, secure)
}

/// Extracts the session token from a `Cookie` request header value.
pub fn session_token_from_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .filter(|v| !v.is_empty())
}
