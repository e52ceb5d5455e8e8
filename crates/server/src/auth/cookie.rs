use axum::http::header::{COOKIE, HeaderMap, HeaderValue};
use chrono::{DateTime, Utc};

/// Extract the value of a named cookie from the request headers.
///
/// All `Cookie` headers are scanned (proxies and some clients split the
/// cookie list across several headers), and the name must match a whole
/// cookie name, not a suffix of one.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((key, value)) = pair.trim().split_once('=')
                && key == name
                && !value.is_empty()
            {
                return Some(value.to_owned());
            }
        }
    }
    None
}

/// Build the `Set-Cookie` value that stores a session token.
///
/// HttpOnly keeps the token away from page scripts; SameSite=Lax matches
/// how the cookies are consumed (top-level navigations and same-site
/// fetches).
pub fn session_cookie(
    name: &str,
    token: &str,
    expires_at: DateTime<Utc>,
    path: &str,
) -> HeaderValue {
    let path = if path.is_empty() { "/" } else { path };
    let expires = expires_at.format("%a, %d %b %Y %H:%M:%S GMT");
    let cookie = format!("{name}={token}; Path={path}; Expires={expires}; HttpOnly; SameSite=Lax");
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// Build the `Set-Cookie` value that clears a session cookie.
pub fn clearing_cookie(name: &str, path: &str) -> HeaderValue {
    let path = if path.is_empty() { "/" } else { path };
    let cookie = format!("{name}=; Path={path}; Max-Age=0; HttpOnly; SameSite=Lax");
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
}
