use axum::http::{header, HeaderMap, HeaderValue};
use axum::{middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

use crate::common::Actor;
use crate::domains::auth::{AdminSessionAuthority, SESSION_COOKIE};

/// Admin session middleware
///
/// Reads the session cookie, validates it, and adds an `Actor` to request
/// extensions. Requests without a valid session continue as anonymous.
pub async fn admin_session_middleware(
    sessions: Arc<AdminSessionAuthority>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let is_admin = session_token(request.headers())
        .map(|token| sessions.validate(token))
        .unwrap_or(false);

    debug!(is_admin, "Resolved admin session");
    request
        .extensions_mut()
        .insert(Actor::from_session_flag(is_admin));

    next.run(request).await
}

/// Value of the session cookie, if the request carries one
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
}

/// `Set-Cookie` value carrying a fresh session token
pub fn session_cookie(token: &str, secure: bool) -> Result<HeaderValue, header::InvalidHeaderValue> {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/",
        SESSION_COOKIE, token
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// `Set-Cookie` value that removes the session cookie
pub fn clear_session_cookie(secure: bool) -> HeaderValue {
    let cookie = if secure {
        "admin-auth=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0; Secure"
    } else {
        "admin-auth=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0"
    };
    HeaderValue::from_static(cookie)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_finds_session_cookie_among_others() {
        let headers = headers("theme=dark; admin-auth=abc.def.ghi; lang=en");
        assert_eq!(session_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_session_cookie() {
        assert_eq!(session_token(&headers("theme=dark")), None);
        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_similar_cookie_name_does_not_match() {
        assert_eq!(session_token(&headers("x-admin-auth=abc")), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok", false).unwrap();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("admin-auth=tok"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(!cookie.contains("Secure"));

        let secure = session_cookie("tok", true).unwrap();
        assert!(secure.to_str().unwrap().ends_with("; Secure"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie(false);
        assert!(cookie.to_str().unwrap().contains("Max-Age=0"));
    }
}
