//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domains::auth::AdminSessionAuthority;
use crate::kernel::ServerDeps;
use crate::server::middleware::admin_session_middleware;
use crate::server::routes::{
    admin_page_handler, approve_handler, health_handler, login_handler, login_page_handler,
    logout_handler, register_handler, reject_handler,
};

/// Largest accepted registration request: a 5 MiB receipt plus form overhead
pub const REGISTER_BODY_LIMIT: usize = 6 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: ServerDeps,
    pub sessions: Arc<AdminSessionAuthority>,
    /// Adds `Secure` to session cookies
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(deps: ServerDeps, sessions: AdminSessionAuthority, secure_cookies: bool) -> Self {
        Self {
            deps,
            sessions: Arc::new(sessions),
            secure_cookies,
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}

/// Build the Axum application router
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    let sessions = state.sessions.clone();

    Router::new()
        .route(
            "/api/register",
            post(register_handler).layer(DefaultBodyLimit::max(REGISTER_BODY_LIMIT)),
        )
        .route("/api/admin/login", post(login_handler))
        .route("/api/admin/logout", post(logout_handler))
        .route("/api/admin/approve", post(approve_handler))
        .route("/api/admin/reject", post(reject_handler))
        .route("/admin", get(admin_page_handler))
        .route("/admin/login", get(login_page_handler))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            admin_session_middleware(sessions.clone(), req, next)
        }))
        .layer(Extension(state))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
