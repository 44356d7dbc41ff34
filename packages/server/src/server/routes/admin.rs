use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::{header, HeaderMap},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::common::{Actor, RegistrationId};
use crate::domains::moderation::{review_registration, Decision};
use crate::server::app::AppState;
use crate::server::error::{ApiError, INTERNAL, MISSING_ID, NOT_FOUND};
use crate::server::middleware::{clear_session_cookie, session_cookie};

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

pub async fn approve_handler(
    Extension(state): Extension<AppState>,
    Extension(actor): Extension<Actor>,
    body: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    review(state, actor, body, Decision::Approve).await
}

pub async fn reject_handler(
    Extension(state): Extension<AppState>,
    Extension(actor): Extension<Actor>,
    body: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    review(state, actor, body, Decision::Reject).await
}

async fn review(
    state: AppState,
    actor: Actor,
    body: Result<Json<ReviewRequest>, JsonRejection>,
    decision: Decision,
) -> Result<Json<Value>, ApiError> {
    // Session first, so anonymous callers learn nothing about the body
    if !actor.is_admin() {
        return Err(ApiError::unauthorized());
    }

    let Json(request) = body.map_err(|e| {
        warn!(error = %e, "Malformed review request");
        ApiError::bad_request(MISSING_ID)
    })?;

    let raw_id = request
        .id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request(MISSING_ID))?;

    // An id that cannot exist is reported like an unknown one
    let id = RegistrationId::parse(&raw_id).map_err(|_| ApiError::NotFound(NOT_FOUND.to_string()))?;

    review_registration(actor, id, decision, &state.deps).await?;

    Ok(Json(json!({ "ok": true })))
}

pub async fn login_handler(
    Extension(state): Extension<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(HeaderMap, Json<Value>), ApiError> {
    let password = body.map(|Json(request)| request.password).unwrap_or_default();

    let token = state.sessions.login(&password)?;
    let cookie = session_cookie(&token, state.secure_cookies)
        .map_err(|_| ApiError::internal(INTERNAL))?;

    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, cookie);
    Ok((headers, Json(json!({ "ok": true }))))
}

pub async fn logout_handler(Extension(state): Extension<AppState>) -> (HeaderMap, Json<Value>) {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        clear_session_cookie(state.secure_cookies),
    );
    (headers, Json(json!({ "ok": true })))
}
