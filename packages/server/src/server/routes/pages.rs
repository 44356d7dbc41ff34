use axum::{
    extract::Extension,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::common::{Actor, PageRequest};
use crate::domains::moderation::{list_registrations, ModerationError};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::templates::{admin_page, login_page};

/// Admin registration table; anonymous visitors go to the login form
pub async fn admin_page_handler(
    Extension(state): Extension<AppState>,
    Extension(actor): Extension<Actor>,
) -> Response {
    match list_registrations(actor, PageRequest::all(), &state.deps).await {
        Ok(page) => Html(admin_page(&page.items)).into_response(),
        Err(ModerationError::Unauthorized(_)) => Redirect::to("/admin/login").into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn login_page_handler() -> Html<String> {
    Html(login_page())
}
