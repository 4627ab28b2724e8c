use axum::{
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::{models::CurrentUser, render, AppState};

pub mod home_controller;
pub mod auth_controller;
pub mod user_controller;
pub mod beneficiary_controller;
pub mod checkout_controller;
pub mod market_controller;
pub mod realtime_controller;

pub(crate) fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

pub(crate) fn htmx_redirect(path: &'static str) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert("HX-Redirect", axum::http::HeaderValue::from_static(path));
    (StatusCode::OK, headers, Html(String::new())).into_response()
}

/// HTMX gets the bare body; normal navigation gets it inside the layout.
pub(crate) fn page(
    state: &AppState,
    headers: &HeaderMap,
    status: StatusCode,
    title: &str,
    body: String,
    user: Option<&CurrentUser>,
) -> Response {
    if is_htmx(headers) {
        return (status, Html(body)).into_response();
    }

    match render::render_full(state, title, body, user) {
        Ok(full) => (status, Html(full)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(e)).into_response(),
    }
}

pub(crate) fn template_error(e: impl std::fmt::Display) -> Response {
    tracing::error!("template error: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(format!("template error: {e}")),
    )
        .into_response()
}
