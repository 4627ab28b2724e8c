use axum::{
    extract::{Extension, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use mongodb::bson::doc;
use serde_json::json;

use crate::{models::CurrentUser, AppState};

use super::{page, template_error};

pub async fn home(
    State(state): State<AppState>,
    headers: HeaderMap,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let ctx = json!({ "currency": state.settings.default_currency });
    let body = match state.hbs.render("pages/home", &ctx) {
        Ok(s) => s,
        Err(e) => return template_error(e),
    };

    let user_ref = user.as_ref().map(|Extension(u)| u);
    page(&state, &headers, StatusCode::OK, "CryptoDesk", body, user_ref)
}

pub async fn not_found(
    State(state): State<AppState>,
    headers: HeaderMap,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let body = match state.hbs.render("pages/not_found", &json!({})) {
        Ok(s) => s,
        Err(e) => return template_error(e),
    };

    let user_ref = user.as_ref().map(|Extension(u)| u);
    page(&state, &headers, StatusCode::NOT_FOUND, "404", body, user_ref)
}

pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Html("ok".to_string()))
}

pub async fn health_db(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.run_command(doc! { "ping": 1 }, None).await {
        Ok(_) => (StatusCode::OK, Html("mongo: ok".to_string())).into_response(),
        Err(e) => {
            tracing::error!("mongo ping failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("mongo error: {}", e)),
            )
                .into_response()
        }
    }
}
