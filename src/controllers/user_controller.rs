use axum::{
    extract::Extension,
    http::StatusCode,
    response::{Html, IntoResponse},
};

use crate::models::CurrentUser;

// GET /me
pub async fn me(user: Option<Extension<CurrentUser>>) -> impl IntoResponse {
    match user {
        Some(Extension(u)) => (
            StatusCode::OK,
            axum::Json(serde_json::json!({
                "id": u.id.to_hex(),
                "name": u.name,
                "email": u.email,
            })),
        )
            .into_response(),
        None => (StatusCode::UNAUTHORIZED, Html("not logged in".to_string())).into_response(),
    }
}
