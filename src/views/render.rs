use serde_json::json;

use crate::{models::CurrentUser, AppState};

fn user_ctx(user: Option<&CurrentUser>) -> (bool, serde_json::Value) {
    match user {
        Some(u) => (
            true,
            json!({
                "id": u.id.to_hex(),
                "email": u.email,
                "name": u.name,
            }),
        ),
        None => (false, serde_json::Value::Null),
    }
}

/// Wraps a rendered page body in the base layout.
pub fn render_full(
    state: &AppState,
    title: &str,
    body_html: String,
    user: Option<&CurrentUser>,
) -> Result<String, String> {
    let (is_logged_in, user_json) = user_ctx(user);

    let ctx = json!({
        "title": title,
        "body": body_html,
        "is_logged_in": is_logged_in,
        "user": user_json,
    });

    state
        .hbs
        .render("layouts/base", &ctx)
        .map_err(|e| e.to_string())
}

/// Renders `tpl`, turning template failures into an inline error string.
pub fn render_page(state: &AppState, tpl: &str, ctx: &serde_json::Value) -> String {
    state
        .hbs
        .render(tpl, ctx)
        .unwrap_or_else(|e| format!("template error: {e}"))
}
