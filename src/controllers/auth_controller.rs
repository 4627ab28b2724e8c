use axum::{
    extract::{Extension, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;

use crate::{
    models::CurrentUser,
    render,
    services::auth_service::{self, is_valid_email},
    AppState,
};

use super::{htmx_redirect, is_htmx, page, template_error};

fn form_page(
    state: &AppState,
    tpl: &str,
    values: serde_json::Value,
    errors: &serde_json::Map<String, serde_json::Value>,
) -> Response {
    let html = render::render_page(state, tpl, &json!({ "values": values, "errors": errors }));
    (StatusCode::OK, Html(html)).into_response()
}

fn signed_in(state: &AppState, headers: &HeaderMap, jar: CookieJar, token: String) -> Response {
    let jar = jar.add(auth_service::auth_cookie(state, token));

    if is_htmx(headers) {
        return (jar, htmx_redirect("/")).into_response();
    }

    (
        jar,
        (StatusCode::SEE_OTHER, [("Location", "/")], Html(String::new())),
    )
        .into_response()
}

// ---------------- LOGIN ----------------

pub async fn get_login(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let body = match state.hbs.render("pages/login", &json!({})) {
        Ok(s) => s,
        Err(e) => return template_error(e),
    };

    page(&state, &headers, StatusCode::OK, "Login", body, None)
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub async fn post_login(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let email = form.email.trim().to_lowercase();
    let password = form.password.trim().to_string();
    let values = json!({ "email": email });

    let mut errors = serde_json::Map::new();

    if email.is_empty() {
        errors.insert("email".into(), json!("Email is required."));
    } else if !is_valid_email(&email) {
        errors.insert("email".into(), json!("Invalid email."));
    }

    if password.is_empty() {
        errors.insert("password".into(), json!("Password is required."));
    }

    if !errors.is_empty() {
        return form_page(&state, "pages/login", values, &errors);
    }

    let user = match auth_service::login_user(&state, &email, &password).await {
        Ok(u) => u,
        Err(errs) => {
            for (k, v) in errs {
                errors.insert(k, json!(v));
            }
            return form_page(&state, "pages/login", values, &errors);
        }
    };

    match auth_service::make_jwt_with_days(&state, &user.id, 7) {
        Ok(token) => signed_in(&state, &headers, jar, token),
        Err(e) => {
            errors.insert("_form".into(), json!(format!("Auth error: {e}")));
            form_page(&state, "pages/login", values, &errors)
        }
    }
}

// ---------------- REGISTER ----------------

pub async fn get_register(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let body = match state.hbs.render("pages/register", &json!({})) {
        Ok(s) => s,
        Err(e) => return template_error(e),
    };

    page(&state, &headers, StatusCode::OK, "Register", body, None)
}

#[derive(Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,

    #[serde(default, rename = "rePassword")]
    pub re_password: Option<String>,
}

pub async fn post_register(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    let name = form.name.trim().to_string();
    let email = form.email.trim().to_lowercase();
    let password = form.password.trim().to_string();
    let re_password = form.re_password.as_deref().unwrap_or("").trim().to_string();
    let values = json!({ "name": name, "email": email });

    let mut errors = serde_json::Map::new();

    if name.is_empty() {
        errors.insert("name".into(), json!("Name is required."));
    } else if name.chars().count() < 2 {
        errors.insert("name".into(), json!("Name must be at least 2 characters."));
    }

    if email.is_empty() {
        errors.insert("email".into(), json!("Email is required."));
    } else if !is_valid_email(&email) {
        errors.insert("email".into(), json!("Invalid email."));
    }

    if password.is_empty() {
        errors.insert("password".into(), json!("Password is required."));
    } else if password.len() < 6 {
        errors.insert("password".into(), json!("Password must be at least 6 characters."));
    }

    if re_password.is_empty() {
        errors.insert("rePassword".into(), json!("Repeat password is required."));
    } else if password != re_password {
        errors.insert("rePassword".into(), json!("Passwords do not match."));
    }

    if !errors.is_empty() {
        return form_page(&state, "pages/register", values, &errors);
    }

    let user_id = match auth_service::register_user(&state, &name, &email, &password).await {
        Ok(id) => id,
        Err(errs) => {
            for (k, v) in errs {
                errors.insert(k, json!(v));
            }
            return form_page(&state, "pages/register", values, &errors);
        }
    };

    match auth_service::make_jwt_with_days(&state, &user_id, 7) {
        Ok(token) => signed_in(&state, &headers, jar, token),
        Err(e) => {
            errors.insert("_form".into(), json!(format!("Auth error: {e}")));
            form_page(&state, "pages/register", values, &errors)
        }
    }
}

// ---------------- LOGOUT ----------------

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(auth_service::clear_auth_cookie(&state));
    (jar, (StatusCode::SEE_OTHER, [("Location", "/")]))
}

// ---------------- AUTH ERROR ----------------

#[derive(Deserialize)]
pub struct AuthErrorQuery {
    pub error: Option<String>,
}

// GET /auth/error?error=AccessDenied
pub async fn get_auth_error(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(q): Query<AuthErrorQuery>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let message = auth_service::auth_error_message(q.error.as_deref());

    let body = match state.hbs.render("pages/auth_error", &json!({ "message": message })) {
        Ok(s) => s,
        Err(e) => return template_error(e),
    };

    let user_ref = user.as_ref().map(|Extension(u)| u);
    page(&state, &headers, StatusCode::OK, "Sign in", body, user_ref)
}
