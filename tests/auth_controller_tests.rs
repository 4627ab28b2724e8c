use axum::{
    http::{header, Request, StatusCode},
    routing::{get, post},
    Router,
};
use cryptodesk::controllers::auth_controller;
use tower::ServiceExt;

mod common;
use common::{response_body_string, test_state};

fn form_request(uri: &str, body: &'static str) -> Request<axum::body::Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(axum::body::Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn post_login_missing_fields_renders_errors() {
    let state = test_state().await;
    let app = Router::new()
        .route("/login", post(auth_controller::post_login))
        .with_state(state);

    let res = app.oneshot(form_request("/login", "email=&password=")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("Email is required."));
    assert!(body.contains("Password is required."));
}

#[tokio::test]
async fn post_login_invalid_email_renders_error() {
    let state = test_state().await;
    let app = Router::new()
        .route("/login", post(auth_controller::post_login))
        .with_state(state);

    let res = app
        .oneshot(form_request("/login", "email=not-an-email&password=123456"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("Invalid email."));
    assert!(!body.contains("Password is required."));
}

#[tokio::test]
async fn post_register_password_mismatch_renders_error() {
    let state = test_state().await;
    let app = Router::new()
        .route("/register", post(auth_controller::post_register))
        .with_state(state);

    let res = app
        .oneshot(form_request(
            "/register",
            "name=Test+User&email=test%40example.com&password=123456&rePassword=654321",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("Passwords do not match."));
    // entered values survive the round trip
    assert!(body.contains("value=\"Test User\""));
}

#[tokio::test]
async fn post_register_short_fields_render_errors() {
    let state = test_state().await;
    let app = Router::new()
        .route("/register", post(auth_controller::post_register))
        .with_state(state);

    let res = app
        .oneshot(form_request(
            "/register",
            "name=a&email=test%40example.com&password=123&rePassword=123",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("Name must be at least 2 characters."));
    assert!(body.contains("Password must be at least 6 characters."));
}

#[tokio::test]
async fn post_register_missing_repeat_password_renders_error() {
    let state = test_state().await;
    let app = Router::new()
        .route("/register", post(auth_controller::post_register))
        .with_state(state);

    let res = app
        .oneshot(form_request(
            "/register",
            "name=Test+User&email=test%40example.com&password=123456&rePassword=",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("Repeat password is required."));
}

#[tokio::test]
async fn logout_clears_cookie_and_redirects_home() {
    let state = test_state().await;
    let cookie_name = state.settings.jwt_cookie_name.clone();
    let app = Router::new()
        .route("/logout", get(auth_controller::logout))
        .with_state(state);

    let req = Request::builder().uri("/logout").body(axum::body::Body::empty()).unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/");
    let cookie = res.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with(&format!("{cookie_name}=")));
}

#[tokio::test]
async fn auth_error_page_shows_message_for_code() {
    let state = test_state().await;
    let app = Router::new()
        .route("/auth/error", get(auth_controller::get_auth_error))
        .with_state(state);

    let req = Request::builder()
        .uri("/auth/error?error=AccessDenied")
        .body(axum::body::Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("id=\"auth-error\""));
    assert!(body.contains("You do not have permission to sign in."));
}

#[tokio::test]
async fn auth_error_page_without_code_shows_nothing() {
    let state = test_state().await;
    let app = Router::new()
        .route("/auth/error", get(auth_controller::get_auth_error))
        .with_state(state);

    let req = Request::builder()
        .uri("/auth/error")
        .header("HX-Request", "true")
        .body(axum::body::Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(!body.contains("id=\"auth-error\""));
    assert!(body.contains("Back to login"));
    // HTMX gets the bare page, no layout
    assert!(!body.contains("<html"));
}
