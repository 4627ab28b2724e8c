use axum::{
    http::{header, Request, StatusCode},
    routing::{get, post},
    Router,
};
use cryptodesk::controllers::beneficiary_controller;
use tower::ServiceExt;

mod common;
use common::{response_body_string, test_state, test_user};

fn form_request(body: &'static str) -> Request<axum::body::Body> {
    Request::builder()
        .method("POST")
        .uri("/beneficiaries")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(axum::body::Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn post_beneficiary_unauthorized_returns_401() {
    let state = test_state().await;
    let app = Router::new()
        .route("/beneficiaries", post(beneficiary_controller::post_beneficiary))
        .with_state(state);

    let res = app
        .oneshot(form_request("name=Priya&email=priya%40example.com&vpa=priya%40upi"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = response_body_string(res).await;
    assert!(body.to_lowercase().contains("unauthorized"));
}

#[tokio::test]
async fn post_beneficiary_without_destination_renders_form_error() {
    let state = test_state().await;
    let app = Router::new()
        .route("/beneficiaries", post(beneficiary_controller::post_beneficiary))
        .with_state(state);

    let mut req =
        form_request("name=Priya&email=priya%40example.com&phone=&vpa=&bankAccount=&ifsc=");
    req.extensions_mut().insert(test_user());

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("HX-Trigger").is_none());

    let body = response_body_string(res).await;
    assert!(body.contains("Provide either a UPI address or bank account details."));
    assert!(body.contains("value=\"Priya\""));
}

#[tokio::test]
async fn post_beneficiary_bad_bank_details_render_field_errors() {
    let state = test_state().await;
    let app = Router::new()
        .route("/beneficiaries", post(beneficiary_controller::post_beneficiary))
        .with_state(state);

    let mut req = form_request("name=P&email=nope&bankAccount=12ab&ifsc=XXXX");
    req.extensions_mut().insert(test_user());

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("HX-Trigger").is_none());

    let body = response_body_string(res).await;
    assert!(body.contains("Name must be at least 2 characters."));
    assert!(body.contains("Invalid email."));
    assert!(body.contains("Account number must be 9 to 18 digits."));
    assert!(body.contains("Invalid IFSC."));
}

#[tokio::test]
async fn beneficiary_list_and_api_require_login() {
    let state = test_state().await;
    let app = Router::new()
        .route("/beneficiaries/list", get(beneficiary_controller::get_beneficiary_list))
        .route("/api/beneficiaries", get(beneficiary_controller::api_list_beneficiaries))
        .with_state(state);

    for uri in ["/beneficiaries/list", "/api/beneficiaries"] {
        let req = Request::builder().uri(uri).body(axum::body::Body::empty()).unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[test]
fn beneficiaries_page_refreshes_list_on_server_events() {
    let hbs = cryptodesk::templates::build_handlebars();
    let html = hbs
        .render("pages/beneficiaries", &serde_json::json!({ "form": "", "list": "" }))
        .unwrap();

    assert!(html.contains("sse-connect=\"/events\""));
    assert!(html.contains("sse:beneficiariesUpdated"));
}
