#![allow(dead_code)]

use http_body_util::BodyExt;
use mongodb::{bson::oid::ObjectId, Client};
use cryptodesk::{
    config,
    models::CurrentUser,
    services::payment_gateway::PaymentGatewayClient,
    templates, AppState,
};

/// App state for controller tests. Mongo is never contacted by the paths under test.
pub async fn test_state_with_keys(key_id: &str, key_secret: &str) -> AppState {
    let mut settings = config::load();
    settings.payment_key_id = key_id.to_string();
    settings.payment_key_secret = key_secret.to_string();
    // discard port: nothing listens
    settings.payment_api_base = "http://127.0.0.1:9/v1".to_string();
    settings.checkout_script_url = "https://checkout.example.com/v1/checkout.js".to_string();
    settings.default_currency = "INR".to_string();

    let client = Client::with_uri_str(&settings.mongodb_uri)
        .await
        .expect("mongodb client");
    let db = client.database(&settings.mongodb_db);

    let payments = PaymentGatewayClient::from_settings(&settings);
    let (events_tx, _events_rx) = tokio::sync::broadcast::channel::<(ObjectId, String)>(16);

    AppState {
        hbs: templates::build_handlebars(),
        db,
        settings,
        payments,
        events_tx,
    }
}

pub async fn test_state() -> AppState {
    test_state_with_keys("", "").await
}

pub fn test_user() -> CurrentUser {
    CurrentUser {
        id: ObjectId::new(),
        email: "test@example.com".to_string(),
        name: "Test User".to_string(),
    }
}

pub async fn response_body_string(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}
