use std::net::SocketAddr;

use mongodb::{bson::oid::ObjectId, Client};

use cryptodesk::{
    config, routes,
    services::{db_init, payment_gateway::PaymentGatewayClient},
    templates, AppState,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    // Mongo connection
    let client = match Client::with_uri_str(&settings.mongodb_uri).await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("failed to connect to MongoDB: {e}");
            std::process::exit(1);
        }
    };
    let db = client.database(&settings.mongodb_db);

    if let Err(e) = db_init::ensure_indexes(&db).await {
        tracing::warn!("index setup failed: {e}");
    }

    let payments = PaymentGatewayClient::from_settings(&settings);
    if !payments.has_keys() {
        tracing::warn!("payment gateway keys missing; checkout orders will fail");
    }

    let (events_tx, _events_rx) = tokio::sync::broadcast::channel::<(ObjectId, String)>(64);

    let state = AppState {
        hbs: templates::build_handlebars(),
        db,
        settings: settings.clone(),
        payments,
        events_tx,
    };

    let app = routes::app(state);

    let ip = match settings.host.parse::<std::net::IpAddr>() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::error!("invalid HOST {:?}: {e}", settings.host);
            std::process::exit(1);
        }
    };
    let addr = SocketAddr::from((ip, settings.port));
    tracing::info!("listening on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("bind {addr} failed: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
    }
}
