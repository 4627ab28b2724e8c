//! Library entrypoint for CryptoDesk.
//!
//! This file exists mainly to make controller tests easy (integration tests
//! under `tests/` can import the app state, routers, controllers, services).

pub mod config;
pub mod format;
pub mod ids;
pub mod models;

#[path = "middleware/auth.rs"]
pub mod auth;

pub mod services;

#[path = "views/render.rs"]
pub mod render;
pub mod templates;

pub mod controllers;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub hbs: templates::Hbs,
    pub db: mongodb::Database,
    pub settings: config::Settings,
    pub payments: services::payment_gateway::PaymentGatewayClient,
    /// `(owner, event name)`; each SSE stream only forwards its own user's events.
    pub events_tx: tokio::sync::broadcast::Sender<(mongodb::bson::oid::ObjectId, String)>,
}
