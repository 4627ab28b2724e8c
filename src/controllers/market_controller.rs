use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::{
    models::{CryptoSnapshot, NewsItem},
    render,
    services::market_service,
    AppState,
};

#[derive(Deserialize)]
pub struct MarketQuery {
    pub currency: Option<String>,
}

// POST /market/snapshots?currency=USD  (body: [CryptoSnapshot])
pub async fn post_market_snapshots(
    State(state): State<AppState>,
    Query(q): Query<MarketQuery>,
    Json(snapshots): Json<Vec<CryptoSnapshot>>,
) -> Response {
    let currency = q
        .currency
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| state.settings.default_currency.clone());

    let ctx = market_service::market_table_ctx(snapshots, &currency);
    let html = render::render_page(&state, "partials/market_table", &ctx);
    (StatusCode::OK, Html(html)).into_response()
}

// POST /news/feed  (body: [NewsItem])
pub async fn post_news_feed(
    State(state): State<AppState>,
    Json(items): Json<Vec<NewsItem>>,
) -> Response {
    let ctx = market_service::news_list_ctx(items);
    let html = render::render_page(&state, "partials/news_list", &ctx);
    (StatusCode::OK, Html(html)).into_response()
}
