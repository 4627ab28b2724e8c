use axum::{Router, routing::post};
use crate::{AppState, controllers::market_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/market/snapshots", post(market_controller::post_market_snapshots))
        .route("/news/feed", post(market_controller::post_news_feed))
}
