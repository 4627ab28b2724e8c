use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::checkout_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/checkout", get(checkout_controller::get_checkout))
        .route("/checkout/order", post(checkout_controller::post_checkout_order))
}
