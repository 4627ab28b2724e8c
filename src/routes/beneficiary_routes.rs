use axum::{Router, routing::get};
use crate::{AppState, controllers::beneficiary_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/beneficiaries",
            get(beneficiary_controller::get_beneficiaries)
                .post(beneficiary_controller::post_beneficiary),
        )
        .route("/beneficiaries/list", get(beneficiary_controller::get_beneficiary_list))
        .route("/api/beneficiaries", get(beneficiary_controller::api_list_beneficiaries))
}
