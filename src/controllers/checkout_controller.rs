use axum::{
    extract::{Extension, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    format::format_currency,
    models::CurrentUser,
    services::payment_gateway::to_minor_units,
    AppState,
};

use super::{page, template_error};

#[derive(Deserialize)]
pub struct CheckoutQuery {
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

fn currency_or_default(state: &AppState, currency: Option<&str>) -> String {
    currency
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_uppercase)
        .unwrap_or_else(|| state.settings.default_currency.clone())
}

// GET /checkout?amount=499&currency=INR
pub async fn get_checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(q): Query<CheckoutQuery>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let currency = currency_or_default(&state, q.currency.as_deref());
    let amount = q.amount.filter(|a| a.is_finite() && *a > 0.0);

    let ctx = json!({
        "script_url": state.settings.checkout_script_url,
        "key_id": state.payments.key_id(),
        "configured": state.payments.has_keys(),
        "amount": amount,
        "amount_label": amount.map(|a| format_currency(a, &currency)),
        "currency": currency,
        "user": user.as_ref().map(|Extension(u)| json!({ "name": u.name, "email": u.email })),
    });

    let body = match state.hbs.render("pages/checkout", &ctx) {
        Ok(s) => s,
        Err(e) => return template_error(e),
    };

    let user_ref = user.as_ref().map(|Extension(u)| u);
    page(&state, &headers, StatusCode::OK, "Checkout", body, user_ref)
}

#[derive(Deserialize)]
pub struct OrderForm {
    pub amount: String,
    #[serde(default)]
    pub currency: Option<String>,
}

// POST /checkout/order
pub async fn post_checkout_order(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Form(form): Form<OrderForm>,
) -> Response {
    let Some(Extension(u)) = user else {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "unauthorized" }))).into_response();
    };

    let currency = currency_or_default(&state, form.currency.as_deref());

    let parsed = form.amount.trim().parse::<f64>().ok();
    let minor = match parsed.and_then(|a| to_minor_units(a, &currency)) {
        Some(m) => m,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Amount must be a positive number." })),
            )
                .into_response();
        }
    };

    // gateway limit: 40 chars
    let receipt = format!("rcpt_{}_{}", &u.id.to_hex()[..8], chrono::Utc::now().timestamp());

    match state.payments.create_order(minor, &currency, &receipt).await {
        Ok(order) => {
            tracing::info!(order_id = %order.id, amount = order.amount, "payment order created");
            (
                StatusCode::OK,
                Json(json!({
                    "order": order,
                    "key_id": state.payments.key_id(),
                    "name": u.name,
                    "email": u.email,
                })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("payment order failed: {e}");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "Payment gateway unavailable right now." })),
            )
                .into_response()
        }
    }
}
