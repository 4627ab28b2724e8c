use axum::{
    extract::{Extension, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    models::{Beneficiary, CurrentUser},
    render,
    services::beneficiary_service::{self, NewBeneficiary},
    AppState,
};

use super::{page, template_error};

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Html("Unauthorized".to_string())).into_response()
}

fn list_rows(items: &[Beneficiary]) -> Vec<serde_json::Value> {
    items
        .iter()
        .map(|b| {
            json!({
                "beneficiary_id": b.beneficiary_id,
                "name": b.name,
                "email": b.email,
                "destination": b.destination_label(),
                "created_at": chrono::DateTime::from_timestamp(b.created_at, 0)
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default(),
            })
        })
        .collect()
}

async fn list_ctx(state: &AppState, user: &CurrentUser) -> serde_json::Value {
    match beneficiary_service::list_beneficiaries(state, user.id).await {
        Ok(items) if items.is_empty() => json!({ "items": null, "error": null }),
        Ok(items) => json!({ "items": list_rows(&items), "error": null }),
        Err(e) => {
            tracing::error!("listing beneficiaries failed: {e}");
            json!({ "items": null, "error": "Could not load beneficiaries." })
        }
    }
}

// GET /beneficiaries
pub async fn get_beneficiaries(
    State(state): State<AppState>,
    headers: HeaderMap,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    let form = render::render_page(
        &state,
        "partials/beneficiary_form",
        &json!({ "values": {}, "errors": {}, "succ": "" }),
    );
    let list_data = list_ctx(&state, &u).await;
    let list = render::render_page(&state, "partials/beneficiary_list", &list_data);

    let body = match state
        .hbs
        .render("pages/beneficiaries", &json!({ "form": form, "list": list }))
    {
        Ok(s) => s,
        Err(e) => return template_error(e),
    };

    page(&state, &headers, StatusCode::OK, "Beneficiaries", body, Some(&u))
}

// GET /beneficiaries/list
pub async fn get_beneficiary_list(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    let list_data = list_ctx(&state, &u).await;
    let html = render::render_page(&state, "partials/beneficiary_list", &list_data);
    (StatusCode::OK, Html(html)).into_response()
}

#[derive(Deserialize)]
pub struct BeneficiaryForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, rename = "bankAccount")]
    pub bank_account: Option<String>,
    #[serde(default)]
    pub ifsc: Option<String>,
    #[serde(default)]
    pub vpa: Option<String>,
}

impl From<BeneficiaryForm> for NewBeneficiary {
    fn from(f: BeneficiaryForm) -> Self {
        Self {
            name: f.name,
            email: f.email,
            phone: f.phone,
            bank_account: f.bank_account,
            ifsc: f.ifsc,
            vpa: f.vpa,
        }
    }
}

// POST /beneficiaries
pub async fn post_beneficiary(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Form(form): Form<BeneficiaryForm>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    let input = NewBeneficiary::from(form);

    match beneficiary_service::register_beneficiary(&state, u.id, &input).await {
        Ok(b) => {
            let html = render::render_page(
                &state,
                "partials/beneficiary_form",
                &json!({
                    "values": {},
                    "errors": {},
                    "succ": format!("Beneficiary {} added.", b.beneficiary_id),
                }),
            );
            let mut res = (StatusCode::OK, Html(html)).into_response();
            res.headers_mut()
                .insert("HX-Trigger", HeaderValue::from_static("beneficiariesUpdated"));
            res
        }
        Err(errs) => {
            let html = render::render_page(
                &state,
                "partials/beneficiary_form",
                &json!({ "values": form_values(&input), "errors": errs, "succ": "" }),
            );
            (StatusCode::OK, Html(html)).into_response()
        }
    }
}

fn form_values(input: &NewBeneficiary) -> serde_json::Value {
    json!({
        "name": input.name,
        "email": input.email,
        "phone": input.phone,
        "bankAccount": input.bank_account,
        "ifsc": input.ifsc,
        "vpa": input.vpa,
    })
}

// GET /api/beneficiaries
pub async fn api_list_beneficiaries(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(u)) = user else {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "unauthorized" }))).into_response();
    };

    match beneficiary_service::list_beneficiaries(&state, u.id).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => {
            tracing::error!("listing beneficiaries failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "could not load beneficiaries" })),
            )
                .into_response()
        }
    }
}
