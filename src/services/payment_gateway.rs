use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;

/// Server-side client for the hosted payment gateway.
///
/// Built once at startup and shared through `AppState`.
#[derive(Clone)]
pub struct PaymentGatewayClient {
    http: Client,
    key_id: String,
    key_secret: String,
    base_url: String,
}

impl PaymentGatewayClient {
    pub fn new(key_id: String, key_secret: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            key_id,
            key_secret,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.payment_key_id.clone(),
            settings.payment_key_secret.clone(),
            settings.payment_api_base.clone(),
        )
    }

    pub fn has_keys(&self) -> bool {
        !self.key_id.trim().is_empty() && !self.key_secret.trim().is_empty()
    }

    /// Public key id; safe to embed in the checkout page.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Creates a gateway order for `amount` minor units (paise, cents).
    pub async fn create_order(
        &self,
        amount: u64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, String> {
        if !self.has_keys() {
            return Err("PAYMENT_KEY_ID / PAYMENT_KEY_SECRET are missing in .env".to_string());
        }

        let url = format!("{}/orders", self.base_url);
        let body = CreateOrderRequest {
            amount,
            currency,
            receipt,
        };

        let res = self
            .http
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(format!("payment gateway order failed: {status} {body}"));
        }

        res.json::<GatewayOrder>().await.map_err(|e| e.to_string())
    }
}

#[derive(Debug, Serialize)]
struct CreateOrderRequest<'a> {
    amount: u64,
    currency: &'a str,
    receipt: &'a str,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: u64,
    pub currency: String,

    #[serde(default)]
    pub receipt: Option<String>,

    // created | attempted | paid
    #[serde(default)]
    pub status: String,
}

/// Converts a major-unit amount to the gateway's minor units.
pub fn to_minor_units(amount: f64, currency: &str) -> Option<u64> {
    if !amount.is_finite() || amount <= 0.0 {
        return None;
    }

    let factor = match currency.to_uppercase().as_str() {
        "JPY" | "KRW" | "VND" | "CLP" | "ISK" => 1.0,
        _ => 100.0,
    };

    let minor = (amount * factor).round();
    if minor < 1.0 || minor > u64::MAX as f64 {
        return None;
    }
    Some(minor as u64)
}
