use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub host: String,
    pub port: u16,

    pub jwt_secret: String,
    pub jwt_cookie_name: String,
    pub cookie_secure: bool,

    // payment gateway
    pub payment_key_id: String,
    pub payment_key_secret: String,
    pub payment_api_base: String,
    pub checkout_script_url: String,
    pub default_currency: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let cookie_secure = env::var("COOKIE_SECURE")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    Settings {
        mongodb_uri: env_or("MONGODB_URI", "mongodb://localhost:27017"),
        mongodb_db: env_or("MONGODB_DB", "cryptodesk"),
        host: env_or("HOST", "127.0.0.1"),
        port,
        jwt_secret: env_or("JWT_SECRET", "change-me-dev-secret"),
        jwt_cookie_name: env_or("JWT_COOKIE_NAME", "auth"),
        cookie_secure,
        payment_key_id: env_or("PAYMENT_KEY_ID", ""),
        payment_key_secret: env_or("PAYMENT_KEY_SECRET", ""),
        payment_api_base: env_or("PAYMENT_API_BASE", "https://api.razorpay.com/v1"),
        checkout_script_url: env_or(
            "CHECKOUT_SCRIPT_URL",
            "https://checkout.razorpay.com/v1/checkout.js",
        ),
        default_currency: env_or("DEFAULT_CURRENCY", "INR").to_uppercase(),
    }
}
