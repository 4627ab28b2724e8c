use std::collections::HashMap;

use axum_extra::extract::cookie::{Cookie, SameSite};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use mongodb::bson::{doc, oid::ObjectId};
use regex::Regex;

use crate::{models::User, AppState};

pub type FieldErrors = HashMap<String, String>;

#[derive(serde::Serialize)]
struct Claims {
    sub: String,
    exp: usize,
}

pub fn is_valid_email(email: &str) -> bool {
    let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    re.is_match(email)
}

pub fn form_error(msg: &str) -> FieldErrors {
    let mut errs = FieldErrors::new();
    errs.insert("_form".into(), msg.into());
    errs
}

pub fn make_jwt_with_days(
    state: &AppState,
    user_id: &ObjectId,
    days: i64,
) -> Result<String, String> {
    let exp = (Utc::now() + Duration::days(days)).timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_hex(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.settings.jwt_secret.as_bytes()),
    )
    .map_err(|e| e.to_string())
}

pub fn auth_cookie(state: &AppState, token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(state.settings.jwt_cookie_name.clone(), token);
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    if state.settings.cookie_secure {
        cookie.set_secure(true);
    }
    cookie
}

pub fn clear_auth_cookie(state: &AppState) -> Cookie<'static> {
    let mut cookie = Cookie::new(state.settings.jwt_cookie_name.clone(), "");
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.make_removal();
    cookie
}

pub async fn login_user(
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<User, FieldErrors> {
    let users = state.db.collection::<User>("users");

    let user = match users.find_one(doc! { "email": email }, None).await {
        Ok(Some(u)) => u,
        Ok(None) => return Err(form_error("Invalid email or password.")),
        Err(e) => {
            tracing::error!("login lookup failed: {e}");
            return Err(form_error("Server error. Please try again."));
        }
    };

    // accounts created through an OAuth provider have no password to check
    if user.is_oauth && user.password.is_empty() {
        return Err(form_error("This account signs in with an external provider."));
    }

    if !verify(password, &user.password).unwrap_or(false) {
        return Err(form_error("Invalid email or password."));
    }

    Ok(user)
}

pub async fn register_user(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
) -> Result<ObjectId, FieldErrors> {
    let users = state.db.collection::<User>("users");

    // unique email; the index catches races
    match users.find_one(doc! { "email": email }, None).await {
        Ok(Some(_)) => {
            let mut errs = FieldErrors::new();
            errs.insert("email".into(), "Email has already been taken!".into());
            return Err(errs);
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("register lookup failed: {e}");
            return Err(form_error("There is a problem registering this user!"));
        }
    }

    let pw_hash = hash(password, DEFAULT_COST)
        .map_err(|_| form_error("There is a problem registering this user!"))?;

    let now = Utc::now().timestamp();
    let user = User {
        id: ObjectId::new(),
        name: name.to_string(),
        email: email.to_string(),
        password: pw_hash,
        is_verified: false,
        is_oauth: false,
        created_at: now,
        updated_at: now,
    };

    if let Err(e) = users.insert_one(&user, None).await {
        if e.to_string().contains("E11000") {
            let mut errs = FieldErrors::new();
            errs.insert("email".into(), "Email has already been taken!".into());
            return Err(errs);
        }
        tracing::error!("register insert failed: {e}");
        return Err(form_error("There is a problem registering this user!"));
    }

    tracing::info!(user_id = %user.id.to_hex(), "user registered");
    Ok(user.id)
}

/// Message shown on the auth error page for an error code from the query string.
///
/// `None` means there is nothing to display.
pub fn auth_error_message(code: Option<&str>) -> Option<&'static str> {
    let code = code.map(str::trim).filter(|c| !c.is_empty())?;

    let msg = match code {
        "Configuration" => "There is a problem with the server configuration.",
        "AccessDenied" => "You do not have permission to sign in.",
        "Verification" => {
            "The sign in link is no longer valid. It may have been used already or it may have expired."
        }
        "CredentialsSignin" => "Sign in failed. Check the details you provided are correct.",
        "OAuthAccountNotLinked" => {
            "To confirm your identity, sign in with the same account you used originally."
        }
        "SessionRequired" => "Please sign in to access this page.",
        _ => "Unable to sign in. Please try again.",
    };
    Some(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_error_code_shows_nothing() {
        assert_eq!(auth_error_message(None), None);
        assert_eq!(auth_error_message(Some("")), None);
        assert_eq!(auth_error_message(Some("   ")), None);
    }

    #[test]
    fn known_and_unknown_codes_map_to_messages() {
        assert!(auth_error_message(Some("AccessDenied")).unwrap().contains("permission"));
        assert!(auth_error_message(Some("Verification")).unwrap().contains("no longer valid"));
        assert_eq!(
            auth_error_message(Some("SomethingElse")),
            Some("Unable to sign in. Please try again.")
        );
    }
}
