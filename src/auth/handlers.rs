use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, MessageResponse, SignupRequest, TokenResponse},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::User,
    },
    error::ApiError,
    extract::ValidJson,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<SignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let email = payload.email.trim().to_lowercase();

    if email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation("Email and password are required".into()));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "signup with invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }

    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(email = %email, "signup for existing email");
        return Err(ApiError::Conflict("User already exists".into()));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, &email, &hash).await?;

    info!(email = %user.email, "user created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let email = payload.email.trim().to_lowercase();

    if email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation("Email and password are required".into()));
    }

    // Unknown email and wrong password fail identically.
    let user = match User::find_by_email(&state.db, &email).await? {
        Some(u) => u,
        None => {
            warn!(email = %email, "login for unknown email");
            return Err(ApiError::Unauthorized);
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %email, "login with wrong password");
        return Err(ApiError::Unauthorized);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user.email)?;

    info!(email = %user.email, "user logged in");
    Ok(Json(TokenResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@x.com"));
        assert!(!is_valid_email("spaces in@x.com"));
        assert!(!is_valid_email("a@nodot"));
    }
}
