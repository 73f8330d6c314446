use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::auth::jwt::JwtKeys;
use crate::error::ApiError;

/// Custom header the frontend sends the session token in.
pub const TOKEN_HEADER: &str = "x-access-token";

/// Access guard: pulls the session token out of the request, validates it
/// and resolves the caller's identity. Handlers taking `AuthUser` never see
/// unauthenticated requests and never trust identity fields from the body.
pub struct AuthUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let token = match parts.headers.get(TOKEN_HEADER) {
            None => return Err(ApiError::TokenMissing),
            Some(value) => value.to_str().map_err(|_| ApiError::TokenInvalid)?,
        };

        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired token");
            ApiError::TokenInvalid
        })?;

        Ok(AuthUser(claims.email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    use crate::state::AppState;

    fn probe_app() -> (Router, JwtKeys) {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let app = Router::new()
            .route(
                "/whoami",
                get(|AuthUser(email): AuthUser| async move { email }),
            )
            .with_state(state);
        (app, keys)
    }

    async fn error_body(res: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("parse JSON")
    }

    #[tokio::test]
    async fn missing_token_is_rejected() {
        let (app, _) = probe_app();
        let res = app
            .oneshot(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_body(res).await["error"], "Token is missing");
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let (app, _) = probe_app();
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(TOKEN_HEADER, "definitely-not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_body(res).await["error"], "Invalid token");
    }

    #[tokio::test]
    async fn valid_token_resolves_identity() {
        let (app, keys) = probe_app();
        let token = keys.sign("user@example.com").expect("sign");
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(TOKEN_HEADER, token)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .expect("read body");
        assert_eq!(&bytes[..], b"user@example.com");
    }
}
