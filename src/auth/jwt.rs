use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::state::AppState;

/// Session token payload. Validity is determined by signature and expiry
/// alone; nothing is kept server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: usize,
}

/// Signing and verification keys derived from the process-wide secret.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let cfg = &state.config.jwt;
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            ttl: Duration::from_secs((cfg.ttl_minutes as u64) * 60),
        }
    }
}

impl JwtKeys {
    /// Issues a token asserting `email` until now + ttl.
    pub fn sign(&self, email: &str) -> anyhow::Result<String> {
        let exp = OffsetDateTime::now_utc() + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            email: email.to_string(),
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        debug!(email = %email, "session token signed");
        Ok(token)
    }

    /// Verifies signature and expiry. Only HS256 is accepted: a token signed
    /// with any other algorithm fails even under the matching secret.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(email = %data.claims.email, "session token verified");
        Ok(data.claims)
    }
}
