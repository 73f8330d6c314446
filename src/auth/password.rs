use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// One-way salted hash of a plaintext password.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash failed");
            anyhow::anyhow!("argon2: {e}")
        })?
        .to_string();
    Ok(hash)
}

/// Checks a plaintext password against a stored hash. A malformed stored
/// hash is an error, not a mismatch.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "stored password hash unparsable");
        anyhow::anyhow!("argon2: {e}")
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("hunter2-but-longer").expect("hash");
        assert!(verify_password("hunter2-but-longer", &hash).expect("verify"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("right-password").expect("hash");
        assert!(!verify_password("wrong-password", &hash).expect("verify"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        assert!(verify_password("anything", "not-a-valid-hash").is_err());
    }
}
