// Password hashing and verification

use crate::auth::error::AuthError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::OnceLock;

/// Password used to build the hash that unknown usernames are verified against
const DUMMY_PASSWORD: &str = "linkboard-dummy-password";

static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// Password service for hashing and verification
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using Argon2id with a random salt; returns a PHC string
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))
    }

    /// Verify a password against a PHC hash
    ///
    /// `Ok(false)` on mismatch, `Err` only when the stored hash cannot be parsed.
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Burn one verification for a username that does not exist.
    ///
    /// Keeps "unknown user" and "wrong password" at the same cost.
    pub fn verify_against_dummy(password: &str) {
        let hash = match DUMMY_HASH.get() {
            Some(hash) => hash,
            None => match Self::hash_password(DUMMY_PASSWORD) {
                Ok(hash) => DUMMY_HASH.get_or_init(|| hash),
                Err(_) => return,
            },
        };
        let _ = Self::verify_password(password, hash);
    }
}
