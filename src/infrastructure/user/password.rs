//! Password hashing with Argon2

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher as _, SaltString},
    Argon2,
};
#[cfg(test)]
use argon2::password_hash::{PasswordHash, PasswordVerifier};
use std::fmt::Debug;

use crate::domain::DomainError;

/// Turns plaintext passwords into storable hashes
pub trait PasswordHasher: Send + Sync + Debug {
    fn hash(&self, password: &str) -> Result<String, DomainError>;
}

/// Argon2id hasher with a random salt per password (PHC string output)
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }
}

/// Whether `password` produces `hash`; malformed hashes never match
#[cfg(test)]
pub(crate) fn hash_matches(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
