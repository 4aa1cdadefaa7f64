//! Password hashing using argon2
//!
//! Stored credentials are the hex-encoded salt and digest joined by a `.`,
//! so every persisted value looks like `<salt-hex>.<digest-hex>`.
//!
//! # Performance Considerations
//!
//! Argon2 is intentionally CPU-intensive. For async contexts, use the
//! `*_async` variants which run on the blocking thread pool.

use argon2::{password_hash::rand_core::{OsRng, RngCore}, Argon2};
use thiserror::Error;

/// Random salt length in bytes. Hex-encoded in the stored credential.
const SALT_LEN: usize = 16;

/// Derived digest length in bytes.
const DIGEST_LEN: usize = 32;

/// Separator between the salt and digest components.
const SEPARATOR: char = '.';

/// Errors from hashing or verifying passwords
#[derive(Debug, Error)]
pub enum PasswordError {
    /// The stored credential is not a `<salt-hex>.<digest-hex>` pair.
    /// This is a caller contract violation, not a wrong password.
    #[error("stored credential is not a valid salt.digest pair")]
    MalformedHash,

    #[error("password hashing failed: {0}")]
    Hash(argon2::Error),

    #[error("hashing task failed: {0}")]
    Task(String),
}

/// Password hashing service
///
/// Uses Argon2id as the derivation function, in raw-digest mode so the
/// stored format stays a plain salt/digest pair.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password with a fresh random salt (blocking operation)
    ///
    /// Returns `<salt-hex>.<digest-hex>`. Two calls with the same password
    /// produce different outputs because the salt is regenerated each time.
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        let digest = derive_digest(password, &salt).map_err(PasswordError::Hash)?;

        Ok(format!(
            "{}{SEPARATOR}{}",
            hex::encode(salt),
            hex::encode(digest)
        ))
    }

    /// Hash a password asynchronously (non-blocking)
    ///
    /// Spawns the CPU-intensive work on the blocking thread pool,
    /// preventing it from blocking the async runtime.
    pub async fn hash_async(password: String) -> Result<String, PasswordError> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| PasswordError::Task(e.to_string()))?
    }

    /// Verify a password against a stored credential (blocking operation)
    ///
    /// Recomputes the digest with the salt extracted from `stored` and
    /// returns whether it matches the expected digest exactly. A `stored`
    /// value that is not a `salt.digest` pair fails with
    /// [`PasswordError::MalformedHash`] rather than verifying as false.
    pub fn verify(password: &str, stored: &str) -> Result<bool, PasswordError> {
        let (salt_hex, digest_hex) = stored
            .split_once(SEPARATOR)
            .ok_or(PasswordError::MalformedHash)?;
        if salt_hex.is_empty() || digest_hex.is_empty() {
            return Err(PasswordError::MalformedHash);
        }

        let salt = hex::decode(salt_hex).map_err(|_| PasswordError::MalformedHash)?;
        let expected = hex::decode(digest_hex).map_err(|_| PasswordError::MalformedHash)?;

        // A salt argon2 rejects (e.g. too short) can only come from a
        // corrupt stored value, so it reports as malformed too.
        let digest = derive_digest(password, &salt).map_err(|_| PasswordError::MalformedHash)?;

        Ok(digest[..] == expected[..])
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, stored: String) -> Result<bool, PasswordError> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &stored))
            .await
            .map_err(|e| PasswordError::Task(e.to_string()))?
    }
}

/// Raw Argon2id digest of `password` under `salt`. Deterministic for a
/// given salt and password.
fn derive_digest(password: &str, salt: &[u8]) -> Result<[u8; DIGEST_LEN], argon2::Error> {
    let mut digest = [0u8; DIGEST_LEN];
    Argon2::default().hash_password_into(password.as_bytes(), salt, &mut digest)?;
    Ok(digest)
}
