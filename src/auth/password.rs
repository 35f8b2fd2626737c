//! Password hashing and verification, independent of storage.

use anyhow::{Context, Result};

/// Bcrypt work factor. Fixed; not a deployment tunable.
const BCRYPT_COST: u32 = 8;

/// Derive a salted bcrypt hash for a plaintext password.
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, BCRYPT_COST).context("Failed to hash password")
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// A malformed or empty stored hash is treated as a mismatch, never
/// an error: the caller only cares whether the login succeeds.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    bcrypt::verify(password, stored_hash).unwrap_or(false)
}
