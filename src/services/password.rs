// SPDX-License-Identifier: MIT

//! Password hashing with PBKDF2-HMAC-SHA256.
//!
//! Stored format: `pbkdf2$<iterations>$<salt_hex>$<key_hex>`. The iteration
//! count is embedded so it can be raised later without invalidating
//! existing hashes.

use crate::error::AppError;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use std::num::NonZeroU32;

static PBKDF2_ALG: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;
const PBKDF2_ITERATIONS: NonZeroU32 = match NonZeroU32::new(100_000) {
    Some(n) => n,
    None => unreachable!(),
};

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to generate salt")))?;

    let mut key = [0u8; KEY_LEN];
    pbkdf2::derive(
        PBKDF2_ALG,
        PBKDF2_ITERATIONS,
        &salt,
        password.as_bytes(),
        &mut key,
    );

    Ok(format!(
        "pbkdf2${}${}${}",
        PBKDF2_ITERATIONS.get(),
        hex::encode(salt),
        hex::encode(key)
    ))
}

/// Verify a password against a stored hash in constant time.
///
/// Malformed stored hashes verify as false rather than erroring, so a
/// corrupt row behaves like a wrong password instead of a 500.
pub fn verify_password(stored: &str, password: &str) -> bool {
    let parts: Vec<&str> = stored.split('$').collect();
    if parts.len() != 4 || parts[0] != "pbkdf2" {
        return false;
    }

    let iterations = match parts[1].parse::<u32>().ok().and_then(NonZeroU32::new) {
        Some(n) => n,
        None => return false,
    };
    let salt = match hex::decode(parts[2]) {
        Ok(s) => s,
        Err(_) => return false,
    };
    let expected = match hex::decode(parts[3]) {
        Ok(k) => k,
        Err(_) => return false,
    };

    pbkdf2::verify(PBKDF2_ALG, iterations, &salt, password.as_bytes(), &expected).is_ok()
}
