//! Keyed password hashing: Argon2id, then sealed under the vault key.
//!
//! `hash` produces an Argon2id PHC string with a fresh random salt, then
//! encrypts that string with [`crate::crypto::encryption`].  A stolen hash
//! database is useless without the vault key, and even with the key each
//! hash still has to be brute-forced through Argon2id.
//!
//! `verify` reverses the layers: open the envelope, parse the PHC string,
//! let the library do its constant-time comparison.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use zeroize::Zeroizing;

use crate::crypto::encryption;
use crate::crypto::keys::SymmetricKey;
use crate::errors::{Result, VaultError};
use crate::sensitive::SensitiveString;

/// Hash `secret` with Argon2id and seal the result under `key`.
///
/// The salt is regenerated on every call, so two hashes of the same
/// secret never match each other — only `verify` can relate them.
pub fn hash(key: &SymmetricKey, secret: &SensitiveString) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let phc = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| VaultError::PasswordHash(format!("Argon2id hashing failed: {e}")))?
        .to_string();

    encryption::seal(key, phc.as_bytes())
}

/// Check `secret` against a stored hash produced by [`hash`].
///
/// Returns `Ok(false)` on a clean mismatch.  A stored hash that cannot be
/// opened (wrong key, tampering) or parsed is an error, not a mismatch.
pub fn verify(key: &SymmetricKey, secret: &SensitiveString, stored: &str) -> Result<bool> {
    let phc_bytes = Zeroizing::new(encryption::open(key, stored)?);

    let phc = std::str::from_utf8(&phc_bytes)
        .map_err(|_| VaultError::MalformedHash("stored hash is not valid UTF-8".into()))?;

    let parsed = PasswordHash::new(phc)
        .map_err(|e| VaultError::MalformedHash(format!("not a PHC string: {e}")))?;

    match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(VaultError::PasswordHash(format!(
            "verification failed: {e}"
        ))),
    }
}
