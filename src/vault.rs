//! The `Vault` facade: one symmetric key, six operations.
//!
//! A vault is constructed only through its fallible factories, so a live
//! `Vault` always holds a fully validated key.  The key is immutable for
//! the vault's lifetime; there is no other state, which is what makes a
//! `&Vault` safe to share across threads.

use std::path::Path;

use zeroize::Zeroize;

use crate::crypto::keys::SymmetricKey;
use crate::crypto::{encryption, password};
use crate::errors::{Result, VaultError};
use crate::sensitive::SensitiveString;

/// A single-key crypto session.
///
/// ```no_run
/// use lockbox::{SensitiveString, Vault};
///
/// # fn main() -> lockbox::Result<()> {
/// let exported = Vault::generate_key()?;
/// let vault = Vault::from_key_string(&exported)?;
///
/// let envelope = vault.lock(&SensitiveString::new("api-token"))?;
/// let plaintext = vault.unlock(&envelope)?;
/// assert_eq!(plaintext.expose(), "api-token");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Vault {
    key: SymmetricKey,
}

impl Vault {
    /// Generate a fresh key and return it in exported form.
    ///
    /// Generate once, persist safely; the caller owns the material from
    /// here on.
    pub fn generate_key() -> Result<SensitiveString> {
        Ok(SymmetricKey::generate()?.export())
    }

    /// Generate a fresh key and write it straight to `path`.
    pub fn generate_key_file(path: impl AsRef<Path>) -> Result<()> {
        SymmetricKey::generate()?.save(path.as_ref())
    }

    /// Build a vault from a previously exported key string.
    pub fn from_key_string(exported: &SensitiveString) -> Result<Self> {
        Ok(Self {
            key: SymmetricKey::import(exported)?,
        })
    }

    /// Build a vault from a key file written by [`Vault::generate_key_file`]
    /// or [`SymmetricKey::save`].
    pub fn from_key_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            key: SymmetricKey::load(path.as_ref())?,
        })
    }

    /// Produce a keyed, salted password hash of `secret`.
    ///
    /// Every call salts afresh, so repeated calls on the same secret give
    /// different strings; use [`Vault::check_hash`] to relate them.
    pub fn hash(&self, secret: &SensitiveString) -> Result<String> {
        password::hash(&self.key, secret)
    }

    /// Check `secret` against a hash produced by [`Vault::hash`] under the
    /// same key.
    ///
    /// A well-formed hash that simply does not match is `Ok(false)`; a
    /// hash this key cannot open or parse is an error.
    pub fn check_hash(&self, secret: &SensitiveString, stored: &str) -> Result<bool> {
        password::verify(&self.key, secret, stored)
    }

    /// Encrypt `plaintext` into a self-contained printable envelope.
    pub fn lock(&self, plaintext: &SensitiveString) -> Result<String> {
        encryption::seal(&self.key, plaintext.as_bytes())
    }

    /// Decrypt and authenticate an envelope produced by [`Vault::lock`].
    pub fn unlock(&self, envelope: &str) -> Result<SensitiveString> {
        let bytes = encryption::open(&self.key, envelope)?;

        // `lock` only ever seals strings, so non-UTF-8 output means the
        // envelope did not come from this facade; treat it like any other
        // decryption failure and leave nothing behind.
        match String::from_utf8(bytes) {
            Ok(plaintext) => Ok(SensitiveString::new(plaintext)),
            Err(e) => {
                let mut bytes = e.into_bytes();
                bytes.zeroize();
                Err(VaultError::Decryption)
            }
        }
    }
}
