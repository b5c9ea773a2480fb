//! AES-256-GCM sealing and opening of printable envelopes.
//!
//! Each call to `seal` generates a fresh random 12-byte nonce.  The
//! envelope is self-contained: everything `open` needs travels inside it.
//!
//! Layout of the base64-decoded envelope:
//!
//! ```text
//! [ version tag: 4 bytes | nonce: 12 bytes | ciphertext + 16-byte auth tag ]
//! ```

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::crypto::keys::SymmetricKey;
use crate::errors::{Result, VaultError};

/// Version tag prefixed to every envelope.
const ENVELOPE_VERSION: [u8; 4] = [0x31, 0x42, 0x04, 0x00];

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
const TAG_LEN: usize = 16;

/// Smallest possible decoded envelope: tag + nonce + auth tag over an
/// empty plaintext.
const MIN_ENVELOPE_LEN: usize = ENVELOPE_VERSION.len() + NONCE_LEN + TAG_LEN;

/// Encrypt `plaintext` under `key`, returning a printable envelope.
pub fn seal(key: &SymmetricKey, plaintext: &[u8]) -> Result<String> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Encryption(format!("invalid key length: {e}")))?;

    // Fresh random nonce per call; never caller-supplied.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| VaultError::Encryption(format!("encryption error: {e}")))?;

    let mut envelope = Vec::with_capacity(ENVELOPE_VERSION.len() + NONCE_LEN + ciphertext.len());
    envelope.extend_from_slice(&ENVELOPE_VERSION);
    envelope.extend_from_slice(&nonce);
    envelope.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(envelope))
}

/// Decrypt an envelope produced by [`seal`].
///
/// Authentication is all-or-nothing: a failed tag check returns an error
/// and no plaintext, ever.  The error is deliberately opaque — it does not
/// distinguish a wrong key from tampering.
pub fn open(key: &SymmetricKey, envelope: &str) -> Result<Vec<u8>> {
    let decoded = BASE64
        .decode(envelope.trim())
        .map_err(|_| VaultError::Decryption)?;

    if decoded.len() < MIN_ENVELOPE_LEN {
        return Err(VaultError::Decryption);
    }

    let (version, rest) = decoded.split_at(ENVELOPE_VERSION.len());
    if version != ENVELOPE_VERSION.as_slice() {
        return Err(VaultError::Decryption);
    }

    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| VaultError::Decryption)?;

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| VaultError::Decryption)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_is_versioned() {
        let key = SymmetricKey::generate().unwrap();
        let envelope = seal(&key, b"payload").unwrap();

        let decoded = BASE64.decode(&envelope).unwrap();
        assert_eq!(&decoded[..4], ENVELOPE_VERSION.as_slice());
    }

    #[test]
    fn open_rejects_unknown_version() {
        let key = SymmetricKey::generate().unwrap();
        let envelope = seal(&key, b"payload").unwrap();

        let mut decoded = BASE64.decode(&envelope).unwrap();
        decoded[0] ^= 0xFF;
        let tampered = BASE64.encode(&decoded);

        assert!(matches!(open(&key, &tampered), Err(VaultError::Decryption)));
    }

    #[test]
    fn open_rejects_non_base64() {
        let key = SymmetricKey::generate().unwrap();
        let result = open(&key, "!!! not base64 !!!");
        assert!(matches!(result, Err(VaultError::Decryption)));
    }

    #[test]
    fn open_rejects_short_envelope() {
        let key = SymmetricKey::generate().unwrap();
        let result = open(&key, &BASE64.encode([0u8; 8]));
        assert!(matches!(result, Err(VaultError::Decryption)));
    }
}
