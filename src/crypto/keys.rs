//! Symmetric key generation, import/export and file persistence.
//!
//! A key is exported as a lowercase hex string with this layout:
//!
//! ```text
//! hex( version tag (4 bytes) || key bytes (32 bytes) || checksum (32 bytes) )
//! ```
//!
//! The checksum is SHA-256 over the version tag and key bytes, so a
//! truncated or corrupted export is rejected before it can ever be used
//! for encryption.  A key file contains exactly this string, nothing else,
//! so the file and string forms are interchangeable.

use std::fs;
use std::path::Path;

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::errors::{Result, VaultError};
use crate::sensitive::SensitiveString;

/// Length of the raw key material in bytes (256 bits, AES-256).
pub(crate) const KEY_LEN: usize = 32;

/// Version tag prefixed to every exported key.
const KEY_VERSION: [u8; 4] = [0x31, 0x40, 0x04, 0x00];

/// Length of the SHA-256 checksum appended to every exported key.
const CHECKSUM_LEN: usize = 32;

/// Decoded length of an exported key: tag + key + checksum.
const EXPORT_LEN: usize = KEY_VERSION.len() + KEY_LEN + CHECKSUM_LEN;

/// A 256-bit symmetric key, zeroed on drop.
///
/// Immutable after construction; the raw bytes never leave this module
/// except through [`SymmetricKey::export`].
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    bytes: [u8; KEY_LEN],
}

impl SymmetricKey {
    /// Generate a fresh key from the OS random number generator.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; KEY_LEN];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| VaultError::KeyGeneration(format!("OS entropy source failed: {e}")))?;
        Ok(Self { bytes })
    }

    /// Export the key as a hex string (version tag + key + checksum).
    pub fn export(&self) -> SensitiveString {
        let mut material = Zeroizing::new(Vec::with_capacity(EXPORT_LEN));
        material.extend_from_slice(&KEY_VERSION);
        material.extend_from_slice(&self.bytes);
        material.extend_from_slice(&checksum(&self.bytes));
        SensitiveString::new(hex::encode(&*material))
    }

    /// Import a key from a previously exported string.
    ///
    /// Validates length, hex encoding, version tag and checksum; any
    /// failure rejects the whole input, never yielding a partial key.
    pub fn import(exported: &SensitiveString) -> Result<Self> {
        let decoded = Zeroizing::new(
            hex::decode(exported.expose().trim())
                .map_err(|e| VaultError::InvalidKey(format!("not valid hex: {e}")))?,
        );

        if decoded.len() != EXPORT_LEN {
            return Err(VaultError::InvalidKey(format!(
                "expected {EXPORT_LEN} bytes, got {}",
                decoded.len()
            )));
        }

        let (version, rest) = decoded.split_at(KEY_VERSION.len());
        let (key_bytes, stored_checksum) = rest.split_at(KEY_LEN);

        if version != KEY_VERSION.as_slice() {
            return Err(VaultError::InvalidKey("unsupported key version".into()));
        }

        let expected = checksum(key_bytes);
        if !bool::from(stored_checksum.ct_eq(&expected)) {
            return Err(VaultError::InvalidKey("checksum mismatch".into()));
        }

        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(key_bytes);
        Ok(Self { bytes })
    }

    /// Write the exported key to `path`.
    ///
    /// Creates parent directories, writes to a temp file in the same
    /// directory and renames it into place so readers never see a torn
    /// file.  On Unix the file is restricted to owner-only access.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    VaultError::KeyFile(format!("cannot create key directory: {e}"))
                })?;
            }
        }

        let exported = self.export();

        let parent = path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, exported.as_bytes())
            .map_err(|e| VaultError::KeyFile(format!("failed to write key file: {e}")))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&tmp_path, perms).map_err(|e| {
                VaultError::KeyFile(format!("failed to set key file permissions: {e}"))
            })?;
        }

        fs::rename(&tmp_path, path)
            .map_err(|e| VaultError::KeyFile(format!("failed to write key file: {e}")))?;

        // A save that leaves no file behind is a failure, not a no-op.
        if !path.exists() {
            return Err(VaultError::KeyFile(format!(
                "key file was not created at {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Load a key from a file written by [`SymmetricKey::save`].
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(VaultError::KeyFile(format!(
                "key file not found at {}",
                path.display()
            )));
        }

        let contents = SensitiveString::new(
            fs::read_to_string(path)
                .map_err(|e| VaultError::KeyFile(format!("failed to read key file: {e}")))?,
        );

        Self::import(&contents)
    }

    /// Access the raw key bytes for the crypto modules in this crate.
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey(<redacted>)")
    }
}

/// SHA-256 over the version tag and key bytes.
fn checksum(key_bytes: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(KEY_VERSION);
    hasher.update(key_bytes);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn export_import_roundtrip() {
        let key = SymmetricKey::generate().unwrap();
        let exported = key.export();

        // 4 + 32 + 32 bytes, hex-encoded.
        assert_eq!(exported.len(), EXPORT_LEN * 2);

        let imported = SymmetricKey::import(&exported).unwrap();
        assert_eq!(key.as_bytes(), imported.as_bytes());
    }

    #[test]
    fn import_rejects_bad_hex() {
        let result = SymmetricKey::import(&SensitiveString::new("not hex at all"));
        assert!(matches!(result, Err(VaultError::InvalidKey(_))));
    }

    #[test]
    fn import_rejects_wrong_length() {
        let result = SymmetricKey::import(&SensitiveString::new("deadbeef"));
        assert!(matches!(result, Err(VaultError::InvalidKey(_))));
    }

    #[test]
    fn import_rejects_wrong_version() {
        let key = SymmetricKey::generate().unwrap();
        let mut raw = hex::decode(key.export().expose()).unwrap();
        raw[0] ^= 0xFF;
        let tampered = SensitiveString::new(hex::encode(&raw));

        let result = SymmetricKey::import(&tampered);
        assert!(matches!(result, Err(VaultError::InvalidKey(_))));
    }

    #[test]
    fn import_rejects_corrupted_checksum() {
        let key = SymmetricKey::generate().unwrap();
        let mut raw = hex::decode(key.export().expose()).unwrap();
        // Flip a bit in the key portion; the checksum no longer matches.
        raw[10] ^= 0x01;
        let tampered = SensitiveString::new(hex::encode(&raw));

        let result = SymmetricKey::import(&tampered);
        assert!(matches!(result, Err(VaultError::InvalidKey(_))));
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.key");

        let key = SymmetricKey::generate().unwrap();
        key.save(&path).unwrap();

        let loaded = SymmetricKey::load(&path).unwrap();
        assert_eq!(key.as_bytes(), loaded.as_bytes());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("vault.key");

        let key = SymmetricKey::generate().unwrap();
        key.save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn load_fails_on_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nonexistent.key");

        let result = SymmetricKey::load(&path);
        assert!(matches!(result, Err(VaultError::KeyFile(_))));
    }

    #[test]
    fn load_fails_on_garbage_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.key");
        fs::write(&path, "this is not a key").unwrap();

        let result = SymmetricKey::load(&path);
        assert!(matches!(result, Err(VaultError::InvalidKey(_))));
    }

    #[cfg(unix)]
    #[test]
    fn key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.key");

        SymmetricKey::generate().unwrap().save(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = SymmetricKey::generate().unwrap();
        let rendered = format!("{key:?}");
        assert!(!rendered.contains(key.export().expose()));
    }
}
