use thiserror::Error;

/// All errors that can occur in lockbox.
///
/// Every public operation funnels its failures into this one type; the
/// underlying library's message is preserved in the variant payload and
/// [`VaultError::code`] gives a stable short code for diagnostics.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Key lifecycle errors ---
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("Key import failed: {0}")]
    InvalidKey(String),

    #[error("Key file error: {0}")]
    KeyFile(String),

    // --- Password hashing errors ---
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Malformed password hash: {0}")]
    MalformedHash(String),

    // --- Encryption errors ---
    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed — wrong key or corrupted data")]
    Decryption,

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VaultError {
    /// Stable short code identifying the failure class, independent of the
    /// human-readable message.
    pub fn code(&self) -> &'static str {
        match self {
            VaultError::KeyGeneration(_) => "key_generation",
            VaultError::InvalidKey(_) => "invalid_key",
            VaultError::KeyFile(_) => "key_file",
            VaultError::PasswordHash(_) => "password_hash",
            VaultError::MalformedHash(_) => "malformed_hash",
            VaultError::Encryption(_) => "encryption",
            VaultError::Decryption => "decryption",
            VaultError::Io(_) => "io",
        }
    }
}

/// Convenience type alias for lockbox results.
pub type Result<T> = std::result::Result<T, VaultError>;
