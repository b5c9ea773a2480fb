//! lockbox — a single-key vault facade.
//!
//! Generate a symmetric key, persist it, and use it to hash and verify
//! passwords or to lock and unlock opaque strings.  Every cryptographic
//! primitive is delegated to audited crates (`aes-gcm`, `argon2`, `sha2`);
//! this crate only marshals inputs, validates formats and maps every
//! failure into the one [`VaultError`] type.

pub mod crypto;
pub mod errors;
pub mod sensitive;
pub mod vault;

pub use errors::{Result, VaultError};
pub use sensitive::SensitiveString;
pub use vault::Vault;
