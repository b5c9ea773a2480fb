//! Cryptographic building blocks for lockbox.
//!
//! This module provides:
//! - AES-256-GCM sealing and opening of printable envelopes (`encryption`)
//! - Argon2id keyed password hashing (`password`)
//! - Symmetric key generation, import/export and file persistence (`keys`)
//!
//! Every primitive is delegated to an audited crate; nothing cryptographic
//! is implemented here beyond marshalling bytes in and out.

pub mod encryption;
pub mod keys;
pub mod password;

pub use encryption::{open, seal};
pub use keys::SymmetricKey;
