//! A string wrapper for secret material.
//!
//! `SensitiveString` holds passwords, exported keys and decrypted plaintext.
//! It zeroes its backing memory on drop, redacts itself in `Debug`, has no
//! `Display` impl at all, and compares in constant time.  Code that really
//! needs the inner value must say so explicitly via [`SensitiveString::expose`].

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secret string that is zeroed on drop and never printed by accident.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SensitiveString {
    inner: String,
}

impl SensitiveString {
    /// Wrap a value as sensitive.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Access the inner string.  The name is deliberately loud: call sites
    /// should be easy to audit.
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Access the inner string as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }

    /// Length of the inner string in bytes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<String> for SensitiveString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SensitiveString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Debug for SensitiveString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SensitiveString(<redacted>)")
    }
}

impl PartialEq for SensitiveString {
    /// Constant-time comparison so equality checks on secrets do not leak
    /// how far the match got.
    fn eq(&self, other: &Self) -> bool {
        self.inner.as_bytes().ct_eq(other.inner.as_bytes()).into()
    }
}

impl Eq for SensitiveString {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let secret = SensitiveString::new("hunter2");
        let rendered = format!("{secret:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn expose_returns_the_inner_value() {
        let secret = SensitiveString::new("hunter2");
        assert_eq!(secret.expose(), "hunter2");
        assert_eq!(secret.as_bytes(), b"hunter2");
    }

    #[test]
    fn equality_matches_on_content() {
        let a = SensitiveString::new("same");
        let b = SensitiveString::new("same");
        let c = SensitiveString::new("different");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
