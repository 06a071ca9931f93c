//! Account identity type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque 32-byte account identity.
///
/// The core never interprets the bytes; identities are supplied by the
/// surrounding transport (key hashes, addresses, test fixtures).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId([u8; 32]);

impl AccountId {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Deterministic identity from a small integer — test fixtures and
    /// examples only need distinct identities, not real key material.
    pub fn from_index(index: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&index.to_be_bytes());
        Self(bytes)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

// Inline hex encoding to avoid adding the `hex` crate as a dependency of types.
mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_index_is_distinct_and_deterministic() {
        assert_eq!(AccountId::from_index(7), AccountId::from_index(7));
        assert_ne!(AccountId::from_index(7), AccountId::from_index(8));
    }

    #[test]
    fn zero_is_zero() {
        assert!(AccountId::ZERO.is_zero());
        assert!(!AccountId::from_index(1).is_zero());
    }

    #[test]
    fn display_is_full_hex() {
        let id = AccountId::from_index(1);
        let s = id.to_string();
        assert_eq!(s.len(), 64);
        assert!(s.ends_with("01"));
    }
}
