//! Query hash type and digest computation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte Blake2b-256 digest identifying a data query.
///
/// The hash is a pure function of `(query_string, granularity)` — identical
/// submissions from different callers collide to the same digest, which is
/// what drives request deduplication.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryHash([u8; 32]);

impl QueryHash {
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

    /// Compute the digest of a query: Blake2b-256 over the query bytes
    /// followed by the granularity as little-endian u64.
    pub fn compute(query_string: &str, granularity: u64) -> Self {
        use blake2::digest::consts::U32;
        use blake2::{Blake2b, Digest};

        let mut hasher = Blake2b::<U32>::new();
        hasher.update(query_string.as_bytes());
        hasher.update(granularity.to_le_bytes());

        let result = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        Self(out)
    }
}

impl fmt::Debug for QueryHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QueryHash({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for QueryHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_is_deterministic() {
        let a = QueryHash::compute("json(https://example.com/btc).price", 1000);
        let b = QueryHash::compute("json(https://example.com/btc).price", 1000);
        assert_eq!(a, b);
    }

    #[test]
    fn granularity_changes_the_hash() {
        let a = QueryHash::compute("json(https://example.com/btc).price", 1000);
        let b = QueryHash::compute("json(https://example.com/btc).price", 100);
        assert_ne!(a, b);
    }

    #[test]
    fn query_string_changes_the_hash() {
        let a = QueryHash::compute("json(https://example.com/btc).price", 1000);
        let b = QueryHash::compute("json(https://example.com/eth).price", 1000);
        assert_ne!(a, b);
    }

    #[test]
    fn computed_hash_is_not_zero() {
        assert!(!QueryHash::compute("", 0).is_zero());
    }
}
