//! Data-request records and projections.

use serde::{Deserialize, Serialize};
use sibyl_types::QueryHash;

/// A registered data query. Immutable once created except for the
/// cumulative `total_tip`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRequest {
    /// Sequential id, starting at 1. Id 0 is reserved as the "not found"
    /// sentinel of the reverse lookup.
    pub id: u64,

    /// The query text (e.g. an API path expression).
    pub query_string: String,

    /// Human-readable tag such as a trading pair symbol.
    pub symbol_tag: String,

    /// Opaque pass-through field supplied at submission; the core never
    /// interprets it.
    pub reserved_field: u64,

    /// Requested result granularity (e.g. a decimal multiplier).
    pub granularity: u64,

    /// Digest of `(query_string, granularity)` — the dedup key.
    pub query_hash: QueryHash,

    /// Sum of all activation weights ever submitted for this query.
    pub total_tip: u128,
}

/// The read projection of a request returned by `get_request_vars`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestVars {
    pub symbol_tag: String,
    pub reserved_field: u64,
    pub query_hash: QueryHash,
    pub granularity: u64,
    pub total_tip: u128,
}

/// The most recently activated request, as seen by external readers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentVariables {
    pub request_id: u64,
    /// Opaque monotonic counter; starts at 1 on the first activation.
    pub difficulty: u64,
    pub query_string: String,
    pub granularity: u64,
    pub total_tip: u128,
}
