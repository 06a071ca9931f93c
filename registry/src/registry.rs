//! The request registry store.

use std::collections::HashMap;

use sibyl_types::QueryHash;

use crate::error::RegistryError;
use crate::request::{CurrentVariables, DataRequest, RequestVars};

/// Hash-deduplicated table of data requests.
///
/// `submit_query` is a single find-or-insert: the id allocation, tip
/// accounting and current-variables update all happen inside one call, so no
/// reader can observe a request without its activation applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestRegistry {
    requests: HashMap<u64, DataRequest>,
    by_hash: HashMap<QueryHash, u64>,
    next_id: u64,
    difficulty: u64,
    current: Option<CurrentVariables>,
}

impl RequestRegistry {
    pub fn new() -> Self {
        Self {
            requests: HashMap::new(),
            by_hash: HashMap::new(),
            next_id: 1,
            difficulty: 0,
            current: None,
        }
    }

    /// Rebuild a registry from previously captured state (snapshot restore).
    ///
    /// The reverse hash index is derived from the request table — it is not
    /// independent state.
    pub fn from_parts(
        requests: Vec<DataRequest>,
        next_id: u64,
        difficulty: u64,
        current: Option<CurrentVariables>,
    ) -> Self {
        let by_hash = requests.iter().map(|r| (r.query_hash, r.id)).collect();
        let requests = requests.into_iter().map(|r| (r.id, r)).collect();
        Self {
            requests,
            by_hash,
            next_id,
            difficulty,
            current,
        }
    }

    /// Register a query, or bump an existing one.
    ///
    /// Identical `(query_string, granularity)` pairs collide to the same id
    /// regardless of submitter. Every successful submission activates its
    /// request: it becomes the `CurrentVariables` target and the difficulty
    /// counter increments. Returns the request id.
    pub fn submit_query(
        &mut self,
        query_string: &str,
        symbol_tag: &str,
        reserved_field: u64,
        granularity: u64,
        activation_weight: u128,
    ) -> u64 {
        let query_hash = QueryHash::compute(query_string, granularity);

        let id = match self.by_hash.get(&query_hash) {
            Some(&existing) => {
                let request = self
                    .requests
                    .get_mut(&existing)
                    .expect("hash index points at a live request");
                request.total_tip = request.total_tip.saturating_add(activation_weight);
                existing
            }
            None => {
                let id = self.next_id;
                self.next_id += 1;
                self.requests.insert(
                    id,
                    DataRequest {
                        id,
                        query_string: query_string.to_string(),
                        symbol_tag: symbol_tag.to_string(),
                        reserved_field,
                        granularity,
                        query_hash,
                        total_tip: activation_weight,
                    },
                );
                self.by_hash.insert(query_hash, id);
                id
            }
        };

        self.difficulty += 1;
        let request = self
            .requests
            .get(&id)
            .expect("request was just inserted or found");
        self.current = Some(CurrentVariables {
            request_id: id,
            difficulty: self.difficulty,
            query_string: request.query_string.clone(),
            granularity: request.granularity,
            total_tip: request.total_tip,
        });
        id
    }

    /// Pure read of a request's variables.
    pub fn get_request_vars(&self, id: u64) -> Result<RequestVars, RegistryError> {
        let request = self
            .requests
            .get(&id)
            .ok_or(RegistryError::UnknownRequestId(id))?;
        Ok(RequestVars {
            symbol_tag: request.symbol_tag.clone(),
            reserved_field: request.reserved_field,
            query_hash: request.query_hash,
            granularity: request.granularity,
            total_tip: request.total_tip,
        })
    }

    /// Reverse lookup: id for a query hash, or `0` if absent.
    pub fn request_id_by_query_hash(&self, hash: &QueryHash) -> u64 {
        self.by_hash.get(hash).copied().unwrap_or(0)
    }

    /// The most recently activated request, if any query was ever submitted.
    pub fn current_variables(&self) -> Option<&CurrentVariables> {
        self.current.as_ref()
    }

    /// Iterate over all registered requests.
    pub fn requests(&self) -> impl Iterator<Item = &DataRequest> {
        self.requests.values()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn difficulty(&self) -> u64 {
        self.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const API: &str = "json(https://api.example.com/products/BTC-USD/ticker).price";
    const API2: &str = "json(https://api.example.com/products/ETH-USD/ticker).price";

    #[test]
    fn first_submission_gets_id_one() {
        let mut registry = RequestRegistry::new();
        let id = registry.submit_query(API, "BTC/USD", 0, 1000, 0);
        assert_eq!(id, 1);
    }

    #[test]
    fn duplicate_submission_reuses_the_id() {
        let mut registry = RequestRegistry::new();
        let first = registry.submit_query(API, "BTC/USD", 0, 1000, 20);
        let second = registry.submit_query(API, "BTC/USD", 0, 1000, 20);
        assert_eq!(first, second);
        assert_eq!(registry.next_id(), 2);

        let vars = registry.get_request_vars(first).unwrap();
        assert_eq!(vars.total_tip, 40);
    }

    #[test]
    fn different_granularity_is_a_different_request() {
        let mut registry = RequestRegistry::new();
        let a = registry.submit_query(API, "BTC/USD", 0, 1000, 0);
        let b = registry.submit_query(API, "BTC/USD", 0, 100, 0);
        assert_ne!(a, b);
        assert_eq!(b, 2);
    }

    #[test]
    fn reverse_lookup_round_trips_through_the_hash() {
        let mut registry = RequestRegistry::new();
        let id = registry.submit_query(API, "BTC/USD", 0, 1000, 20);
        let vars = registry.get_request_vars(id).unwrap();
        assert_eq!(vars.query_hash, QueryHash::compute(API, 1000));
        assert_eq!(registry.request_id_by_query_hash(&vars.query_hash), id);
    }

    #[test]
    fn unknown_hash_returns_zero_sentinel() {
        let registry = RequestRegistry::new();
        let absent = QueryHash::compute(API2, 1000);
        assert_eq!(registry.request_id_by_query_hash(&absent), 0);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let registry = RequestRegistry::new();
        assert_eq!(
            registry.get_request_vars(1),
            Err(RegistryError::UnknownRequestId(1))
        );
    }

    #[test]
    fn first_activation_sets_current_with_difficulty_one() {
        let mut registry = RequestRegistry::new();
        registry.submit_query(API, "BTC/USD", 0, 1000, 20);

        let current = registry.current_variables().unwrap();
        assert_eq!(current.request_id, 1);
        assert_eq!(current.difficulty, 1);
        assert_eq!(current.query_string, API);
        assert_eq!(current.granularity, 1000);
    }

    #[test]
    fn most_recent_submission_becomes_current() {
        let mut registry = RequestRegistry::new();
        registry.submit_query(API, "BTC/USD", 0, 1000, 0);
        registry.submit_query(API2, "ETH/USD", 0, 1000, 5);

        let current = registry.current_variables().unwrap();
        assert_eq!(current.request_id, 2);
        assert_eq!(current.difficulty, 2);
        assert_eq!(current.query_string, API2);

        // A dedup hit re-activates the old request.
        registry.submit_query(API, "BTC/USD", 0, 1000, 1);
        let current = registry.current_variables().unwrap();
        assert_eq!(current.request_id, 1);
        assert_eq!(current.difficulty, 3);
    }

    #[test]
    fn from_parts_restores_the_reverse_index() {
        let mut registry = RequestRegistry::new();
        registry.submit_query(API, "BTC/USD", 7, 1000, 20);
        registry.submit_query(API2, "ETH/USD", 0, 1000, 0);

        let restored = RequestRegistry::from_parts(
            registry.requests().cloned().collect(),
            registry.next_id(),
            registry.difficulty(),
            registry.current_variables().cloned(),
        );
        assert_eq!(
            restored.request_id_by_query_hash(&QueryHash::compute(API, 1000)),
            1
        );
        assert_eq!(restored.get_request_vars(1), registry.get_request_vars(1));
        assert_eq!(restored.difficulty(), registry.difficulty());
    }
}
