//! State snapshots — capture and deterministically restore the full store.
//!
//! A snapshot carries the account map, the allowance map, the total supply
//! and the request registry. There is no hidden derived state: the registry's
//! reverse hash index is rebuilt from the request table on restore. The
//! integrity hash is computed over canonically sorted entries so an external
//! collaborator can verify a snapshot before loading it.

use serde::{Deserialize, Serialize};

use sibyl_ledger::{Account, Ledger};
use sibyl_registry::{CurrentVariables, DataRequest, RequestRegistry};
use sibyl_types::{AccountId, ProtocolParams, StakeStatus, Timestamp};

use crate::error::OracleError;
use crate::oracle::Oracle;

pub const CURRENT_SNAPSHOT_VERSION: u32 = 1;

/// The state of a single account captured in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEntry {
    pub account: AccountId,
    pub balance: u128,
    pub staked_balance: u128,
    pub stake_status: StakeStatus,
    pub withdraw_request_time: Option<Timestamp>,
}

/// One allowance table entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceEntry {
    pub owner: AccountId,
    pub spender: AccountId,
    pub amount: u128,
}

/// A full capture of the oracle store at a point in logical time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Blake2b-256 of the canonical entry encoding.
    pub hash: [u8; 32],
    /// Logical time at which the snapshot was taken.
    pub created_at: Timestamp,
    /// Snapshot version for compatibility.
    pub version: u32,
    pub total_supply: u128,
    /// Account entries, sorted by account id.
    pub accounts: Vec<AccountEntry>,
    /// Allowance entries, sorted by (owner, spender).
    pub allowances: Vec<AllowanceEntry>,
    /// Registered requests, sorted by id.
    pub requests: Vec<DataRequest>,
    pub next_request_id: u64,
    pub difficulty: u64,
    pub current: Option<CurrentVariables>,
}

impl StateSnapshot {
    /// Capture the oracle's full state.
    pub fn capture(oracle: &Oracle, now: Timestamp) -> Self {
        let ledger = oracle.ledger();

        let mut accounts: Vec<AccountEntry> = ledger
            .accounts()
            .map(|(id, account)| AccountEntry {
                account: *id,
                balance: account.balance,
                staked_balance: account.staked_balance,
                stake_status: account.stake_status,
                withdraw_request_time: account.withdraw_request_time,
            })
            .collect();
        accounts.sort_by_key(|e| e.account);

        let mut allowances: Vec<AllowanceEntry> = ledger
            .allowances()
            .map(|((owner, spender), amount)| AllowanceEntry {
                owner: *owner,
                spender: *spender,
                amount: *amount,
            })
            .collect();
        allowances.sort_by_key(|e| (e.owner, e.spender));

        let registry = oracle.registry();
        let mut requests: Vec<DataRequest> = registry.requests().cloned().collect();
        requests.sort_by_key(|r| r.id);

        let mut snapshot = Self {
            hash: [0u8; 32],
            created_at: now,
            version: CURRENT_SNAPSHOT_VERSION,
            total_supply: ledger.total_supply(),
            accounts,
            allowances,
            requests,
            next_request_id: registry.next_id(),
            difficulty: registry.difficulty(),
            current: registry.current_variables().cloned(),
        };
        snapshot.hash = snapshot.compute_hash();
        snapshot
    }

    /// Rebuild an oracle from this snapshot. Fails if the integrity hash
    /// does not match the entries.
    pub fn restore(&self, params: ProtocolParams) -> Result<Oracle, OracleError> {
        if !self.verify() {
            return Err(OracleError::Snapshot(
                "integrity hash does not match snapshot contents".into(),
            ));
        }
        if self.version != CURRENT_SNAPSHOT_VERSION {
            return Err(OracleError::Snapshot(format!(
                "unsupported snapshot version {}",
                self.version
            )));
        }

        let accounts = self
            .accounts
            .iter()
            .map(|e| {
                (
                    e.account,
                    Account {
                        balance: e.balance,
                        staked_balance: e.staked_balance,
                        stake_status: e.stake_status,
                        withdraw_request_time: e.withdraw_request_time,
                    },
                )
            })
            .collect();
        let allowances = self
            .allowances
            .iter()
            .map(|e| ((e.owner, e.spender), e.amount))
            .collect();
        let ledger = Ledger::from_parts(accounts, allowances, self.total_supply);

        let registry = RequestRegistry::from_parts(
            self.requests.clone(),
            self.next_request_id,
            self.difficulty,
            self.current.clone(),
        );

        Ok(Oracle::from_parts(params, ledger, registry))
    }

    /// Compute the Blake2b-256 hash of this snapshot deterministically.
    fn compute_hash(&self) -> [u8; 32] {
        use blake2::digest::consts::U32;
        use blake2::{Blake2b, Digest};

        let mut hasher = Blake2b::<U32>::new();
        hasher.update(self.version.to_le_bytes());
        hasher.update(self.total_supply.to_le_bytes());
        for entry in &self.accounts {
            hasher.update(entry.account.as_bytes());
            hasher.update(entry.balance.to_le_bytes());
            hasher.update(entry.staked_balance.to_le_bytes());
            hasher.update([stake_status_byte(entry.stake_status)]);
            // Tag byte keeps `None` distinct from any concrete timestamp.
            hasher.update([entry.withdraw_request_time.is_some() as u8]);
            hasher.update(
                entry
                    .withdraw_request_time
                    .map_or(0, |t| t.as_secs())
                    .to_le_bytes(),
            );
        }
        for entry in &self.allowances {
            hasher.update(entry.owner.as_bytes());
            hasher.update(entry.spender.as_bytes());
            hasher.update(entry.amount.to_le_bytes());
        }
        for request in &self.requests {
            hasher.update(request.id.to_le_bytes());
            hasher.update(request.query_string.as_bytes());
            hasher.update(request.symbol_tag.as_bytes());
            hasher.update(request.reserved_field.to_le_bytes());
            hasher.update(request.granularity.to_le_bytes());
            hasher.update(request.query_hash.as_bytes());
            hasher.update(request.total_tip.to_le_bytes());
        }
        hasher.update(self.next_request_id.to_le_bytes());
        hasher.update(self.difficulty.to_le_bytes());
        if let Some(current) = &self.current {
            hasher.update(current.request_id.to_le_bytes());
            hasher.update(current.difficulty.to_le_bytes());
            hasher.update(current.query_string.as_bytes());
            hasher.update(current.granularity.to_le_bytes());
            hasher.update(current.total_tip.to_le_bytes());
        }

        let result = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        out
    }

    /// Verify the integrity hash matches the entry data.
    pub fn verify(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Vec<u8> {
        bincode::serialize(self).expect("snapshot serialization should not fail")
    }

    /// Deserialize a snapshot from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, OracleError> {
        bincode::deserialize(bytes).map_err(|e| OracleError::Snapshot(e.to_string()))
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}

fn stake_status_byte(status: StakeStatus) -> u8 {
    match status {
        StakeStatus::Unstaked => 0,
        StakeStatus::Staked => 1,
        StakeStatus::PendingWithdraw => 2,
    }
}

impl Oracle {
    /// Capture a snapshot of the full store at logical time `now`.
    pub fn snapshot(&self, now: Timestamp) -> StateSnapshot {
        StateSnapshot::capture(self, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::Operation;
    use sibyl_ledger::GenesisConfig;

    fn populated_oracle() -> Oracle {
        let accounts: Vec<AccountId> = (1..=3).map(AccountId::from_index).collect();
        let params = ProtocolParams {
            stake_amount: 1000,
            withdraw_lock_secs: 7 * 86_400,
        };
        let genesis = GenesisConfig::equal_allocations(&accounts, 2000);
        let mut oracle = Oracle::new(params, &genesis).unwrap();

        let now = Timestamp::new(1000);
        oracle
            .apply(accounts[0], now, Operation::Transfer { to: accounts[1], amount: 5 })
            .unwrap();
        oracle
            .apply(accounts[0], now, Operation::Approve { spender: accounts[2], amount: 7 })
            .unwrap();
        oracle.apply(accounts[1], now, Operation::DepositStake).unwrap();
        oracle
            .apply(
                accounts[1],
                now,
                Operation::RequestStakingWithdraw,
            )
            .unwrap();
        oracle
            .apply(
                accounts[2],
                now,
                Operation::SubmitQuery {
                    query_string: "json(https://example.com/btc).price".into(),
                    symbol_tag: "BTC/USD".into(),
                    reserved_field: 0,
                    granularity: 1000,
                    activation_weight: 20,
                },
            )
            .unwrap();
        oracle
    }

    #[test]
    fn capture_verify_round_trip() {
        let oracle = populated_oracle();
        let snapshot = oracle.snapshot(Timestamp::new(2000));
        assert!(snapshot.verify());
        assert_eq!(snapshot.account_count(), 3);

        let bytes = snapshot.to_bytes();
        let decoded = StateSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, snapshot);
        assert!(decoded.verify());
    }

    #[test]
    fn restore_reconstructs_identical_observable_state() {
        let oracle = populated_oracle();
        let snapshot = oracle.snapshot(Timestamp::new(2000));
        let restored = snapshot.restore(oracle.params().clone()).unwrap();

        let a = AccountId::from_index(1);
        let b = AccountId::from_index(2);
        let c = AccountId::from_index(3);
        assert_eq!(restored.balance_of(&a), oracle.balance_of(&a));
        assert_eq!(restored.balance_of(&b), oracle.balance_of(&b));
        assert_eq!(restored.allowance_of(&a, &c), 7);
        assert_eq!(restored.total_supply(), oracle.total_supply());
        assert_eq!(restored.staker_info(&b), oracle.staker_info(&b));
        assert_eq!(
            restored.current_variables(),
            oracle.current_variables()
        );
        assert_eq!(
            restored.request_vars(1).unwrap(),
            oracle.request_vars(1).unwrap()
        );

        // Restored and original keep producing identical snapshots.
        assert_eq!(
            restored.snapshot(Timestamp::new(3000)).hash,
            oracle.snapshot(Timestamp::new(3000)).hash
        );
    }

    #[test]
    fn tampered_snapshot_fails_verification() {
        let oracle = populated_oracle();
        let mut snapshot = oracle.snapshot(Timestamp::new(2000));
        snapshot.total_supply += 1;
        assert!(!snapshot.verify());
        assert!(snapshot
            .restore(oracle.params().clone())
            .is_err());
    }

    #[test]
    fn snapshot_hash_ignores_capture_time() {
        let oracle = populated_oracle();
        let s1 = oracle.snapshot(Timestamp::new(2000));
        let s2 = oracle.snapshot(Timestamp::new(9000));
        assert_eq!(s1.hash, s2.hash);
    }
}
