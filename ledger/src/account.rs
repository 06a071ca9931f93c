//! Per-account ledger record.

use serde::{Deserialize, Serialize};
use sibyl_types::{StakeStatus, Timestamp};

/// The full state of one account.
///
/// The stake fields live on the same record as the balance so a stake move
/// (`balance` ↔ `staked_balance`) is one mutation of one owned value. A
/// never-seen account is indistinguishable from `Account::default()` — the
/// ledger has no registration step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Freely transferable balance, in raw units.
    pub balance: u128,

    /// Tokens locked by the stake manager, in raw units.
    pub staked_balance: u128,

    /// Where this account stands in the stake lifecycle.
    pub stake_status: StakeStatus,

    /// When the account requested a stake withdrawal.
    /// `Some` exactly while `stake_status` is `PendingWithdraw`.
    pub withdraw_request_time: Option<Timestamp>,
}

impl Account {
    /// Total value attributed to this account (free + staked).
    pub fn total(&self) -> u128 {
        // Conservation keeps the sum within the minted supply, which fits
        // u128 by construction.
        self.balance + self.staked_balance
    }
}
