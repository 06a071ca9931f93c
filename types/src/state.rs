//! Staking status of an account.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an account stands in the stake lifecycle.
///
/// Transitions are driven by the stake manager:
/// `Unstaked → Staked → PendingWithdraw → Unstaked`.
/// There is no direct `PendingWithdraw → Staked` edge; a pending account must
/// complete its withdrawal before re-staking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakeStatus {
    /// No tokens locked; the account transacts freely.
    #[default]
    Unstaked,
    /// The fixed stake amount is locked in `staked_balance`.
    Staked,
    /// A withdrawal was requested; the timelock is running.
    PendingWithdraw,
}

impl StakeStatus {
    pub fn is_staked(&self) -> bool {
        matches!(self, StakeStatus::Staked)
    }
}

impl fmt::Display for StakeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StakeStatus::Unstaked => write!(f, "unstaked"),
            StakeStatus::Staked => write!(f, "staked"),
            StakeStatus::PendingWithdraw => write!(f, "pending-withdraw"),
        }
    }
}
