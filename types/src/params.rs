//! Protocol parameters — governable scalars consumed by the core engines.

use serde::{Deserialize, Serialize};

/// Tunable protocol parameters.
///
/// These are configuration values, not hard-coded logic: the surrounding
/// deployment (genesis file, governance) decides them, the engines only
/// read them. Amounts are opaque raw units; the deployment picks the
/// denomination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolParams {
    /// Fixed token quantity (raw units) an account must lock to become
    /// `Staked`.
    #[serde(default = "default_stake_amount")]
    pub stake_amount: u128,

    /// Seconds that must elapse between a withdrawal request and an
    /// eligible withdrawal. Default: 7 days.
    #[serde(default = "default_withdraw_lock_secs")]
    pub withdraw_lock_secs: u64,
}

fn default_stake_amount() -> u128 {
    1000
}

fn default_withdraw_lock_secs() -> u64 {
    7 * 86_400
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            stake_amount: default_stake_amount(),
            withdraw_lock_secs: default_withdraw_lock_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_protocol_constants() {
        let params = ProtocolParams::default();
        assert_eq!(params.stake_amount, 1000);
        assert_eq!(params.withdraw_lock_secs, 604_800);
    }
}
