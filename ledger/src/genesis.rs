//! Genesis allocations — the only mint path.
//!
//! The operation surface has no mint or burn, so the total supply is fixed
//! by whatever the deployment allocates here. Building the same config twice
//! yields identical ledgers.

use serde::{Deserialize, Serialize};
use sibyl_types::AccountId;

use crate::error::LedgerError;
use crate::ledger::Ledger;

/// One initial balance grant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAllocation {
    pub account: AccountId,
    /// Initial free balance in raw units.
    pub balance: u128,
}

/// Configuration for the initial ledger state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    #[serde(default)]
    pub allocations: Vec<GenesisAllocation>,
}

impl GenesisConfig {
    /// Grant `balance` to each of the given accounts.
    pub fn equal_allocations(accounts: &[AccountId], balance: u128) -> Self {
        Self {
            allocations: accounts
                .iter()
                .map(|account| GenesisAllocation {
                    account: *account,
                    balance,
                })
                .collect(),
        }
    }

    /// Build the initial ledger. Fails only if the allocations overflow u128.
    pub fn build(&self) -> Result<Ledger, LedgerError> {
        let mut ledger = Ledger::new();
        for allocation in &self.allocations {
            ledger.mint(&allocation.account, allocation.balance)?;
        }
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_mints_the_full_supply() {
        let accounts: Vec<AccountId> = (1..=5).map(AccountId::from_index).collect();
        let config = GenesisConfig::equal_allocations(&accounts, 1000);
        let ledger = config.build().unwrap();

        assert_eq!(ledger.total_supply(), 5000);
        for account in &accounts {
            assert_eq!(ledger.balance_of(account), 1000);
        }
    }

    #[test]
    fn build_is_deterministic() {
        let accounts: Vec<AccountId> = (1..=3).map(AccountId::from_index).collect();
        let config = GenesisConfig::equal_allocations(&accounts, 42);
        assert_eq!(config.build().unwrap(), config.build().unwrap());
    }

    #[test]
    fn repeated_account_accumulates() {
        let a = AccountId::from_index(1);
        let config = GenesisConfig {
            allocations: vec![
                GenesisAllocation { account: a, balance: 10 },
                GenesisAllocation { account: a, balance: 5 },
            ],
        };
        let ledger = config.build().unwrap();
        assert_eq!(ledger.balance_of(&a), 15);
        assert_eq!(ledger.total_supply(), 15);
    }

    #[test]
    fn overflowing_allocation_fails() {
        let config = GenesisConfig {
            allocations: vec![
                GenesisAllocation {
                    account: AccountId::from_index(1),
                    balance: u128::MAX,
                },
                GenesisAllocation {
                    account: AccountId::from_index(2),
                    balance: 1,
                },
            ],
        };
        assert!(config.build().is_err());
    }
}
