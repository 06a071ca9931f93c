//! The ledger store — accounts, allowances, total supply.

use std::collections::HashMap;

use sibyl_types::AccountId;

use crate::account::Account;
use crate::error::LedgerError;

/// Process-wide balance and allowance store.
///
/// Every mutating operation validates all preconditions before the first
/// write, so a failure leaves the store byte-for-byte unchanged. Reads of
/// never-seen accounts behave as zero-valued accounts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    accounts: HashMap<AccountId, Account>,
    allowances: HashMap<(AccountId, AccountId), u128>,
    total_supply: u128,
}

impl Ledger {
    /// An empty ledger with zero supply. Use [`GenesisConfig`](crate::GenesisConfig)
    /// to mint initial allocations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from previously captured state (snapshot restore).
    pub fn from_parts(
        accounts: HashMap<AccountId, Account>,
        allowances: HashMap<(AccountId, AccountId), u128>,
        total_supply: u128,
    ) -> Self {
        Self {
            accounts,
            allowances,
            total_supply,
        }
    }

    // ── Reads ──────────────────────────────────────────────────────────

    /// Free balance of an account. Never fails; unknown accounts read as zero.
    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.accounts.get(account).map_or(0, |a| a.balance)
    }

    /// Remaining allowance `spender` may move out of `owner`'s balance.
    pub fn allowance_of(&self, owner: &AccountId, spender: &AccountId) -> u128 {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    /// Total minted supply. Constant after genesis.
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Full account record (zero-valued default for unknown accounts).
    pub fn account(&self, account: &AccountId) -> Account {
        self.accounts.get(account).copied().unwrap_or_default()
    }

    /// Iterate over all materialised accounts.
    pub fn accounts(&self) -> impl Iterator<Item = (&AccountId, &Account)> {
        self.accounts.iter()
    }

    /// Iterate over all non-forgotten allowance entries.
    pub fn allowances(&self) -> impl Iterator<Item = (&(AccountId, AccountId), &u128)> {
        self.allowances.iter()
    }

    // ── Mutations ──────────────────────────────────────────────────────

    /// Move `amount` from `from`'s balance to `to`'s balance.
    ///
    /// Fails with `InsufficientBalance` if `from` cannot cover the amount;
    /// on failure both balances are unchanged. Self-transfers are allowed
    /// and leave the balance as it was.
    pub fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        if from == to || amount == 0 {
            return Ok(());
        }
        let new_to = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.accounts.entry(*from).or_default().balance = available - amount;
        self.accounts.entry(*to).or_default().balance = new_to;
        Ok(())
    }

    /// Set (overwrite, not add) the allowance of `spender` over `owner`'s
    /// balance. No precondition — approving more than the current balance
    /// is legal, the check happens at spend time.
    pub fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: u128) {
        self.allowances.insert((*owner, *spender), amount);
    }

    /// Move `amount` from `owner` to `to` on behalf of `spender`, consuming
    /// allowance. Fails with `InsufficientAllowance` or `InsufficientBalance`
    /// without touching either the allowance or the balances.
    pub fn transfer_from(
        &mut self,
        spender: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let allowed = self.allowance_of(owner, spender);
        if allowed < amount {
            return Err(LedgerError::InsufficientAllowance {
                needed: amount,
                available: allowed,
            });
        }
        self.transfer(owner, to, amount)?;
        self.allowances.insert((*owner, *spender), allowed - amount);
        Ok(())
    }

    /// Run one atomic update against a single owned account record.
    ///
    /// This is the only mutation path the stake manager uses: the closure
    /// sees the whole record (balance and stake fields together), so a
    /// stake move can never be observed half-applied. The closure must
    /// validate before mutating — returning `Err` after a partial write
    /// would break failure atomicity.
    pub fn update_account<T, E>(
        &mut self,
        account: &AccountId,
        update: impl FnOnce(&mut Account) -> Result<T, E>,
    ) -> Result<T, E> {
        update(self.accounts.entry(*account).or_default())
    }

    /// Mint `amount` to `account`, growing total supply. Genesis only —
    /// not reachable from the operation surface.
    pub(crate) fn mint(&mut self, account: &AccountId, amount: u128) -> Result<(), LedgerError> {
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let entry = self.accounts.entry(*account).or_default();
        entry.balance = entry.balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        self.total_supply = new_supply;
        Ok(())
    }
}
