//! The stake manager — deposits, withdrawal requests, timelocked withdrawals.

use sibyl_ledger::{Account, Ledger};
use sibyl_types::{AccountId, ProtocolParams, StakeStatus, Timestamp};

use crate::error::StakeError;
use crate::event::StakeEvent;

/// Per-account stake state machine over the shared ledger.
///
/// The manager itself is stateless: everything it tracks lives on the
/// account records, so snapshot/restore of the ledger restores staking too.
/// All guards run before the first field write — a failed operation leaves
/// the account record untouched.
#[derive(Clone, Debug)]
pub struct StakeManager {
    stake_amount: u128,
    withdraw_lock_secs: u64,
}

impl StakeManager {
    pub fn new(params: &ProtocolParams) -> Self {
        Self {
            stake_amount: params.stake_amount,
            withdraw_lock_secs: params.withdraw_lock_secs,
        }
    }

    /// The fixed amount an account must lock to become `Staked`.
    pub fn stake_amount(&self) -> u128 {
        self.stake_amount
    }

    /// Seconds between a withdrawal request and an eligible withdrawal.
    pub fn withdraw_lock_secs(&self) -> u64 {
        self.withdraw_lock_secs
    }

    /// `Unstaked → Staked`: lock the stake amount out of the free balance.
    ///
    /// A `PendingWithdraw` account must complete its withdrawal first —
    /// there is no direct re-stake edge.
    pub fn deposit_stake(&self, ledger: &mut Ledger, who: &AccountId) -> Result<(), StakeError> {
        let stake_amount = self.stake_amount;
        ledger.update_account(who, |account: &mut Account| {
            match account.stake_status {
                StakeStatus::Staked => return Err(StakeError::AlreadyStaked),
                StakeStatus::PendingWithdraw => return Err(StakeError::WithdrawPending),
                StakeStatus::Unstaked => {}
            }
            if account.balance < stake_amount {
                return Err(StakeError::InsufficientBalance {
                    needed: stake_amount,
                    available: account.balance,
                });
            }
            let new_staked = account
                .staked_balance
                .checked_add(stake_amount)
                .ok_or(StakeError::Overflow)?;

            account.balance -= stake_amount;
            account.staked_balance = new_staked;
            account.stake_status = StakeStatus::Staked;
            account.withdraw_request_time = None;
            Ok(())
        })
    }

    /// `Staked → PendingWithdraw`: start the timelock.
    ///
    /// Returns the withdrawal-request notification for the caller to deliver.
    pub fn request_staking_withdraw(
        &self,
        ledger: &mut Ledger,
        who: &AccountId,
        now: Timestamp,
    ) -> Result<StakeEvent, StakeError> {
        ledger.update_account(who, |account: &mut Account| {
            if account.stake_status != StakeStatus::Staked {
                return Err(StakeError::NotStaked);
            }
            account.stake_status = StakeStatus::PendingWithdraw;
            account.withdraw_request_time = Some(now);
            Ok(StakeEvent::WithdrawRequested { requester: *who })
        })
    }

    /// `PendingWithdraw → Unstaked`: release the stake after the lock period.
    pub fn withdraw_stake(
        &self,
        ledger: &mut Ledger,
        who: &AccountId,
        now: Timestamp,
    ) -> Result<(), StakeError> {
        let lock_secs = self.withdraw_lock_secs;
        ledger.update_account(who, |account: &mut Account| {
            let requested_at = match (account.stake_status, account.withdraw_request_time) {
                (StakeStatus::PendingWithdraw, Some(t)) => t,
                _ => return Err(StakeError::NotPendingWithdraw),
            };
            if !requested_at.has_expired(lock_secs, now) {
                let remaining =
                    lock_secs.saturating_sub(requested_at.elapsed_since(now));
                return Err(StakeError::WithdrawTooEarly {
                    remaining_secs: remaining,
                });
            }
            let new_balance = account
                .balance
                .checked_add(account.staked_balance)
                .ok_or(StakeError::Overflow)?;

            account.balance = new_balance;
            account.staked_balance = 0;
            account.stake_status = StakeStatus::Unstaked;
            account.withdraw_request_time = None;
            Ok(())
        })
    }

    /// Pure read of `(stake_status, withdraw_request_time)`.
    pub fn staker_info(
        &self,
        ledger: &Ledger,
        who: &AccountId,
    ) -> (StakeStatus, Option<Timestamp>) {
        let account = ledger.account(who);
        (account.stake_status, account.withdraw_request_time)
    }
}
