//! Staking-specific errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StakeError {
    #[error("insufficient balance to stake: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("account is already staked")]
    AlreadyStaked,

    #[error("account has a withdrawal pending; complete it before re-staking")]
    WithdrawPending,

    #[error("account is not staked")]
    NotStaked,

    #[error("account has no pending withdrawal")]
    NotPendingWithdraw,

    #[error("withdrawal locked for another {remaining_secs}s")]
    WithdrawTooEarly { remaining_secs: u64 },

    #[error("arithmetic overflow in stake computation")]
    Overflow,
}
