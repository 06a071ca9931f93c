//! Stake lifecycle state machine.
//!
//! Each account moves through `Unstaked → Staked → PendingWithdraw → Unstaked`
//! under a fixed stake amount and a withdrawal timelock. The manager operates
//! directly on the shared ledger so a stake move (`balance` ↔ `staked_balance`)
//! is a single mutation of one account record.

pub mod error;
pub mod event;
pub mod manager;

pub use error::StakeError;
pub use event::StakeEvent;
pub use manager::StakeManager;
