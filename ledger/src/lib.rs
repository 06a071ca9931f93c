//! Fungible balance and allowance bookkeeping.
//!
//! The ledger is the leaf component of the core: a process-wide store of
//! accounts (balance + staked balance + stake status), an allowance table,
//! and the total supply. Supply is minted once at genesis and conserved
//! thereafter — every operation moves value, never creates or destroys it.

pub mod account;
pub mod error;
pub mod genesis;
pub mod ledger;

pub use account::Account;
pub use error::LedgerError;
pub use genesis::{GenesisAllocation, GenesisConfig};
pub use ledger::Ledger;
