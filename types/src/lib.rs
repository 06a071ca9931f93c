//! Fundamental types for the Sibyl oracle core.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: account identities, query hashes, timestamps, protocol
//! parameters, and the staking status enum.

pub mod account;
pub mod hash;
pub mod params;
pub mod state;
pub mod time;

pub use account::AccountId;
pub use hash::QueryHash;
pub use params::ProtocolParams;
pub use state::StakeStatus;
pub use time::Timestamp;
