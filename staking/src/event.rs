//! Notification values produced by stake transitions.

use serde::{Deserialize, Serialize};
use sibyl_types::AccountId;

/// Notification produced by a successful stake transition.
///
/// The manager only produces these values deterministically; delivering them
/// to subscribers is the caller's concern, keeping this crate free of I/O.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakeEvent {
    /// An account entered `PendingWithdraw`.
    WithdrawRequested { requester: AccountId },
}
