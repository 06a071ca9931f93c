//! Events emitted after committed state transitions.

use sibyl_types::{AccountId, QueryHash};

/// Core events observers can subscribe to via the [`EventBus`].
///
/// Events are produced deterministically after the corresponding mutation
/// commits; a failed operation emits nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OracleEvent {
    /// An account requested a stake withdrawal (required for interface
    /// compatibility with external monitors).
    WithdrawRequested { requester: AccountId },
    /// A balance moved between two accounts.
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: u128,
    },
    /// A query was submitted (new or deduplicated).
    RequestSubmitted {
        requester: AccountId,
        request_id: u64,
        query_hash: QueryHash,
    },
}

/// Synchronous fan-out event bus.
///
/// Listeners are invoked inline on the emitting thread; keep handlers fast
/// to avoid stalling operation processing.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&OracleEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&OracleEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &OracleEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn emit_reaches_every_listener() {
        let mut bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let count = Arc::clone(&count);
            bus.subscribe(Box::new(move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            }));
        }
        bus.emit(&OracleEvent::WithdrawRequested {
            requester: AccountId::from_index(1),
        });
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn emit_without_listeners_is_fine() {
        let bus = EventBus::new();
        bus.emit(&OracleEvent::Transfer {
            from: AccountId::from_index(1),
            to: AccountId::from_index(2),
            amount: 5,
        });
    }
}
