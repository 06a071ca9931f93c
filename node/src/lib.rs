//! The oracle core boundary.
//!
//! Composes the ledger, stake manager and request registry into one
//! single-writer state machine behind [`Oracle::apply`], and provides the
//! ambient pieces the core engines deliberately leave out: event fan-out,
//! state snapshots, TOML configuration and logging setup.

pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod oracle;
pub mod snapshot;

pub use config::OracleConfig;
pub use error::OracleError;
pub use event::{EventBus, OracleEvent};
pub use logging::{init_logging, LogFormat};
pub use oracle::{OpOutput, Operation, Oracle};
pub use snapshot::{AccountEntry, AllowanceEntry, StateSnapshot};
