//! Registry-specific errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown request id {0}")]
    UnknownRequestId(u64),
}
