//! Data-request registry.
//!
//! Accepts query submissions, deduplicates them by content hash, assigns
//! stable 1-based ids, and projects the most recently activated request as
//! the publicly readable "current variables".

pub mod error;
pub mod registry;
pub mod request;

pub use error::RegistryError;
pub use registry::RequestRegistry;
pub use request::{CurrentVariables, DataRequest, RequestVars};
