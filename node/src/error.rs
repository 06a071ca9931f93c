use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("ledger error: {0}")]
    Ledger(#[from] sibyl_ledger::LedgerError),

    #[error("staking error: {0}")]
    Stake(#[from] sibyl_staking::StakeError),

    #[error("registry error: {0}")]
    Registry(#[from] sibyl_registry::RegistryError),

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}
