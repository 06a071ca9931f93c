//! The oracle state machine — operation dispatch over the composed engines.

use sibyl_ledger::{GenesisConfig, Ledger};
use sibyl_registry::{CurrentVariables, RequestRegistry, RequestVars};
use sibyl_staking::{StakeEvent, StakeManager};
use sibyl_types::{AccountId, ProtocolParams, QueryHash, StakeStatus, Timestamp};
use tracing::debug;

use crate::error::OracleError;
use crate::event::{EventBus, OracleEvent};

/// A mutating operation submitted by a caller.
///
/// The caller identity and the logical time are supplied alongside the
/// operation at [`Oracle::apply`]; the variants carry only the remaining
/// parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Transfer {
        to: AccountId,
        amount: u128,
    },
    Approve {
        spender: AccountId,
        amount: u128,
    },
    TransferFrom {
        owner: AccountId,
        to: AccountId,
        amount: u128,
    },
    DepositStake,
    RequestStakingWithdraw,
    WithdrawStake,
    SubmitQuery {
        query_string: String,
        symbol_tag: String,
        reserved_field: u64,
        granularity: u64,
        activation_weight: u128,
    },
}

/// Success value of [`Oracle::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpOutput {
    Unit,
    /// Id assigned (or reused) by `SubmitQuery`.
    RequestId(u64),
}

/// The composed oracle core.
///
/// `apply` takes `&mut self`, so Rust's aliasing rules give every operation
/// exclusive access to the whole store: operations serialize, and no reader
/// can observe partial effects. Callers that need shared access put the
/// whole `Oracle` behind a single lock.
pub struct Oracle {
    params: ProtocolParams,
    ledger: Ledger,
    staking: StakeManager,
    registry: RequestRegistry,
    events: EventBus,
}

impl Oracle {
    /// Build an oracle from protocol parameters and genesis allocations.
    pub fn new(params: ProtocolParams, genesis: &GenesisConfig) -> Result<Self, OracleError> {
        let ledger = genesis.build()?;
        Ok(Self::from_parts(params, ledger, RequestRegistry::new()))
    }

    /// Build an oracle from a loaded configuration.
    pub fn from_config(config: &crate::config::OracleConfig) -> Result<Self, OracleError> {
        Self::new(config.params.clone(), &config.genesis)
    }

    pub(crate) fn from_parts(
        params: ProtocolParams,
        ledger: Ledger,
        registry: RequestRegistry,
    ) -> Self {
        let staking = StakeManager::new(&params);
        Self {
            params,
            ledger,
            staking,
            registry,
            events: EventBus::new(),
        }
    }

    /// Subscribe to events emitted after committed transitions.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&OracleEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    pub fn params(&self) -> &ProtocolParams {
        &self.params
    }

    pub(crate) fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub(crate) fn registry(&self) -> &RequestRegistry {
        &self.registry
    }

    // ── Dispatch ───────────────────────────────────────────────────────

    /// Process one operation as an indivisible transaction.
    ///
    /// Either the operation's full effect applies and any event is emitted,
    /// or a typed failure is returned and the store is unchanged.
    pub fn apply(
        &mut self,
        caller: AccountId,
        now: Timestamp,
        op: Operation,
    ) -> Result<OpOutput, OracleError> {
        match op {
            Operation::Transfer { to, amount } => {
                self.transfer(caller, to, amount)?;
                Ok(OpOutput::Unit)
            }
            Operation::Approve { spender, amount } => {
                self.approve(caller, spender, amount);
                Ok(OpOutput::Unit)
            }
            Operation::TransferFrom { owner, to, amount } => {
                self.transfer_from(caller, owner, to, amount)?;
                Ok(OpOutput::Unit)
            }
            Operation::DepositStake => {
                self.deposit_stake(caller)?;
                Ok(OpOutput::Unit)
            }
            Operation::RequestStakingWithdraw => {
                self.request_staking_withdraw(caller, now)?;
                Ok(OpOutput::Unit)
            }
            Operation::WithdrawStake => {
                self.withdraw_stake(caller, now)?;
                Ok(OpOutput::Unit)
            }
            Operation::SubmitQuery {
                query_string,
                symbol_tag,
                reserved_field,
                granularity,
                activation_weight,
            } => {
                let id = self.submit_query(
                    caller,
                    &query_string,
                    &symbol_tag,
                    reserved_field,
                    granularity,
                    activation_weight,
                );
                Ok(OpOutput::RequestId(id))
            }
        }
    }

    // ── Ledger operations ──────────────────────────────────────────────

    pub fn transfer(
        &mut self,
        caller: AccountId,
        to: AccountId,
        amount: u128,
    ) -> Result<(), OracleError> {
        self.ledger.transfer(&caller, &to, amount)?;
        debug!(from = %caller, to = %to, amount, "transfer");
        self.events.emit(&OracleEvent::Transfer {
            from: caller,
            to,
            amount,
        });
        Ok(())
    }

    pub fn approve(&mut self, caller: AccountId, spender: AccountId, amount: u128) {
        self.ledger.approve(&caller, &spender, amount);
        debug!(owner = %caller, spender = %spender, amount, "approve");
    }

    pub fn transfer_from(
        &mut self,
        caller: AccountId,
        owner: AccountId,
        to: AccountId,
        amount: u128,
    ) -> Result<(), OracleError> {
        self.ledger.transfer_from(&caller, &owner, &to, amount)?;
        debug!(spender = %caller, owner = %owner, to = %to, amount, "transfer_from");
        self.events.emit(&OracleEvent::Transfer {
            from: owner,
            to,
            amount,
        });
        Ok(())
    }

    // ── Staking operations ─────────────────────────────────────────────

    pub fn deposit_stake(&mut self, caller: AccountId) -> Result<(), OracleError> {
        self.staking.deposit_stake(&mut self.ledger, &caller)?;
        debug!(account = %caller, amount = self.staking.stake_amount(), "stake deposited");
        Ok(())
    }

    pub fn request_staking_withdraw(
        &mut self,
        caller: AccountId,
        now: Timestamp,
    ) -> Result<(), OracleError> {
        let event = self
            .staking
            .request_staking_withdraw(&mut self.ledger, &caller, now)?;
        debug!(account = %caller, at = %now, "staking withdrawal requested");
        let StakeEvent::WithdrawRequested { requester } = event;
        self.events.emit(&OracleEvent::WithdrawRequested { requester });
        Ok(())
    }

    pub fn withdraw_stake(
        &mut self,
        caller: AccountId,
        now: Timestamp,
    ) -> Result<(), OracleError> {
        self.staking.withdraw_stake(&mut self.ledger, &caller, now)?;
        debug!(account = %caller, at = %now, "stake withdrawn");
        Ok(())
    }

    // ── Registry operations ────────────────────────────────────────────

    pub fn submit_query(
        &mut self,
        caller: AccountId,
        query_string: &str,
        symbol_tag: &str,
        reserved_field: u64,
        granularity: u64,
        activation_weight: u128,
    ) -> u64 {
        let id = self.registry.submit_query(
            query_string,
            symbol_tag,
            reserved_field,
            granularity,
            activation_weight,
        );
        debug!(requester = %caller, request_id = id, granularity, "query submitted");
        self.events.emit(&OracleEvent::RequestSubmitted {
            requester: caller,
            request_id: id,
            query_hash: QueryHash::compute(query_string, granularity),
        });
        id
    }

    // ── Pure reads ─────────────────────────────────────────────────────

    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.ledger.balance_of(account)
    }

    pub fn allowance_of(&self, owner: &AccountId, spender: &AccountId) -> u128 {
        self.ledger.allowance_of(owner, spender)
    }

    pub fn total_supply(&self) -> u128 {
        self.ledger.total_supply()
    }

    pub fn staker_info(&self, account: &AccountId) -> (StakeStatus, Option<Timestamp>) {
        self.staking.staker_info(&self.ledger, account)
    }

    pub fn request_vars(&self, id: u64) -> Result<RequestVars, OracleError> {
        Ok(self.registry.get_request_vars(id)?)
    }

    pub fn request_id_by_query_hash(&self, hash: &QueryHash) -> u64 {
        self.registry.request_id_by_query_hash(hash)
    }

    pub fn current_variables(&self) -> Option<&CurrentVariables> {
        self.registry.current_variables()
    }
}
