//! In-memory execution environment.
//!
//! ## Responsibilities
//!
//! - Deployment: register components at derived addresses
//! - Invocation: build the [`CallContext`] (the only source of caller
//!   identity), meter gas, run the component
//! - Atomicity: append an invocation's logs only if every step succeeded
//! - Queries: read-only calls, log filters, state snapshots
//!
//! ## Design
//!
//! - `&mut self` on every mutating method: invocations are serialised by the
//!   borrow checker, matching the platform's global ordering
//! - Components are `dyn Contract`; the host never knows their semantics

use std::collections::BTreeMap;

use sec_core::{CallContext, Contract};
use sec_proto::{Address, Bytes, Call, IERC165_ID, IERC7970_ID, InterfaceId, keccak256};
use serde::Serialize;

use crate::{
    config::HostConfig,
    error::HostError,
    gas::{self, GasMeter},
    log_store::{EventLog, LogEntry, LogFilter, MessageFilter},
};

/// Outcome of a successful state-changing invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    /// Position of the invocation among all successful ones.
    pub tx_index: u64,
    /// Authenticated caller.
    pub caller: Address,
    /// Component invoked.
    pub to: Address,
    /// Gas spent.
    pub gas_used: u64,
    /// ABI-encoded return tuple.
    pub return_data: Bytes,
    /// Logs appended by this invocation.
    pub logs: Vec<LogEntry>,
}

/// Everything queryable about deployed components, minus the log.
///
/// Two snapshots with equal `views` describe the same state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSnapshot {
    /// Result of each read-only probe, per component.
    pub views: BTreeMap<Address, Vec<(Call, Option<Bytes>)>>,
    /// Log length at the time of the snapshot.
    pub log_len: usize,
}

impl HostSnapshot {
    /// True if component state is identical, ignoring log growth.
    pub fn same_state(&self, other: &Self) -> bool {
        self.views == other.views
    }
}

/// Read-only calls used to snapshot component state.
fn view_probes() -> Vec<Call> {
    vec![
        Call::Name,
        Call::GetInterfaceId,
        Call::IsIerc7970,
        Call::SupportsInterface(IERC165_ID),
        Call::SupportsInterface(*IERC7970_ID),
        Call::SupportsInterface(InterfaceId::INVALID),
    ]
}

/// The execution environment.
pub struct Host {
    config: HostConfig,
    contracts: BTreeMap<Address, Box<dyn Contract>>,
    deploy_nonce: u64,
    log: EventLog,
    tx_count: u64,
}

impl Host {
    /// Host with no components and an empty log.
    pub fn new(config: HostConfig) -> Self {
        Self {
            config,
            contracts: BTreeMap::new(),
            deploy_nonce: 0,
            log: EventLog::new(),
            tx_count: 0,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// The event log.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Number of successful state-changing invocations so far.
    pub fn tx_count(&self) -> u64 {
        self.tx_count
    }

    /// Register `contract`; returns its address.
    ///
    /// Addresses derive from the chain label, the deployer and a host-wide
    /// nonce, so they are deterministic and never reused.
    pub fn deploy(&mut self, deployer: Address, contract: impl Contract + 'static) -> Address {
        let mut preimage = Vec::with_capacity(self.config.chain_label.len() + 28);
        preimage.extend_from_slice(self.config.chain_label.as_bytes());
        preimage.extend_from_slice(deployer.as_slice());
        preimage.extend_from_slice(&self.deploy_nonce.to_be_bytes());
        self.deploy_nonce += 1;

        let address = Address::from_word(keccak256(&preimage));
        self.contracts.insert(address, Box::new(contract));
        tracing::info!(%address, %deployer, "contract deployed");
        address
    }

    /// Whether a component is deployed at `address`.
    pub fn has_contract(&self, address: Address) -> bool {
        self.contracts.contains_key(&address)
    }

    /// Run a state-changing invocation.
    ///
    /// All-or-nothing: on any error the log is untouched and `tx_count` does
    /// not advance.
    pub fn transact(
        &mut self,
        caller: Address,
        to: Address,
        calldata: &[u8],
        gas_limit: u64,
    ) -> Result<Receipt, HostError> {
        if gas_limit > self.config.block_gas_limit {
            return Err(HostError::GasLimitExceedsBlock {
                requested: gas_limit,
                block_limit: self.config.block_gas_limit,
            });
        }

        let schedule = self.config.gas_schedule;
        let mut meter = GasMeter::new(gas_limit);
        meter.charge(gas::intrinsic_cost(&schedule, calldata)).inspect_err(|e| {
            tracing::warn!(%caller, %to, error = %e, "invocation aborted before execution");
        })?;

        let contract = self.contracts.get(&to).ok_or(HostError::NoContract(to))?;
        let ctx = CallContext::new(caller, to);
        let execution = contract.execute(&ctx, calldata).inspect_err(|e| {
            tracing::debug!(%caller, %to, error = %e, "invocation reverted");
        })?;

        for log in &execution.logs {
            meter.charge(gas::log_cost(&schedule, log)).inspect_err(|e| {
                tracing::warn!(%caller, %to, error = %e, "invocation aborted, logs discarded");
            })?;
        }

        let tx_index = self.tx_count;
        self.tx_count += 1;
        let logs = self.log.append(tx_index, execution.logs).to_vec();

        tracing::debug!(tx_index, %caller, %to, gas_used = meter.used(), logs = logs.len(), "invocation applied");

        Ok(Receipt {
            tx_index,
            caller,
            to,
            gas_used: meter.used(),
            return_data: execution.return_data,
            logs,
        })
    }

    /// Encode and run `call` as a state-changing invocation.
    pub fn transact_call(
        &mut self,
        caller: Address,
        to: Address,
        call: &Call,
        gas_limit: u64,
    ) -> Result<Receipt, HostError> {
        self.transact(caller, to, &call.encode(), gas_limit)
    }

    /// Run a read-only invocation; returns the return data.
    pub fn static_call(
        &self,
        caller: Address,
        to: Address,
        calldata: &[u8],
    ) -> Result<Bytes, HostError> {
        let contract = self.contracts.get(&to).ok_or(HostError::NoContract(to))?;
        let ctx = CallContext::new_static(caller, to);
        let execution = contract.execute(&ctx, calldata)?;
        if !execution.logs.is_empty() {
            tracing::debug!(%caller, %to, "static call attempted to emit");
            return Err(HostError::StaticViolation);
        }
        Ok(execution.return_data)
    }

    /// Logs passing `filter`, in emission order.
    pub fn logs<'a>(&'a self, filter: &'a LogFilter) -> impl Iterator<Item = &'a LogEntry> + 'a {
        self.log.query(filter)
    }

    /// Decoded messages passing `filter`, with their log indices.
    pub fn messages(&self, filter: &MessageFilter) -> Vec<(u64, sec_proto::MessageSent)> {
        self.log.messages(filter)
    }

    /// Probe every component through its read-only surface.
    pub fn snapshot(&self) -> HostSnapshot {
        let probes = view_probes();
        let views = self
            .contracts
            .keys()
            .map(|address| {
                let results = probes
                    .iter()
                    .map(|call| {
                        let out = self.static_call(Address::ZERO, *address, &call.encode()).ok();
                        (call.clone(), out)
                    })
                    .collect();
                (*address, results)
            })
            .collect();

        HostSnapshot { views, log_len: self.log.len() }
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new(HostConfig::default())
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("config", &self.config)
            .field("contracts", &self.contracts.keys().collect::<Vec<_>>())
            .field("log_len", &self.log.len())
            .field("tx_count", &self.tx_count)
            .finish()
    }
}
