//! Host configuration.
//!
//! Defines the resource limits of the execution environment. Limits are the
//! only reason an otherwise well-typed invocation can fail.

/// Gas charged per operation.
///
/// Defaults follow the costs of the platform the interface targets, so a
/// send that fits here fits there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasSchedule {
    /// Flat cost of any state-changing invocation.
    pub intrinsic: u64,
    /// Per zero byte of calldata.
    pub calldata_zero_byte: u64,
    /// Per non-zero byte of calldata.
    pub calldata_nonzero_byte: u64,
    /// Flat cost of one log.
    pub log_base: u64,
    /// Per topic of a log.
    pub log_topic: u64,
    /// Per byte of log data.
    pub log_data_byte: u64,
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self {
            intrinsic: 21_000,
            calldata_zero_byte: 4,
            calldata_nonzero_byte: 16,
            log_base: 375,
            log_topic: 375,
            log_data_byte: 8,
        }
    }
}

/// Execution environment configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Upper bound on any single invocation's gas limit.
    pub block_gas_limit: u64,
    /// Per-operation costs.
    pub gas_schedule: GasSchedule,
    /// Mixed into deployment addresses so separate hosts do not collide.
    pub chain_label: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            block_gas_limit: 30_000_000,
            gas_schedule: GasSchedule::default(),
            chain_label: "sec-local".to_string(),
        }
    }
}
