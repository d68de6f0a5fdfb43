//! Host error types.

use sec_core::Revert;
use sec_proto::Address;
use thiserror::Error;

/// Why an invocation did not complete.
///
/// Every variant means the invocation had no effect: nothing was appended to
/// the log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Gas ran out before the invocation finished.
    #[error("out of gas: limit {limit}, required {required}")]
    OutOfGas {
        /// Gas made available.
        limit: u64,
        /// Gas the invocation needed up to the point it stopped.
        required: u64,
    },

    /// Requested gas limit is above the block limit.
    #[error("gas limit {requested} exceeds block gas limit {block_limit}")]
    GasLimitExceedsBlock {
        /// Gas limit asked for.
        requested: u64,
        /// Configured block limit.
        block_limit: u64,
    },

    /// The component rejected the calldata.
    #[error("execution reverted: {0}")]
    Reverted(#[from] Revert),

    /// No component is deployed at the target address.
    #[error("no contract at {0}")]
    NoContract(Address),

    /// A read-only invocation tried to emit a log.
    #[error("log emitted during static call")]
    StaticViolation,
}

impl HostError {
    /// True for aborts caused by the environment's resource limits rather
    /// than by the component.
    pub fn is_environment_abort(&self) -> bool {
        match self {
            Self::OutOfGas { .. } | Self::GasLimitExceedsBlock { .. } => true,

            Self::Reverted(_) | Self::NoContract(_) | Self::StaticViolation => false,
        }
    }
}
