//! Host-facing entry point for deployed components.

use sec_proto::{AbiError, Bytes, Log};
use thiserror::Error;

use crate::env::CallContext;

/// Result of one successful invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Execution {
    /// ABI-encoded return tuple.
    pub return_data: Bytes,
    /// Logs in emission order. The host appends them only if the whole
    /// invocation succeeds.
    pub logs: Vec<Log>,
}

/// Platform-level rejection of an invocation.
///
/// Components reject nothing on domain grounds. These variants cover input
/// that is not a well-typed call at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Revert {
    /// Calldata too short to carry a selector. The component has no
    /// fallback.
    #[error("no function selector in {len} bytes of calldata")]
    MissingSelector {
        /// Calldata length.
        len: usize,
    },

    /// Calldata did not decode to a known call.
    #[error("malformed calldata: {0}")]
    Abi(#[from] AbiError),
}

/// A component the host can deploy and invoke.
pub trait Contract: Send + Sync {
    /// Run one invocation.
    fn execute(&self, ctx: &CallContext, calldata: &[u8]) -> Result<Execution, Revert>;
}
