//! Invocation context supplied by the execution environment.
//!
//! Component logic never learns who called it from its arguments. The host
//! builds a [`CallContext`] for every invocation and hands it in alongside the
//! calldata. This keeps the caller identity unforgeable: there is no code path
//! through which a caller can choose the `from` of a record.
//!
//! # Invariants
//!
//! - Provenance: `caller()` is whatever the host authenticated for this
//!   invocation, and nothing else
//! - Immutability: a context is fixed for the duration of one invocation
//! - Isolation: contexts are never shared across invocations

use sec_proto::Address;

/// Per-invocation facts provided by the host.
///
/// Fields are private. Component code can read them but has no way to build
/// a context with a different caller from inside an invocation, since it
/// only ever receives `&CallContext`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    caller: Address,
    address: Address,
    is_static: bool,
}

impl CallContext {
    /// Context for a state-changing invocation.
    pub const fn new(caller: Address, address: Address) -> Self {
        Self { caller, address, is_static: false }
    }

    /// Context for a read-only invocation. The host rejects any log emitted
    /// under it.
    pub const fn new_static(caller: Address, address: Address) -> Self {
        Self { caller, address, is_static: true }
    }

    /// Identity that invoked the component.
    pub const fn caller(&self) -> Address {
        self.caller
    }

    /// Address the component is deployed at; logs are attributed to it.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// True when the invocation must not emit logs.
    pub const fn is_static(&self) -> bool {
        self.is_static
    }
}
