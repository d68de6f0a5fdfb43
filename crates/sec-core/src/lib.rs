//! Stateless encrypted communication: interface and reference component.
//!
//! # Architecture
//!
//! The component is Sans-IO. The host (see `sec-host`) owns the event log and
//! the invocation lifecycle; this crate only turns calldata plus a
//! [`CallContext`] into an [`Execution`] (return data and logs).
//!
//! ```text
//! host ──CallContext + calldata──▶ Contract::execute ──▶ Execution { return_data, logs }
//!                                        │
//!                                        ▼
//!                             Call::decode → ReferenceSec
//! ```
//!
//! # Components
//!
//! - [`Erc7970`]: the interface (`name`, `send_message`, inherited
//!   introspection)
//! - [`introspection`]: the shared capability query, composed rather than
//!   inherited
//! - [`ReferenceSec`]: the reference implementation
//! - [`Contract`]: what the host calls

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod contract;
pub mod env;
pub mod interface;
pub mod introspection;
pub mod reference;

pub use contract::{Contract, Execution, Revert};
pub use env::CallContext;
pub use interface::Erc7970;
pub use introspection::Introspection;
pub use reference::{REFERENCE_NAME, ReferenceSec};
