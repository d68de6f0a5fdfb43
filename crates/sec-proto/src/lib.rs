//! Wire contract for the stateless encrypted communication (SEC) interface.
//!
//! Everything an on-chain component and an off-chain observer have to agree on
//! lives here:
//!
//! - Capability identifiers: 4-byte selectors derived from Keccak-256 of the
//!   canonical function signature, and interface identifiers formed by XOR of
//!   an interface's selectors
//! - Calldata: [`Call`] encodes and decodes the five entry points of the
//!   reference component using the standard head/tail ABI layout
//! - Logs: [`MessageSent`] encodes to (and strictly decodes from) a log with
//!   three indexed topics and an ABI-encoded `bytes` payload
//!
//! # Invariants
//!
//! - Determinism: selectors, interface identifiers and encodings are pure
//!   functions of their inputs
//! - Canonical output: every encoder produces exactly the layout the
//!   corresponding decoder accepts in strict mode
//! - No interpretation: message types and payloads are carried verbatim. The
//!   reserved message-type conventions in [`message_type`] are descriptive
//!   only.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod abi;
pub mod call;
pub mod errors;
pub mod event;
pub mod interface_id;
pub mod message_type;

pub use alloy_primitives::{Address, B256, Bytes, Log, LogData, U256, keccak256};
pub use call::{Call, ReturnValue, signatures};
pub use errors::AbiError;
pub use event::{MESSAGE_SENT_SIGNATURE, MESSAGE_SENT_TOPIC, MessageSent};
pub use interface_id::{
    IERC165, IERC165_ID, IERC7970, IERC7970_ID, InterfaceDescriptor, InterfaceId, Selector,
    selector,
};
pub use message_type::{MessageKind, MessageType};
