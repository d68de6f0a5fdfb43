//! Error types for ABI encoding and decoding.

use thiserror::Error;

use crate::interface_id::InterfaceId;

/// Errors raised while decoding calldata, return data or event logs.
///
/// Encoding never fails; every variant here describes input that is not a
/// well-typed ABI value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Input ended before a required word or byte range.
    #[error("input truncated: need {needed} bytes, have {available}")]
    Truncated {
        /// Bytes required to finish decoding.
        needed: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// An offset or length word does not fit in a machine word.
    #[error("offset or length overflows at byte {position}")]
    Overflow {
        /// Byte position of the offending word.
        position: usize,
    },

    /// An `address` word has non-zero high-order bytes.
    #[error("non-canonical address at byte {position}")]
    DirtyAddress {
        /// Byte position of the offending word.
        position: usize,
    },

    /// A `bool` word is neither zero nor one.
    #[error("non-canonical bool at byte {position}")]
    DirtyBool {
        /// Byte position of the offending word.
        position: usize,
    },

    /// A `bytes4` word has non-zero low-order bytes.
    #[error("non-canonical bytes4 at byte {position}")]
    DirtyBytes4 {
        /// Byte position of the offending word.
        position: usize,
    },

    /// Calldata selector does not match any known function.
    #[error("unknown function selector {0}")]
    UnknownSelector(InterfaceId),

    /// Log's first topic is not the `MessageSent` signature hash.
    #[error("log is not a MessageSent event")]
    SignatureMismatch,

    /// Log carries the wrong number of topics.
    #[error("expected {expected} topics, got {actual}")]
    TopicCount {
        /// Topics required by the event signature.
        expected: usize,
        /// Topics present in the log.
        actual: usize,
    },

    /// Input decodes but is not in the canonical layout.
    #[error("non-canonical encoding: {reason}")]
    NonCanonical {
        /// What deviated from the canonical layout.
        reason: &'static str,
    },

    /// A `string` value is not valid UTF-8.
    #[error("string is not valid utf-8")]
    InvalidUtf8,
}
