//! Message-type classifier.
//!
//! `messageType` is an unsigned 256-bit integer. Values 0 and 1 are reserved
//! by convention for connection-request and connection-response handshake
//! signalling, and 2 for encrypted text. Everything else is left to the
//! application.
//!
//! These conventions describe how off-chain observers interpret a message.
//! Neither this crate nor any component built on it rejects or treats
//! specially any value.

use std::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Unsigned classifier carried in the third indexed topic.
pub type MessageType = U256;

/// Reserved: initiator asks the recipient to establish a session.
pub const CONNECTION_REQUEST: MessageType = U256::from_limbs([0, 0, 0, 0]);

/// Reserved: recipient answers a connection request.
pub const CONNECTION_RESPONSE: MessageType = U256::from_limbs([1, 0, 0, 0]);

/// Reserved: payload is ciphertext under an established session.
pub const ENCRYPTED_TEXT: MessageType = U256::from_limbs([2, 0, 0, 0]);

/// Observer-side reading of a [`MessageType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// Type 0.
    ConnectionRequest,
    /// Type 1.
    ConnectionResponse,
    /// Type 2.
    EncryptedText,
    /// Any other value, implementation-defined.
    Other(MessageType),
}

impl From<MessageType> for MessageKind {
    fn from(value: MessageType) -> Self {
        match value {
            v if v == CONNECTION_REQUEST => Self::ConnectionRequest,
            v if v == CONNECTION_RESPONSE => Self::ConnectionResponse,
            v if v == ENCRYPTED_TEXT => Self::EncryptedText,
            v => Self::Other(v),
        }
    }
}

impl From<MessageKind> for MessageType {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::ConnectionRequest => CONNECTION_REQUEST,
            MessageKind::ConnectionResponse => CONNECTION_RESPONSE,
            MessageKind::EncryptedText => ENCRYPTED_TEXT,
            MessageKind::Other(v) => v,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionRequest => f.write_str("connection-request"),
            Self::ConnectionResponse => f.write_str("connection-response"),
            Self::EncryptedText => f.write_str("encrypted-text"),
            Self::Other(v) => write!(f, "other({v})"),
        }
    }
}
