//! Operations for model-based testing.
//!
//! Operations represent every way an external caller can reach a component.
//! They are generated randomly by proptest and applied to both the model and
//! the real host.

use arbitrary::Arbitrary;
use sec_proto::{Bytes, MessageType, ReturnValue};

use crate::sim_env::SimEnv;

/// Client identifier (0-indexed into the world's identities).
pub type ClientId = u8;

/// Operations that can be applied to the system.
#[derive(Debug, Clone, Arbitrary)]
pub enum Operation {
    /// Client sends a message through a state-changing invocation.
    Send {
        /// Authenticated caller.
        sender: ClientId,
        /// Destination.
        recipient: Recipient,
        /// Classifier (0, 1 and 2 are the conventional ones).
        message_type: u8,
        /// Payload.
        content: SmallMessage,
    },

    /// Client sends a full-range message type with a seeded payload.
    SendWide {
        /// Authenticated caller.
        sender: ClientId,
        /// Destination.
        recipient: Recipient,
        /// Type and payload.
        message: WideMessage,
    },

    /// Client attempts a send through a read-only invocation.
    StaticSend {
        /// Caller.
        sender: ClientId,
        /// Destination.
        recipient: Recipient,
    },

    /// Client sends with just enough gas to start, not enough to emit.
    StarvedSend {
        /// Caller.
        sender: ClientId,
        /// Destination.
        recipient: Recipient,
        /// Payload.
        content: SmallMessage,
    },

    /// Client reads one of the view functions.
    Query {
        /// Caller.
        client_id: ClientId,
        /// What to read.
        query: Query,
    },

    /// Client sends calldata no function accepts.
    Malformed {
        /// Caller.
        sender: ClientId,
        /// How the calldata is broken.
        kind: MalformedKind,
    },
}

/// Destination of a send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum Recipient {
    /// Another (or the same) client.
    Client(ClientId),
    /// The sender itself.
    SelfAddress,
    /// The zero address.
    Zero,
}

/// Read-only functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum Query {
    /// `name()`
    Name,
    /// `getInterfaceId()`
    InterfaceId,
    /// `isIERC7970()`
    IsIerc7970,
    /// `supportsInterface(id)`
    Supports(u32),
}

/// Broken calldata shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum MalformedKind {
    /// Fewer than four bytes (length taken modulo 4).
    Short(u8),
    /// Four bytes matching no declared selector.
    UnknownSelector,
    /// `sendMessage` selector with its arguments cut off.
    TruncatedSend,
}

/// Small message content for testing.
///
/// A compact representation keeps test cases small while still exercising
/// payloads that cross word boundaries. The content is deterministic from
/// the seed.
#[derive(Debug, Clone, Arbitrary)]
pub struct SmallMessage {
    /// Message seed (expanded to content).
    pub seed: u8,
    /// Message length hint (0-3 maps to empty/small/medium/large).
    pub size_class: u8,
}

impl SmallMessage {
    /// Expand to actual message bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let len = match self.size_class % 4 {
            0 => 0,
            1 => 8,
            2 => 33,
            _ => 256,
        };

        (0..len).map(|i: usize| self.seed.wrapping_add(i as u8)).collect()
    }
}

/// Message drawn from the whole `uint256` type range.
///
/// Both the model and the real side expand the seed through [`SimEnv`], so
/// they see identical values.
#[derive(Debug, Clone, Arbitrary)]
pub struct WideMessage {
    /// Seed for the type and payload draws.
    pub seed: u64,
}

impl WideMessage {
    /// Longest payload a wide message expands to.
    pub const MAX_PAYLOAD: usize = 300;

    /// Expand to the message type and payload.
    pub fn expand(&self) -> (MessageType, Bytes) {
        let mut env = SimEnv::with_seed(self.seed);
        let message_type = env.message_type();
        (message_type, env.payload(Self::MAX_PAYLOAD))
    }
}

/// Result of applying an operation.
///
/// Used to compare model and real system behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// State-changing invocation succeeded.
    Ok,

    /// Read-only invocation returned a value.
    Returned(ReturnValue),

    /// Invocation failed with expected error.
    Error(OperationError),
}

/// Expected errors that can occur during operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationError {
    /// Component rejected the calldata.
    Reverted,

    /// Invocation ran out of gas.
    OutOfGas,

    /// Read-only invocation tried to emit.
    StaticViolation,

    /// Client id outside the world.
    InvalidClient,
}

impl OperationResult {
    /// Check if operation succeeded.
    pub fn is_ok(&self) -> bool {
        !self.is_err()
    }

    /// Check if operation failed.
    pub fn is_err(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_message_sizes() {
        let sizes: Vec<usize> = (0..4)
            .map(|size_class| SmallMessage { seed: 7, size_class }.to_bytes().len())
            .collect();
        assert_eq!(sizes, vec![0, 8, 33, 256]);
    }

    #[test]
    fn wide_message_is_deterministic() {
        let message = WideMessage { seed: 99 };
        let (first_type, first_data) = message.expand();
        let (second_type, second_data) = message.expand();
        assert_eq!(first_type, second_type);
        assert_eq!(first_data, second_data);
        assert!(first_data.len() <= WideMessage::MAX_PAYLOAD);
    }

    #[test]
    fn small_message_wraps_seed() {
        let bytes = SmallMessage { seed: 0xff, size_class: 1 }.to_bytes();
        assert_eq!(&bytes[..3], &[0xff, 0x00, 0x01]);
    }
}
