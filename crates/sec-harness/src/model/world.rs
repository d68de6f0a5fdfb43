//! Model world: identities plus the global message log.
//!
//! The world is the top-level container that holds the model state and
//! applies operations. It's the oracle against which the real host is
//! verified.

use sec_proto::{Address, InterfaceId, ReturnValue, U256};

use super::operation::{
    ClientId, Operation, OperationError, OperationResult, Query, Recipient,
};

/// Name every conforming reference component reports.
const NAME: &str = "ReferenceSEC";

/// XOR of the `name()` and `sendMessage(address,uint256,bytes)` selectors.
const OWN_ID: InterfaceId = InterfaceId::new([0x99, 0xc1, 0x3b, 0x59]);

/// `supportsInterface(bytes4)` selector.
const ERC165_ID: InterfaceId = InterfaceId::new([0x01, 0xff, 0xc9, 0xa7]);

/// One observed `MessageSent` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMessage {
    /// Position in the global log.
    pub log_index: u64,
    /// Authenticated sender.
    pub from: Address,
    /// Destination as supplied.
    pub to: Address,
    /// Classifier as supplied.
    pub message_type: U256,
    /// Payload as supplied.
    pub data: Vec<u8>,
}

/// Observable state for oracle comparison.
///
/// This is the subset of world state an external observer can reconstruct
/// from the log alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Every message, in log order.
    pub log: Vec<ModelMessage>,
    /// Per-client count of messages addressed to that client.
    pub inbox_sizes: Vec<usize>,
}

/// Model world - the reference implementation.
#[derive(Debug, Clone)]
pub struct ModelWorld {
    /// Client identities (indexed by `ClientId`).
    identities: Vec<Address>,
    /// Global message log.
    log: Vec<ModelMessage>,
}

impl ModelWorld {
    /// Create a model world over the given client identities.
    pub fn new(identities: Vec<Address>) -> Self {
        Self { identities, log: Vec::new() }
    }

    /// Number of clients in the world.
    pub fn num_clients(&self) -> usize {
        self.identities.len()
    }

    /// Identity of a client.
    pub fn identity(&self, id: ClientId) -> Option<Address> {
        self.identities.get(id as usize).copied()
    }

    /// Global message log.
    pub fn log(&self) -> &[ModelMessage] {
        &self.log
    }

    /// Messages addressed to a client, in log order.
    pub fn inbox(&self, id: ClientId) -> Vec<&ModelMessage> {
        self.identity(id)
            .map(|address| self.log.iter().filter(|m| m.to == address).collect())
            .unwrap_or_default()
    }

    /// Apply an operation and return the result.
    ///
    /// This is the main entry point for model-based testing.
    /// The result should match the real implementation's result.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        match op {
            Operation::Send { sender, recipient, message_type, content } => {
                let Some((from, to)) = self.resolve(*sender, *recipient) else {
                    return OperationResult::Error(OperationError::InvalidClient);
                };
                self.log.push(ModelMessage {
                    log_index: self.log.len() as u64,
                    from,
                    to,
                    message_type: U256::from(*message_type),
                    data: content.to_bytes(),
                });
                OperationResult::Ok
            },
            Operation::SendWide { sender, recipient, message } => {
                let Some((from, to)) = self.resolve(*sender, *recipient) else {
                    return OperationResult::Error(OperationError::InvalidClient);
                };
                let (message_type, data) = message.expand();
                self.log.push(ModelMessage {
                    log_index: self.log.len() as u64,
                    from,
                    to,
                    message_type,
                    data: data.to_vec(),
                });
                OperationResult::Ok
            },
            Operation::StaticSend { sender, recipient } => {
                self.fail_for(*sender, Some(*recipient), OperationError::StaticViolation)
            },
            Operation::StarvedSend { sender, recipient, .. } => {
                self.fail_for(*sender, Some(*recipient), OperationError::OutOfGas)
            },
            Operation::Malformed { sender, .. } => {
                self.fail_for(*sender, None, OperationError::Reverted)
            },
            Operation::Query { client_id, query } => {
                if self.identity(*client_id).is_none() {
                    return OperationResult::Error(OperationError::InvalidClient);
                }
                OperationResult::Returned(Self::answer(*query))
            },
        }
    }

    /// Extract observable state for comparison.
    pub fn observable_state(&self) -> ObservableState {
        let inbox_sizes =
            (0..self.identities.len()).map(|i| self.inbox(i as ClientId).len()).collect();
        ObservableState { log: self.log.clone(), inbox_sizes }
    }

    /// Sender and destination addresses, if both clients exist.
    fn resolve(&self, sender: ClientId, recipient: Recipient) -> Option<(Address, Address)> {
        let from = self.identity(sender)?;
        let to = match recipient {
            Recipient::Client(id) => self.identity(id)?,
            Recipient::SelfAddress => from,
            Recipient::Zero => Address::ZERO,
        };
        Some((from, to))
    }

    fn fail_for(
        &self,
        sender: ClientId,
        recipient: Option<Recipient>,
        error: OperationError,
    ) -> OperationResult {
        let known = match recipient {
            Some(recipient) => self.resolve(sender, recipient).is_some(),
            None => self.identity(sender).is_some(),
        };
        if known {
            OperationResult::Error(error)
        } else {
            OperationResult::Error(OperationError::InvalidClient)
        }
    }

    fn answer(query: Query) -> ReturnValue {
        match query {
            Query::Name => ReturnValue::String(NAME.to_owned()),
            Query::InterfaceId => ReturnValue::InterfaceId(OWN_ID),
            Query::IsIerc7970 => ReturnValue::Bool(true),
            Query::Supports(raw) => {
                let id = InterfaceId::from(raw);
                ReturnValue::Bool(id == OWN_ID || id == ERC165_ID)
            },
        }
    }
}
