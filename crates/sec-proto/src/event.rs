//! The `MessageSent` log record.
//!
//! # Wire layout
//!
//! ```text
//! topics[0]  keccak256("MessageSent(address,address,uint256,bytes)")
//! topics[1]  from         (address, left-padded)
//! topics[2]  to           (address, left-padded)
//! topics[3]  messageType  (uint256, big-endian)
//! data       0x20 ‖ len ‖ payload ‖ zero padding to 32 bytes
//! ```
//!
//! `from`, `to` and `messageType` are indexed so observers can filter on
//! them. `data` is not.

use std::sync::LazyLock;

use alloy_primitives::{Address, B256, Bytes, Log, keccak256};
use serde::{Deserialize, Serialize};

use crate::{
    abi::{self, Decoder, WORD},
    errors::AbiError,
    message_type::{MessageKind, MessageType},
};

/// Canonical event signature.
pub const MESSAGE_SENT_SIGNATURE: &str = "MessageSent(address,address,uint256,bytes)";

/// First topic of every `MessageSent` log.
pub static MESSAGE_SENT_TOPIC: LazyLock<B256> =
    LazyLock::new(|| keccak256(MESSAGE_SENT_SIGNATURE.as_bytes()));

/// Number of topics a `MessageSent` log carries (signature + 3 indexed).
pub const MESSAGE_SENT_TOPICS: usize = 4;

/// One message record.
///
/// # Security
///
/// - **Debug Redaction**: `data` is usually ciphertext or key material for a
///   handshake. The `Debug` impl prints its length only.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSent {
    /// Invoking identity, supplied by the execution environment.
    pub from: Address,
    /// Destination identity, verbatim from the caller.
    pub to: Address,
    /// Classifier, verbatim from the caller.
    pub message_type: MessageType,
    /// Opaque payload, verbatim from the caller.
    pub data: Bytes,
}

impl std::fmt::Debug for MessageSent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageSent")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("message_type", &self.message_type)
            .field("data", &format_args!("<{} bytes>", self.data.len()))
            .finish()
    }
}

impl MessageSent {
    /// Observer-side interpretation of `message_type`.
    pub fn kind(&self) -> MessageKind {
        MessageKind::from(self.message_type)
    }

    /// Signature topic followed by the three indexed fields.
    pub fn topics(&self) -> [B256; MESSAGE_SENT_TOPICS] {
        [
            *MESSAGE_SENT_TOPIC,
            abi::address_word(self.from),
            abi::address_word(self.to),
            abi::uint_word(self.message_type),
        ]
    }

    /// ABI encoding of the unindexed `data` field.
    pub fn encode_data(&self) -> Bytes {
        Bytes::from(abi::encode_single_dynamic(&self.data).freeze())
    }

    /// Full log as emitted by `emitter`.
    pub fn encode_log(&self, emitter: Address) -> Log {
        Log::new_unchecked(emitter, self.topics().to_vec(), self.encode_data())
    }

    /// Decode a log, requiring the exact canonical layout.
    pub fn decode_log(log: &Log) -> Result<Self, AbiError> {
        Self::decode_parts(log.data.topics(), &log.data.data)
    }

    /// Decode from raw topics and data.
    pub fn decode_parts(topics: &[B256], data: &[u8]) -> Result<Self, AbiError> {
        let [signature, from, to, message_type] = topics else {
            if topics.first() == Some(&*MESSAGE_SENT_TOPIC) || topics.is_empty() {
                return Err(AbiError::TopicCount {
                    expected: MESSAGE_SENT_TOPICS,
                    actual: topics.len(),
                });
            }
            return Err(AbiError::SignatureMismatch);
        };

        if *signature != *MESSAGE_SENT_TOPIC {
            return Err(AbiError::SignatureMismatch);
        }

        let from = abi::word_address(from, 0)?;
        let to = abi::word_address(to, 0)?;
        let message_type = MessageType::from_be_bytes(message_type.0);

        let decoder = Decoder::new(data);
        if decoder.offset(0)? != WORD {
            return Err(AbiError::NonCanonical { reason: "data offset must be 0x20" });
        }
        let payload = decoder.dynamic(0)?;
        if data.len() != 2 * WORD + abi::padded_len(payload.len()) {
            return Err(AbiError::NonCanonical { reason: "data length does not match payload" });
        }
        if data[2 * WORD + payload.len()..].iter().any(|b| *b != 0) {
            return Err(AbiError::NonCanonical { reason: "payload padding must be zero" });
        }

        Ok(Self { from, to, message_type, data: Bytes::copy_from_slice(payload) })
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{U256, address};
    use hex_literal::hex;
    use proptest::prelude::*;

    use super::*;

    fn sample() -> MessageSent {
        MessageSent {
            from: address!("00000000000000000000000000000000000000a1"),
            to: address!("00000000000000000000000000000000000000b2"),
            message_type: U256::from(2),
            data: Bytes::from_static(b"hi"),
        }
    }

    #[test]
    fn signature_topic() {
        assert_eq!(
            MESSAGE_SENT_TOPIC.0,
            hex!("3e2a7ba5f0f3bdd77c811784953aeea522f1ec5a26a6ff85c2fc48ba92056a5b")
        );
    }

    #[test]
    fn canonical_data_snapshot() {
        let data = sample().encode_data();
        insta::assert_snapshot!(
            alloy_primitives::hex::encode(&data),
            @"000000000000000000000000000000000000000000000000000000000000002000000000000000000000000000000000000000000000000000000000000000026869000000000000000000000000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn indexed_topics_layout() {
        let topics = sample().topics();
        assert_eq!(topics[1].0, hex!("00000000000000000000000000000000000000000000000000000000000000a1"));
        assert_eq!(topics[2].0, hex!("00000000000000000000000000000000000000000000000000000000000000b2"));
        assert_eq!(topics[3].0, hex!("0000000000000000000000000000000000000000000000000000000000000002"));
    }

    #[test]
    fn decode_rejects_other_events() {
        let mut log = sample().encode_log(Address::ZERO);
        let mut topics = log.data.topics().to_vec();
        topics[0] = keccak256(b"Transfer(address,address,uint256)");
        log.data = alloy_primitives::LogData::new_unchecked(topics, log.data.data.clone());
        assert_eq!(MessageSent::decode_log(&log), Err(AbiError::SignatureMismatch));
    }

    #[test]
    fn decode_rejects_missing_topics() {
        let message = sample();
        let topics = message.topics();
        let err = MessageSent::decode_parts(&topics[..3], &message.encode_data());
        assert_eq!(err, Err(AbiError::TopicCount { expected: 4, actual: 3 }));
    }

    #[test]
    fn decode_rejects_dirty_padding() {
        let message = sample();
        let mut data = message.encode_data().to_vec();
        let last = data.len() - 1;
        data[last] = 0xff;
        assert!(matches!(
            MessageSent::decode_parts(&message.topics(), &data),
            Err(AbiError::NonCanonical { .. })
        ));
    }

    #[test]
    fn decode_rejects_trailing_bytes() {
        let message = sample();
        let mut data = message.encode_data().to_vec();
        data.extend_from_slice(&[0u8; 32]);
        assert!(matches!(
            MessageSent::decode_parts(&message.topics(), &data),
            Err(AbiError::NonCanonical { .. })
        ));
    }

    #[test]
    fn debug_redacts_payload() {
        let rendered = format!("{:?}", sample());
        assert!(rendered.contains("<2 bytes>"));
        assert!(!rendered.contains("6869"));
    }

    proptest! {
        #[test]
        fn log_preserves_every_field(
            from in any::<[u8; 20]>(),
            to in any::<[u8; 20]>(),
            message_type in any::<[u8; 32]>(),
            data in prop::collection::vec(any::<u8>(), 0..300),
        ) {
            let message = MessageSent {
                from: Address::from(from),
                to: Address::from(to),
                message_type: U256::from_be_bytes(message_type),
                data: Bytes::from(data),
            };
            let log = message.encode_log(Address::ZERO);
            prop_assert_eq!(log.data.data.len() % WORD, 0);
            prop_assert_eq!(MessageSent::decode_log(&log), Ok(message));
        }
    }
}
