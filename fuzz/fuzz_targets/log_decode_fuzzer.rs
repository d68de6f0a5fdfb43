//! Fuzz target for [`MessageSent`] log decoding
//!
//! Prevent observers from accepting malformed or ambiguous records
//!
//! # Strategy
//!
//! - Arbitrary topic lists (0-5 topics) with the real signature hash planted
//!   in position 0 half the time
//! - Arbitrary data, sometimes a valid encoding with mutations applied
//!
//! # Invariants
//!
//! - NEVER panic on any input
//! - Anything that decodes re-encodes to exactly the same topics and data
//! - Decoding requires exactly four topics with the event signature first

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sec_proto::{Address, B256, Bytes, MESSAGE_SENT_TOPIC, MessageSent, U256};

#[derive(Debug, Arbitrary)]
enum DataShape {
    Raw(Vec<u8>),
    Mutated { payload: Vec<u8>, flip_at: u16, flip: u8, truncate: u8 },
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    topics: Vec<[u8; 32]>,
    plant_signature: bool,
    data: DataShape,
}

fuzz_target!(|input: FuzzInput| {
    let mut topics: Vec<B256> = input.topics.into_iter().take(5).map(B256::from).collect();
    if input.plant_signature {
        if let Some(first) = topics.first_mut() {
            *first = *MESSAGE_SENT_TOPIC;
        }
    }

    let data = match input.data {
        DataShape::Raw(bytes) => bytes,
        DataShape::Mutated { payload, flip_at, flip, truncate } => {
            let record = MessageSent {
                from: Address::ZERO,
                to: Address::ZERO,
                message_type: U256::ZERO,
                data: Bytes::from(payload),
            };
            let mut bytes = record.encode_data().to_vec();
            if let Some(byte) = bytes.get_mut(usize::from(flip_at)) {
                *byte ^= flip;
            }
            bytes.truncate(bytes.len().saturating_sub(usize::from(truncate)));
            bytes
        },
    };

    if let Ok(record) = MessageSent::decode_parts(&topics, &data) {
        assert_eq!(topics.len(), 4);
        assert_eq!(topics[0], *MESSAGE_SENT_TOPIC);
        assert_eq!(record.topics().as_slice(), topics.as_slice(), "topics not canonical");
        assert_eq!(record.encode_data().as_ref(), data.as_slice(), "data not canonical");
    }
});
