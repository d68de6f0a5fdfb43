//! Cross-check of the hand-written codec against `alloy-sol-types`.
//!
//! The `sol!` declarations below are the Solidity interface the component
//! implements. Every selector, topic and byte layout produced by `sec-proto`
//! must be identical to what the Solidity ABI produces for them.

use alloy_primitives::{Address, Bytes, U256, address};
use alloy_sol_types::{SolCall, SolEvent, sol};
use proptest::prelude::*;
use sec_proto::{Call, IERC7970_ID, InterfaceId, MESSAGE_SENT_TOPIC};

sol! {
    event MessageSent(address indexed from, address indexed to, uint256 indexed messageType, bytes data);

    function name() external view returns (string memory);
    function sendMessage(address to, uint256 messageType, bytes data) external;
    function supportsInterface(bytes4 interfaceId) external view returns (bool);
    function getInterfaceId() external pure returns (bytes4);
    function isIERC7970() external pure returns (bool);
}

#[test]
fn selectors_match_solidity() {
    assert_eq!(Call::Name.selector(), nameCall::SELECTOR);
    assert_eq!(Call::GetInterfaceId.selector(), getInterfaceIdCall::SELECTOR);
    assert_eq!(Call::IsIerc7970.selector(), isIERC7970Call::SELECTOR);
    assert_eq!(
        Call::SupportsInterface(InterfaceId::ZERO).selector(),
        supportsInterfaceCall::SELECTOR
    );
}

#[test]
fn interface_id_matches_solidity_convention() {
    let expected = u32::from_be_bytes(nameCall::SELECTOR) ^ u32::from_be_bytes(sendMessageCall::SELECTOR);
    assert_eq!(*IERC7970_ID, InterfaceId::from(expected));
}

#[test]
fn event_topic_matches_solidity() {
    assert_eq!(*MESSAGE_SENT_TOPIC, <MessageSent as SolEvent>::SIGNATURE_HASH);
}

#[test]
fn handshake_request_log_matches_solidity() {
    let from = address!("1111111111111111111111111111111111111111");
    let to = address!("2222222222222222222222222222222222222222");

    let ours = sec_proto::MessageSent { from, to, message_type: U256::ZERO, data: Bytes::new() };
    let theirs = MessageSent { from, to, messageType: U256::ZERO, data: Bytes::new() };

    let log = ours.encode_log(Address::ZERO);
    let reference = theirs.encode_log_data();
    assert_eq!(log.data.topics(), reference.topics());
    assert_eq!(log.data.data, reference.data);
}

proptest! {
    #[test]
    fn send_message_calldata_matches_solidity(
        to in any::<[u8; 20]>(),
        message_type in any::<[u8; 32]>(),
        data in prop::collection::vec(any::<u8>(), 0..200),
    ) {
        let to = Address::from(to);
        let message_type = U256::from_be_bytes(message_type);
        let data = Bytes::from(data);

        let ours = Call::SendMessage { to, message_type, data: data.clone() }.encode();
        let theirs = sendMessageCall { to, messageType: message_type, data }.abi_encode();

        prop_assert_eq!(ours.to_vec(), theirs);
    }

    #[test]
    fn event_data_matches_solidity(
        from in any::<[u8; 20]>(),
        data in prop::collection::vec(any::<u8>(), 0..200),
    ) {
        let from = Address::from(from);
        let data = Bytes::from(data);
        let ours = sec_proto::MessageSent {
            from,
            to: Address::ZERO,
            message_type: U256::from(7),
            data: data.clone(),
        };
        let theirs = MessageSent { from, to: Address::ZERO, messageType: U256::from(7), data };

        let reference = theirs.encode_log_data();
        prop_assert_eq!(&ours.topics()[..], reference.topics());
        prop_assert_eq!(ours.encode_data(), reference.data);
    }
}
