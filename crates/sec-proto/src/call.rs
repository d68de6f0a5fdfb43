//! Calldata for the reference component's entry points.
//!
//! Calldata is a 4-byte selector followed by the ABI-encoded argument tuple.
//! Return data is the ABI-encoded return tuple.

use std::{fmt, sync::LazyLock};

use alloy_primitives::{Address, Bytes};
use bytes::{BufMut, BytesMut};

use crate::{
    abi::{self, Decoder, WORD},
    errors::AbiError,
    interface_id::{InterfaceId, Selector, selector},
    message_type::MessageType,
};

/// Canonical signatures of every callable function.
pub mod signatures {
    /// `name() -> string`
    pub const NAME: &str = "name()";
    /// `sendMessage(address to, uint256 messageType, bytes data)`
    pub const SEND_MESSAGE: &str = "sendMessage(address,uint256,bytes)";
    /// `supportsInterface(bytes4 interfaceId) -> bool`
    pub const SUPPORTS_INTERFACE: &str = "supportsInterface(bytes4)";
    /// `getInterfaceId() -> bytes4`
    pub const GET_INTERFACE_ID: &str = "getInterfaceId()";
    /// `isIERC7970() -> bool`
    pub const IS_IERC7970: &str = "isIERC7970()";
}

struct Selectors {
    name: Selector,
    send_message: Selector,
    supports_interface: Selector,
    get_interface_id: Selector,
    is_ierc7970: Selector,
}

static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| Selectors {
    name: selector(signatures::NAME),
    send_message: selector(signatures::SEND_MESSAGE),
    supports_interface: selector(signatures::SUPPORTS_INTERFACE),
    get_interface_id: selector(signatures::GET_INTERFACE_ID),
    is_ierc7970: selector(signatures::IS_IERC7970),
});

/// A decoded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `name()`
    Name,
    /// `sendMessage(to, messageType, data)`
    SendMessage {
        /// Destination identity.
        to: Address,
        /// Classifier.
        message_type: MessageType,
        /// Opaque payload.
        data: Bytes,
    },
    /// `supportsInterface(id)`
    SupportsInterface(InterfaceId),
    /// `getInterfaceId()`
    GetInterfaceId,
    /// `isIERC7970()`
    IsIerc7970,
}

/// Decoded return value of a [`Call`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnValue {
    /// `sendMessage` returns nothing.
    Empty,
    /// `name()`
    String(String),
    /// `supportsInterface`, `isIERC7970`
    Bool(bool),
    /// `getInterfaceId`
    InterfaceId(InterfaceId),
}

impl fmt::Display for ReturnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("()"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::InterfaceId(id) => write!(f, "{id}"),
        }
    }
}

impl Call {
    /// Selector this call dispatches on.
    pub fn selector(&self) -> Selector {
        let s = &*SELECTORS;
        match self {
            Self::Name => s.name,
            Self::SendMessage { .. } => s.send_message,
            Self::SupportsInterface(_) => s.supports_interface,
            Self::GetInterfaceId => s.get_interface_id,
            Self::IsIerc7970 => s.is_ierc7970,
        }
    }

    /// Whether the call can modify anything observable (emit a log).
    pub const fn is_view(&self) -> bool {
        !matches!(self, Self::SendMessage { .. })
    }

    /// Encode as calldata.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(4 + 4 * WORD);
        buf.put_slice(&self.selector());

        match self {
            Self::Name | Self::GetInterfaceId | Self::IsIerc7970 => {},
            Self::SendMessage { to, message_type, data } => {
                buf.put_slice(abi::address_word(*to).as_slice());
                buf.put_slice(abi::uint_word(*message_type).as_slice());
                buf.put_slice(abi::uint_word(MessageType::from(3 * WORD)).as_slice());
                abi::put_dynamic(&mut buf, data);
            },
            Self::SupportsInterface(id) => buf.put_slice(&abi::encode_bytes4(*id)),
        }

        Bytes::from(buf.freeze())
    }

    /// Decode calldata.
    ///
    /// Bytes beyond the last argument are ignored, as the platform does.
    pub fn decode(calldata: &[u8]) -> Result<Self, AbiError> {
        let Some((head, args)) = calldata.split_first_chunk::<4>() else {
            return Err(AbiError::Truncated { needed: 4, available: calldata.len() });
        };
        let args = Decoder::new(args);
        let s = &*SELECTORS;

        match *head {
            sel if sel == s.name => Ok(Self::Name),
            sel if sel == s.get_interface_id => Ok(Self::GetInterfaceId),
            sel if sel == s.is_ierc7970 => Ok(Self::IsIerc7970),
            sel if sel == s.supports_interface => Ok(Self::SupportsInterface(args.bytes4(0)?)),
            sel if sel == s.send_message => Ok(Self::SendMessage {
                to: args.address(0)?,
                message_type: args.uint(1)?,
                data: Bytes::copy_from_slice(args.dynamic(2)?),
            }),
            sel => Err(AbiError::UnknownSelector(InterfaceId::new(sel))),
        }
    }

    /// Decode the return data this call produces.
    pub fn decode_return(&self, data: &[u8]) -> Result<ReturnValue, AbiError> {
        let decoder = Decoder::new(data);
        match self {
            Self::SendMessage { .. } => Ok(ReturnValue::Empty),
            Self::Name => decoder.string(0).map(|s| ReturnValue::String(s.to_owned())),
            Self::SupportsInterface(_) | Self::IsIerc7970 => decoder.bool(0).map(ReturnValue::Bool),
            Self::GetInterfaceId => decoder.bytes4(0).map(ReturnValue::InterfaceId),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{U256, address};
    use hex_literal::hex;

    use super::*;

    #[test]
    fn send_message_layout() {
        let call = Call::SendMessage {
            to: address!("00000000000000000000000000000000000000b2"),
            message_type: U256::from(1),
            data: Bytes::from_static(&[0xaa; 33]),
        };
        let encoded = call.encode();

        assert_eq!(&encoded[..4], &hex!("9f3ce55a"));
        // 4 selector + 3 head words + length word + 2 padded data words
        assert_eq!(encoded.len(), 4 + 3 * 32 + 32 + 64);
        assert_eq!(encoded[4 + 2 * 32 + 31], 0x60);
        assert_eq!(encoded[4 + 3 * 32 + 31], 33);
        assert_eq!(Call::decode(&encoded), Ok(call));
    }

    #[test]
    fn view_calls_have_no_arguments() {
        for call in [Call::Name, Call::GetInterfaceId, Call::IsIerc7970] {
            assert_eq!(call.encode().len(), 4);
            assert!(call.is_view());
            assert_eq!(Call::decode(&call.encode()), Ok(call));
        }
    }

    #[test]
    fn trailing_calldata_is_ignored() {
        let mut calldata = Call::Name.encode().to_vec();
        calldata.extend_from_slice(&[1, 2, 3]);
        assert_eq!(Call::decode(&calldata), Ok(Call::Name));
    }

    #[test]
    fn short_calldata_is_rejected() {
        assert_eq!(Call::decode(&[0x06, 0xfd]), Err(AbiError::Truncated { needed: 4, available: 2 }));
        assert_eq!(Call::decode(&[]), Err(AbiError::Truncated { needed: 4, available: 0 }));
    }

    #[test]
    fn unknown_selector() {
        assert_eq!(
            Call::decode(&hex!("deadbeef")),
            Err(AbiError::UnknownSelector(InterfaceId::new(hex!("deadbeef"))))
        );
    }

    #[test]
    fn send_message_missing_tail() {
        let call = Call::SendMessage {
            to: Address::ZERO,
            message_type: U256::ZERO,
            data: Bytes::from_static(b"payload"),
        };
        let encoded = call.encode();
        let cut = &encoded[..4 + 3 * 32];
        assert!(matches!(Call::decode(cut), Err(AbiError::Truncated { .. })));
    }

    #[test]
    fn decode_return_values() {
        let name = abi::encode_string("ReferenceSEC");
        assert_eq!(
            Call::Name.decode_return(&name),
            Ok(ReturnValue::String("ReferenceSEC".to_string()))
        );

        let yes = abi::encode_bool(true);
        assert_eq!(Call::IsIerc7970.decode_return(&yes), Ok(ReturnValue::Bool(true)));
        assert_eq!(ReturnValue::Bool(true).to_string(), "true");
    }
}
