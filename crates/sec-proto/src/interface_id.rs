//! Function selectors and interface identifiers.
//!
//! A selector is the first four bytes of the Keccak-256 hash of a canonical
//! function signature such as `sendMessage(address,uint256,bytes)`. An
//! interface identifier is the XOR of the selectors of the functions an
//! interface declares itself; inherited functions and events do not
//! contribute.

use std::{fmt, ops::BitXor, str::FromStr, sync::LazyLock};

use alloy_primitives::keccak256;
use serde::{Deserialize, Serialize};

use crate::errors::AbiError;

/// 4-byte function selector.
pub type Selector = [u8; 4];

/// Derive the selector of a canonical function signature.
pub fn selector(signature: &str) -> Selector {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// 4-byte capability identifier used by the introspection query.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct InterfaceId([u8; 4]);

impl InterfaceId {
    /// The all-zero identifier. Never names a real interface.
    pub const ZERO: Self = Self([0; 4]);

    /// The identifier every introspection implementation must reject.
    pub const INVALID: Self = Self([0xff; 4]);

    /// Wrap raw bytes.
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Raw big-endian bytes.
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0
    }

    /// Identifier as a big-endian integer.
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

impl From<Selector> for InterfaceId {
    fn from(bytes: Selector) -> Self {
        Self(bytes)
    }
}

impl From<u32> for InterfaceId {
    fn from(value: u32) -> Self {
        Self(value.to_be_bytes())
    }
}

impl BitXor for InterfaceId {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self((self.to_u32() ^ rhs.to_u32()).to_be_bytes())
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.to_u32())
    }
}

impl fmt::Debug for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InterfaceId({self})")
    }
}

impl FromStr for InterfaceId {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != 8 {
            return Err(AbiError::NonCanonical { reason: "interface id must be 4 hex bytes" });
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from)
            .map_err(|_| AbiError::NonCanonical { reason: "interface id is not hex" })
    }
}

impl From<InterfaceId> for String {
    fn from(id: InterfaceId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for InterfaceId {
    type Error = AbiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Named set of function signatures making up one interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceDescriptor {
    /// Interface name, for diagnostics.
    pub name: &'static str,
    /// Canonical signatures of the functions the interface declares itself.
    pub functions: &'static [&'static str],
}

impl InterfaceDescriptor {
    /// Selectors of the declared functions, in declaration order.
    pub fn selectors(&self) -> impl Iterator<Item = Selector> + '_ {
        self.functions.iter().map(|signature| selector(signature))
    }

    /// XOR of all declared selectors.
    pub fn interface_id(&self) -> InterfaceId {
        self.selectors().map(InterfaceId::from).fold(InterfaceId::ZERO, BitXor::bitxor)
    }
}

/// Standard introspection interface: `supportsInterface(bytes4)`.
pub const IERC165: InterfaceDescriptor =
    InterfaceDescriptor { name: "IERC165", functions: &["supportsInterface(bytes4)"] };

/// Stateless encrypted communication interface.
///
/// Introspection is inherited and therefore excluded from the identifier, as
/// is the `MessageSent` event.
pub const IERC7970: InterfaceDescriptor = InterfaceDescriptor {
    name: "IERC7970",
    functions: &["name()", "sendMessage(address,uint256,bytes)"],
};

/// Identifier of the introspection capability itself.
pub const IERC165_ID: InterfaceId = InterfaceId([0x01, 0xff, 0xc9, 0xa7]);

/// Identifier of [`IERC7970`], derived once from its signature set.
pub static IERC7970_ID: LazyLock<InterfaceId> = LazyLock::new(|| IERC7970.interface_id());

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn well_known_selectors() {
        assert_eq!(selector("name()"), hex!("06fdde03"));
        assert_eq!(selector("supportsInterface(bytes4)"), hex!("01ffc9a7"));
        assert_eq!(selector("sendMessage(address,uint256,bytes)"), hex!("9f3ce55a"));
    }

    #[test]
    fn introspection_id_matches_derivation() {
        assert_eq!(IERC165.interface_id(), IERC165_ID);
    }

    #[test]
    fn erc7970_id_is_xor_of_declared_functions() {
        assert_eq!(IERC7970.interface_id(), InterfaceId::new(hex!("99c13b59")));
        assert_eq!(*IERC7970_ID, InterfaceId::from(0x99c1_3b59));
        assert_ne!(*IERC7970_ID, IERC165_ID);
    }

    #[test]
    fn display_and_parse() {
        let id = InterfaceId::new(hex!("01ffc9a7"));
        assert_eq!(id.to_string(), "0x01ffc9a7");
        assert_eq!("0x01ffc9a7".parse::<InterfaceId>(), Ok(id));
        assert_eq!("01ffc9a7".parse::<InterfaceId>(), Ok(id));
        assert!("0x01ffc9".parse::<InterfaceId>().is_err());
        assert!("0xzzzzzzzz".parse::<InterfaceId>().is_err());
    }

    proptest! {
        #[test]
        fn xor_is_self_inverse(a in any::<u32>(), b in any::<u32>()) {
            let (a, b) = (InterfaceId::from(a), InterfaceId::from(b));
            prop_assert_eq!((a ^ b) ^ b, a);
        }
    }
}
