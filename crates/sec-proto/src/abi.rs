//! Minimal head/tail ABI codec.
//!
//! Only the value types the SEC interface uses are supported: `address`,
//! `uint256`, `bool`, `bytes4`, and the dynamic `bytes`/`string`.
//!
//! Decoding follows the platform's validating decoder: static words must be
//! canonically padded, offsets and lengths must stay within the input, and
//! trailing bytes after the last referenced value are ignored.

use alloy_primitives::{Address, B256, U256};
use bytes::{BufMut, BytesMut};

use crate::{errors::AbiError, interface_id::InterfaceId};

/// ABI word size in bytes.
pub const WORD: usize = 32;

/// Round `len` up to the next multiple of [`WORD`].
pub const fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

/// Left-pad an address into a word.
pub fn address_word(address: Address) -> B256 {
    address.into_word()
}

/// Big-endian word of an unsigned integer.
pub fn uint_word(value: U256) -> B256 {
    B256::from(value.to_be_bytes::<WORD>())
}

/// Parse an address word, rejecting dirty high-order bytes.
pub fn word_address(word: &B256, position: usize) -> Result<Address, AbiError> {
    if word[..12].iter().any(|b| *b != 0) {
        return Err(AbiError::DirtyAddress { position });
    }
    Ok(Address::from_word(*word))
}

/// Append `bytes` as a length word followed by right-padded content.
pub fn put_dynamic(buf: &mut BytesMut, bytes: &[u8]) {
    buf.put_slice(uint_word(U256::from(bytes.len())).as_slice());
    buf.put_slice(bytes);
    buf.put_bytes(0, padded_len(bytes.len()) - bytes.len());
}

/// Encode a single dynamic value as a complete tuple: offset word, then tail.
pub fn encode_single_dynamic(bytes: &[u8]) -> BytesMut {
    let mut buf = BytesMut::with_capacity(2 * WORD + padded_len(bytes.len()));
    buf.put_slice(uint_word(U256::from(WORD)).as_slice());
    put_dynamic(&mut buf, bytes);
    buf
}

/// Encode a `bool` return value.
pub fn encode_bool(value: bool) -> BytesMut {
    let mut buf = BytesMut::zeroed(WORD);
    buf[WORD - 1] = u8::from(value);
    buf
}

/// Encode a `bytes4` value: left-aligned, zero-padded on the right.
pub fn encode_bytes4(id: InterfaceId) -> BytesMut {
    let mut buf = BytesMut::zeroed(WORD);
    buf[..4].copy_from_slice(&id.to_bytes());
    buf
}

/// Encode a `string` return value.
pub fn encode_string(value: &str) -> BytesMut {
    encode_single_dynamic(value.as_bytes())
}

/// Read-only cursor over an ABI tuple.
///
/// Slot indices are counted in words from the start of the tuple. Dynamic
/// values are located through their offset word, which is relative to the
/// start of the tuple.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    buf: &'a [u8],
}

impl<'a> Decoder<'a> {
    /// Decoder over a tuple.
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Byte length of the underlying tuple.
    pub const fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if the tuple has no bytes.
    pub const fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn range(&self, start: usize, len: usize) -> Result<&'a [u8], AbiError> {
        let end = start.checked_add(len).ok_or(AbiError::Overflow { position: start })?;
        self.buf
            .get(start..end)
            .ok_or(AbiError::Truncated { needed: end, available: self.buf.len() })
    }

    fn word_at(&self, position: usize) -> Result<B256, AbiError> {
        self.range(position, WORD).map(B256::from_slice)
    }

    /// Raw word in `slot`.
    pub fn word(&self, slot: usize) -> Result<B256, AbiError> {
        let position = slot.checked_mul(WORD).ok_or(AbiError::Overflow { position: usize::MAX })?;
        self.word_at(position)
    }

    /// `uint256` in `slot`.
    pub fn uint(&self, slot: usize) -> Result<U256, AbiError> {
        self.word(slot).map(|w| U256::from_be_bytes(w.0))
    }

    /// `address` in `slot`.
    pub fn address(&self, slot: usize) -> Result<Address, AbiError> {
        let word = self.word(slot)?;
        word_address(&word, slot * WORD)
    }

    /// `bool` in `slot`.
    pub fn bool(&self, slot: usize) -> Result<bool, AbiError> {
        match self.uint(slot)? {
            v if v == U256::ZERO => Ok(false),
            v if v == U256::from(1) => Ok(true),
            _ => Err(AbiError::DirtyBool { position: slot * WORD }),
        }
    }

    /// `bytes4` in `slot`.
    pub fn bytes4(&self, slot: usize) -> Result<InterfaceId, AbiError> {
        let word = self.word(slot)?;
        if word[4..].iter().any(|b| *b != 0) {
            return Err(AbiError::DirtyBytes4 { position: slot * WORD });
        }
        Ok(InterfaceId::new([word[0], word[1], word[2], word[3]]))
    }

    fn usize_at(&self, position: usize) -> Result<usize, AbiError> {
        let value = U256::from_be_bytes(self.word_at(position)?.0);
        usize::try_from(value).map_err(|_| AbiError::Overflow { position })
    }

    /// Offset word stored in `slot`.
    pub fn offset(&self, slot: usize) -> Result<usize, AbiError> {
        let position = slot.checked_mul(WORD).ok_or(AbiError::Overflow { position: usize::MAX })?;
        self.usize_at(position)
    }

    /// Dynamic `bytes` whose offset word is in `slot`.
    pub fn dynamic(&self, slot: usize) -> Result<&'a [u8], AbiError> {
        let offset = self.offset(slot)?;
        let len = self.usize_at(offset)?;
        let start = offset.checked_add(WORD).ok_or(AbiError::Overflow { position: offset })?;
        self.range(start, len)
    }

    /// Dynamic `string` whose offset word is in `slot`.
    pub fn string(&self, slot: usize) -> Result<&'a str, AbiError> {
        std::str::from_utf8(self.dynamic(slot)?).map_err(|_| AbiError::InvalidUtf8)
    }
}
