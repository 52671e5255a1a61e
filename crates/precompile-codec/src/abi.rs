//! Minimal calldata layout for the staking and pwROKO precompiles.
//!
//! Calls are `selector || word || word || ...`. Most arguments occupy a full
//! 32-byte word; the staking `bond` call additionally appends its payee type
//! as a single trailing byte, which is not standard ABI.

use alloy_primitives::{Address, U256};

use crate::address::address_word;
use crate::error::CodecError;
use crate::selector::Selector;

/// Width of a single ABI word.
pub const WORD_LEN: usize = 32;

/// A single encoded call argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiParam {
    /// A 20-byte address, left-padded to 32 bytes.
    Address(Address),
    /// A 256-bit unsigned integer as a big-endian 32-byte word.
    Uint256(U256),
    /// A single raw byte with no padding.
    PackedU8(u8),
}

impl AbiParam {
    /// Number of bytes this parameter occupies in the calldata.
    pub fn encoded_len(&self) -> usize {
        match self {
            AbiParam::Address(_) | AbiParam::Uint256(_) => WORD_LEN,
            AbiParam::PackedU8(_) => 1,
        }
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            AbiParam::Address(addr) => out.extend_from_slice(&address_word(addr)),
            AbiParam::Uint256(value) => out.extend_from_slice(&value.to_be_bytes::<WORD_LEN>()),
            AbiParam::PackedU8(byte) => out.push(*byte),
        }
    }
}

/// Encodes a call as `selector || encode(params[0]) || encode(params[1]) || ...`.
///
/// The output buffer is sized up front from the parameter widths, so the
/// layout is fully determined by the parameter list.
pub fn encode_function_call(selector: Selector, params: &[AbiParam]) -> Vec<u8> {
    let len = 4 + params.iter().map(AbiParam::encoded_len).sum::<usize>();
    let mut data = Vec::with_capacity(len);
    data.extend_from_slice(selector.as_bytes());

    for param in params {
        param.write_to(&mut data);
    }

    debug_assert_eq!(data.len(), len);
    data
}

/// Reads the first 32-byte word of `data` as a big-endian unsigned integer.
///
/// Extra trailing bytes are ignored.
pub fn decode_uint256(data: &[u8]) -> Result<U256, CodecError> {
    let word = read_word(data, 0)?;
    Ok(U256::from_be_bytes(word))
}

/// Reads the first word of `data` as a boolean: true when the low-order byte
/// is non-zero.
pub fn decode_bool(data: &[u8]) -> Result<bool, CodecError> {
    let word = read_word(data, 0)?;
    Ok(word[WORD_LEN - 1] != 0)
}

/// Decodes a dynamic `address[]` return value: a head word holding the
/// offset of the array, then the length word, then one word per address.
pub fn decode_address_array(data: &[u8]) -> Result<Vec<Address>, CodecError> {
    let offset = read_usize(data, 0)?;
    let len = read_usize(data, offset)?;

    // `read_usize` succeeded at `offset`, so this cannot overflow.
    let items_start = offset + WORD_LEN;
    let needed = len
        .checked_mul(WORD_LEN)
        .and_then(|n| n.checked_add(items_start))
        .ok_or(CodecError::MalformedResponse {
            expected: usize::MAX,
            actual: data.len(),
        })?;
    if data.len() < needed {
        return Err(CodecError::MalformedResponse {
            expected: needed,
            actual: data.len(),
        });
    }

    (0..len)
        .map(|i| {
            let word = read_word(data, items_start + i * WORD_LEN)?;
            // An address word with dirty padding is not a valid ABI encoding.
            if word[..12] != [0u8; 12] {
                return Err(CodecError::MalformedResponse {
                    expected: WORD_LEN,
                    actual: data.len(),
                });
            }
            Ok(Address::from_slice(&word[12..]))
        })
        .collect()
}

/// Every failure here is a short or inconsistent response, never bad input.
fn read_word(data: &[u8], offset: usize) -> Result<[u8; WORD_LEN], CodecError> {
    let end = offset.checked_add(WORD_LEN).ok_or(CodecError::MalformedResponse {
        expected: usize::MAX,
        actual: data.len(),
    })?;
    let slice = data.get(offset..end).ok_or(CodecError::MalformedResponse {
        expected: end,
        actual: data.len(),
    })?;

    let mut word = [0u8; WORD_LEN];
    word.copy_from_slice(slice);
    Ok(word)
}

fn read_usize(data: &[u8], offset: usize) -> Result<usize, CodecError> {
    let value = U256::from_be_bytes(read_word(data, offset)?);
    usize::try_from(value).map_err(|_| CodecError::MalformedResponse {
        expected: usize::MAX,
        actual: data.len(),
    })
}
