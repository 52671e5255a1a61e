use alloy_primitives::Address;
use sha3::{Digest, Keccak256};

use crate::error::CodecError;

/// Parses a 0x-prefixed 20-byte hex address.
///
/// Input longer or shorter than 40 hex characters is rejected, never
/// truncated or padded. Mixed-case input must carry a valid EIP-55 checksum;
/// all-lowercase and all-uppercase input is accepted as-is.
pub fn parse_address(address: &str) -> Result<Address, CodecError> {
    let hex_part = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| CodecError::InvalidAddress("address must start with 0x".into()))?;

    if hex_part.len() != 40 {
        return Err(CodecError::InvalidAddress(format!(
            "expected 40 hex characters, got {}",
            hex_part.len()
        )));
    }

    if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CodecError::InvalidAddress(
            "address contains non-hex characters".into(),
        ));
    }

    let bytes = hex::decode(hex_part)
        .map_err(|e| CodecError::InvalidAddress(format!("invalid hex: {e}")))?;
    let parsed = Address::from_slice(&bytes);

    let is_all_lower = hex_part.chars().all(|c| !c.is_ascii_uppercase());
    let is_all_upper = hex_part.chars().all(|c| !c.is_ascii_lowercase());

    if !is_all_lower && !is_all_upper && checksum_address(&parsed)[2..] != *hex_part {
        return Err(CodecError::InvalidAddress(format!(
            "checksum mismatch for {address}"
        )));
    }

    Ok(parsed)
}

/// Renders an address in EIP-55 mixed-case checksum form.
pub fn checksum_address(address: &Address) -> String {
    let hex_part = hex::encode(address.as_slice());

    // EIP-55: hash the lowercase hex address (without 0x).
    let hash = Keccak256::digest(hex_part.as_bytes());

    let mut checksummed = String::with_capacity(42);
    checksummed.push_str("0x");

    for (i, c) in hex_part.chars().enumerate() {
        // High nibble for even positions, low nibble for odd ones.
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            checksummed.push(c.to_ascii_uppercase());
        } else {
            checksummed.push(c);
        }
    }

    checksummed
}

/// Left-pads an address to a 32-byte ABI word.
pub fn address_word(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_slice());
    word
}
