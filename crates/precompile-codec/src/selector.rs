use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::error::CodecError;

/// A 4-byte function selector placed at the head of every encoded call.
///
/// The staking precompile uses plain counters (`0x00000001`, `0x00000002`, ...)
/// rather than Keccak-derived selectors, so selectors are usually supplied
/// verbatim. [`Selector::from_signature`] covers the ERC-20 style ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Selector(pub [u8; 4]);

impl Selector {
    /// Builds a selector from a big-endian `u32`, e.g. `0x70a08231`.
    pub const fn from_u32(value: u32) -> Self {
        Self(value.to_be_bytes())
    }

    /// Derives the standard selector: the first 4 bytes of
    /// `keccak256(signature)`, e.g. `balanceOf(address)`.
    pub fn from_signature(signature: &str) -> Self {
        let hash = Keccak256::digest(signature.as_bytes());
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&hash[..4]);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Selector {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_str = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| CodecError::InvalidArgument("selector must start with 0x".into()))?;

        if hex_str.len() != 8 {
            return Err(CodecError::InvalidArgument(format!(
                "selector must be 8 hex characters, got {}",
                hex_str.len()
            )));
        }

        let bytes = hex::decode(hex_str)
            .map_err(|e| CodecError::InvalidArgument(format!("invalid selector hex: {e}")))?;

        let mut selector = [0u8; 4];
        selector.copy_from_slice(&bytes);
        Ok(Self(selector))
    }
}

impl TryFrom<String> for Selector {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.to_string()
    }
}
