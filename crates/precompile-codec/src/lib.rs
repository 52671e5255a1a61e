//! Calldata codec for the pwROKO staking and lock/unlock precompiles.
//!
//! This crate provides:
//! - Typed precompile operations (bond, unbond, nominate, lock, unlock, balance reads)
//! - Fixed-layout calldata encoding and return-data decoding
//! - Injectable precompile addresses and selectors
//! - 18-decimal amount parsing and formatting
//! - Address parsing with EIP-55 checksum validation

pub mod abi;
pub mod address;
pub mod amount;
pub mod codec;
pub mod error;
pub mod operation;
pub mod protocol;
pub mod selector;

pub use alloy_primitives::{Address, U256};
pub use amount::Amount;
pub use codec::{DecodedResult, EncodedCall, PrecompileCodec};
pub use error::CodecError;
pub use operation::{Operation, OperationKind, PayeeType, Precompile, ResultShape};
pub use protocol::ProtocolConfig;
pub use selector::Selector;
