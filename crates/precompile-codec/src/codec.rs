use alloy_primitives::{Address, U256};

use crate::abi::{self, encode_function_call, AbiParam, WORD_LEN};
use crate::amount::Amount;
use crate::error::CodecError;
use crate::operation::{Operation, OperationKind, ResultShape};
use crate::protocol::ProtocolConfig;

/// Calldata for a single precompile call, paired with its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCall {
    pub kind: OperationKind,
    pub to: Address,
    pub data: Vec<u8>,
}

impl EncodedCall {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Calldata as 0x-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.data))
    }
}

/// A typed value decoded from precompile return data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedResult {
    Amount(Amount),
    Bool(bool),
    Addresses(Vec<Address>),
}

impl DecodedResult {
    pub fn as_amount(&self) -> Option<Amount> {
        match self {
            DecodedResult::Amount(amount) => Some(*amount),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DecodedResult::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn into_addresses(self) -> Option<Vec<Address>> {
        match self {
            DecodedResult::Addresses(list) => Some(list),
            _ => None,
        }
    }
}

/// Stateless translator between [`Operation`]s and precompile calldata.
#[derive(Debug, Clone, Default)]
pub struct PrecompileCodec {
    protocol: ProtocolConfig,
}

impl PrecompileCodec {
    pub fn new(protocol: ProtocolConfig) -> Self {
        Self { protocol }
    }

    /// Encodes `operation` into `selector || args`.
    ///
    /// Validation happens before any byte is written, so a failure never
    /// leaves partial calldata behind.
    pub fn encode(&self, operation: &Operation) -> Result<EncodedCall, CodecError> {
        let kind = operation.kind();
        let selector = self
            .protocol
            .selector(kind)
            .ok_or_else(|| CodecError::UnsupportedOperation(kind.name().into()))?;

        let params = match operation {
            Operation::Bond { amount, payee } => vec![
                AbiParam::Uint256(amount.raw()),
                AbiParam::PackedU8(payee.as_u8()),
            ],
            Operation::Unbond { amount }
            | Operation::Lock { amount }
            | Operation::UnlockRequest { amount } => vec![AbiParam::Uint256(amount.raw())],
            Operation::WithdrawUnbonded => Vec::new(),
            Operation::Nominate { validators } => {
                if validators.is_empty() {
                    return Err(CodecError::EmptyValidatorList);
                }
                let mut params = Vec::with_capacity(validators.len() + 1);
                params.push(AbiParam::Uint256(U256::from(validators.len())));
                params.extend(validators.iter().copied().map(AbiParam::Address));
                params
            }
            Operation::CompleteUnlock { max_requests } => {
                vec![AbiParam::Uint256(U256::from(*max_requests))]
            }
            Operation::BalanceOf { account }
            | Operation::PendingUnlockAmount { account }
            | Operation::ReadyUnlockAmount { account }
            | Operation::StakedBalanceOf { account }
            | Operation::BondedBalanceOf { account }
            | Operation::NominationsOf { account } => vec![AbiParam::Address(*account)],
        };

        Ok(EncodedCall {
            kind,
            to: self.protocol.target(kind),
            data: encode_function_call(selector, &params),
        })
    }

    /// Decodes the raw return data of a `kind` call.
    ///
    /// An empty response is the precompile's "no data" answer and decodes to
    /// zero (or `false`, or an empty list). A non-empty response shorter than
    /// one word is malformed.
    pub fn decode(&self, kind: OperationKind, raw: &[u8]) -> Result<DecodedResult, CodecError> {
        decode(kind, raw)
    }
}

/// Free-standing form of [`PrecompileCodec::decode`]; decoding does not
/// depend on addresses or selectors.
pub fn decode(kind: OperationKind, raw: &[u8]) -> Result<DecodedResult, CodecError> {
    let shape = kind.result_shape();

    if raw.is_empty() {
        return Ok(match shape {
            ResultShape::Amount => DecodedResult::Amount(Amount::ZERO),
            ResultShape::Bool => DecodedResult::Bool(false),
            ResultShape::Addresses => DecodedResult::Addresses(Vec::new()),
        });
    }

    if raw.len() < WORD_LEN {
        return Err(CodecError::MalformedResponse {
            expected: WORD_LEN,
            actual: raw.len(),
        });
    }

    match shape {
        ResultShape::Amount => {
            abi::decode_uint256(raw).map(|v| DecodedResult::Amount(Amount::from(v)))
        }
        ResultShape::Bool => abi::decode_bool(raw).map(DecodedResult::Bool),
        ResultShape::Addresses => abi::decode_address_array(raw).map(DecodedResult::Addresses),
    }
}
