//! Capabilities the host injects: a read-only call channel to the node, the
//! native balance lookup, and a signer that can submit transactions. None of
//! them is implemented here.

use alloy_primitives::Address;
use precompile_codec::{Amount, OperationKind};

use crate::error::PwRokoError;

/// A state-changing precompile call ready to be signed and submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecompileCall {
    pub kind: OperationKind,
    pub to: Address,
    pub data: Vec<u8>,
    pub gas_limit: u64,
}

impl PrecompileCall {
    /// Calldata as 0x-prefixed lowercase hex.
    pub fn data_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.data))
    }
}

/// Executes read-only calls (`eth_call`) against a precompile.
pub trait PrecompileTransport {
    /// Returns the raw return data; an empty vector means the node answered
    /// with no data (`0x`).
    fn call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>, PwRokoError>;
}

/// Native ROKO balance of an account (`eth_getBalance` at the latest block).
pub trait NativeBalanceSource {
    fn native_balance(&self, account: Address) -> Result<Amount, PwRokoError>;
}

/// Signs and submits a transaction on the user's behalf.
pub trait TransactionSubmitter {
    /// Chain the signer is currently connected to (`eth_chainId`).
    fn chain_id(&self) -> Result<u64, PwRokoError>;

    /// Returns the transaction hash as a 0x-prefixed hex string.
    fn submit(&self, call: &PrecompileCall) -> Result<String, PwRokoError>;
}

impl<T: PrecompileTransport + ?Sized> PrecompileTransport for &T {
    fn call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>, PwRokoError> {
        (**self).call(to, data)
    }
}

impl<T: NativeBalanceSource + ?Sized> NativeBalanceSource for &T {
    fn native_balance(&self, account: Address) -> Result<Amount, PwRokoError> {
        (**self).native_balance(account)
    }
}

impl<S: TransactionSubmitter + ?Sized> TransactionSubmitter for &S {
    fn chain_id(&self) -> Result<u64, PwRokoError> {
        (**self).chain_id()
    }

    fn submit(&self, call: &PrecompileCall) -> Result<String, PwRokoError> {
        (**self).submit(call)
    }
}
