use alloy_primitives::Address;
use precompile_codec::{Amount, Operation, PayeeType, PrecompileCodec};
use tracing::debug;

use crate::config::{GasLimits, NetworkConfig};
use crate::error::PwRokoError;
use crate::transport::{PrecompileCall, TransactionSubmitter};

/// Unlock requests processed per `completeUnlock` call when the caller does
/// not say otherwise.
pub const DEFAULT_MAX_UNLOCK_REQUESTS: u32 = 10;

/// Builds the transaction for a state-changing precompile operation.
///
/// Encoding runs first, so malformed input is rejected before anything is
/// handed to a submitter. Read-only operations are refused.
pub fn build_call(
    codec: &PrecompileCodec,
    gas: &GasLimits,
    operation: &Operation,
) -> Result<PrecompileCall, PwRokoError> {
    let kind = operation.kind();
    if kind.is_read() {
        return Err(PwRokoError::InvalidArgument(format!(
            "{} is a read-only call",
            kind.name()
        )));
    }

    let encoded = codec.encode(operation)?;

    Ok(PrecompileCall {
        kind,
        to: encoded.to,
        data: encoded.data,
        gas_limit: gas.limit_for(kind),
    })
}

/// Submits staking and lock/unlock transactions through an injected signer.
pub struct StakingClient<S> {
    submitter: S,
    codec: PrecompileCodec,
    network: NetworkConfig,
}

impl<S: TransactionSubmitter> StakingClient<S> {
    pub fn new(submitter: S, config: &NetworkConfig) -> Self {
        Self {
            submitter,
            codec: PrecompileCodec::new(config.precompiles.clone()),
            network: config.clone(),
        }
    }

    pub fn build_call(&self, operation: &Operation) -> Result<PrecompileCall, PwRokoError> {
        build_call(&self.codec, &self.network.gas, operation)
    }

    /// Encodes, checks the signer's chain, then submits. Returns the
    /// transaction hash.
    pub fn submit(&self, operation: &Operation) -> Result<String, PwRokoError> {
        let call = self.build_call(operation)?;
        self.network.ensure_chain(self.submitter.chain_id()?)?;
        debug!(
            kind = call.kind.name(),
            to = %call.to,
            gas_limit = call.gas_limit,
            data = %call.data_hex(),
            "submitting precompile transaction"
        );

        let tx_hash = self.submitter.submit(&call)?;
        debug!(kind = call.kind.name(), %tx_hash, "precompile transaction submitted");
        Ok(tx_hash)
    }

    pub fn bond(&self, amount: Amount, payee: PayeeType) -> Result<String, PwRokoError> {
        self.submit(&Operation::Bond { amount, payee })
    }

    pub fn unbond(&self, amount: Amount) -> Result<String, PwRokoError> {
        self.submit(&Operation::Unbond { amount })
    }

    pub fn withdraw_unbonded(&self) -> Result<String, PwRokoError> {
        self.submit(&Operation::WithdrawUnbonded)
    }

    pub fn nominate(&self, validators: Vec<Address>) -> Result<String, PwRokoError> {
        self.submit(&Operation::Nominate { validators })
    }

    /// Converts ROKO into pwROKO.
    pub fn lock(&self, amount: Amount) -> Result<String, PwRokoError> {
        self.submit(&Operation::Lock { amount })
    }

    /// Starts the cooldown for converting pwROKO back to ROKO.
    pub fn unlock_request(&self, amount: Amount) -> Result<String, PwRokoError> {
        self.submit(&Operation::UnlockRequest { amount })
    }

    pub fn complete_unlock(&self, max_requests: u32) -> Result<String, PwRokoError> {
        self.submit(&Operation::CompleteUnlock { max_requests })
    }
}
