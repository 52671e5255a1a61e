use precompile_codec::amount::{format_units, MAX_DECIMALS};
use precompile_codec::{Amount, OperationKind, ProtocolConfig};
use serde::{Deserialize, Serialize};

use crate::error::PwRokoError;

/// Gas limits attached to precompile transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasLimits {
    /// bond, unbond, withdrawUnbonded
    pub staking: u64,
    /// lock, unlockRequest, completeUnlock
    pub lock: u64,
    pub nominate: u64,
}

impl Default for GasLimits {
    fn default() -> Self {
        Self {
            staking: 2_000_000,
            lock: 1_000_000,
            nominate: 500_000,
        }
    }
}

impl GasLimits {
    /// Gas limit for `kind`; zero for read-only calls.
    pub fn limit_for(&self, kind: OperationKind) -> u64 {
        match kind {
            OperationKind::Bond | OperationKind::Unbond | OperationKind::WithdrawUnbonded => {
                self.staking
            }
            OperationKind::Nominate => self.nominate,
            OperationKind::Lock | OperationKind::UnlockRequest | OperationKind::CompleteUnlock => {
                self.lock
            }
            _ => 0,
        }
    }
}

/// Definition of a pwROKO-compatible network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub chain_name: String,
    pub symbol: String,
    pub decimals: u8,
    pub rpc_url: String,
    pub gas: GasLimits,
    pub precompiles: ProtocolConfig,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::pwroko_dev()
    }
}

impl NetworkConfig {
    /// Local pwROKO development chain (chain ID 442).
    pub fn pwroko_dev() -> Self {
        Self {
            chain_id: 442,
            chain_name: "pwROKO Development".into(),
            symbol: "ROKO".into(),
            decimals: 18,
            rpc_url: "http://127.0.0.1:8545".into(),
            gas: GasLimits::default(),
            precompiles: ProtocolConfig::default(),
        }
    }

    /// Parses a JSON network file. Missing fields keep their development
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, PwRokoError> {
        let config: NetworkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, PwRokoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Chain ID in the 0x-prefixed form wallets expect, e.g. `0x1ba`.
    pub fn chain_id_hex(&self) -> String {
        format!("{:#x}", self.chain_id)
    }

    /// Fails unless a wallet reporting `actual` is connected to this network.
    pub fn ensure_chain(&self, actual: u64) -> Result<(), PwRokoError> {
        if actual != self.chain_id {
            return Err(PwRokoError::WrongChain {
                expected: self.chain_id,
                actual,
            });
        }
        Ok(())
    }

    /// Formats `amount` at this network's decimals.
    pub fn format_amount(&self, amount: Amount) -> Result<String, PwRokoError> {
        Ok(format_units(amount, self.decimals)?)
    }

    /// Parses token text such as `"1.5"` at this network's decimals.
    pub fn parse_amount(&self, text: &str) -> Result<Amount, PwRokoError> {
        Ok(Amount::parse_units(text.trim(), self.decimals)?)
    }

    fn validate(&self) -> Result<(), PwRokoError> {
        if self.chain_id == 0 {
            return Err(PwRokoError::Config("chain_id must be non-zero".into()));
        }
        if self.decimals > MAX_DECIMALS {
            return Err(PwRokoError::Config(format!(
                "decimals must be at most {MAX_DECIMALS}, got {}",
                self.decimals
            )));
        }
        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err(PwRokoError::Config(format!(
                "rpc_url must be http(s), got {:?}",
                self.rpc_url
            )));
        }
        Ok(())
    }
}
