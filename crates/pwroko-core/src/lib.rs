pub mod balances;
pub mod config;
pub mod error;
pub mod staking;
pub mod transport;
pub mod types;

use std::sync::Arc;

use balances::{resolve_staked, PwRokoBalances, StakedBalancePolicy};
use config::NetworkConfig;
use error::PwRokoError;
use precompile_codec::address::{checksum_address, parse_address};
use precompile_codec::amount::format_units_truncated;
use precompile_codec::codec::decode;
use precompile_codec::{Amount, Operation, OperationKind, PrecompileCodec};
use types::{BalanceQuery, BalanceSummary, CallData, Payee, RawBalanceResponses};

uniffi::setup_scaffolding!();

/// Fraction digits kept by [`PwRokoNetwork::format_amount_short`].
const SHORT_FRACTION_DIGITS: usize = 6;

// ─── UniFFI-exported objects ─────────────────────────────────────────
// Note: UniFFI passes owned String/Vec<u8> across FFI, so all functions
// accept owned types (not references).

/// One pwROKO network: builds precompile calldata and converts amounts at
/// the network's decimals.
#[derive(Debug, uniffi::Object)]
pub struct PwRokoNetwork {
    config: NetworkConfig,
    codec: PrecompileCodec,
}

#[uniffi::export]
impl PwRokoNetwork {
    /// Uses the development network when `config_json` is `None`.
    #[uniffi::constructor]
    pub fn new(config_json: Option<String>) -> Result<Arc<Self>, PwRokoError> {
        let config = match config_json {
            Some(json) => NetworkConfig::from_json(&json)?,
            None => NetworkConfig::pwroko_dev(),
        };
        Ok(Arc::new(Self::from_config(config)))
    }

    /// Chain ID to request from the wallet, e.g. `0x1ba`.
    pub fn chain_id_hex(&self) -> String {
        self.config.chain_id_hex()
    }

    /// Fails with `WrongChain` unless the wallet reports this network's chain.
    pub fn ensure_chain(&self, chain_id: u64) -> Result<(), PwRokoError> {
        self.config.ensure_chain(chain_id)
    }

    /// Bond `amount` (decimal token text, e.g. "1.5") for staking.
    pub fn encode_bond(&self, amount: String, payee: Payee) -> Result<CallData, PwRokoError> {
        self.write(Operation::Bond {
            amount: self.config.parse_amount(&amount)?,
            payee: payee.into(),
        })
    }

    pub fn encode_unbond(&self, amount: String) -> Result<CallData, PwRokoError> {
        self.write(Operation::Unbond {
            amount: self.config.parse_amount(&amount)?,
        })
    }

    pub fn encode_withdraw_unbonded(&self) -> Result<CallData, PwRokoError> {
        self.write(Operation::WithdrawUnbonded)
    }

    pub fn encode_nominate(&self, validators: Vec<String>) -> Result<CallData, PwRokoError> {
        let validators = validators
            .iter()
            .map(|v| parse_address(v))
            .collect::<Result<Vec<_>, _>>()?;
        self.write(Operation::Nominate { validators })
    }

    pub fn encode_lock(&self, amount: String) -> Result<CallData, PwRokoError> {
        self.write(Operation::Lock {
            amount: self.config.parse_amount(&amount)?,
        })
    }

    pub fn encode_unlock_request(&self, amount: String) -> Result<CallData, PwRokoError> {
        self.write(Operation::UnlockRequest {
            amount: self.config.parse_amount(&amount)?,
        })
    }

    pub fn encode_complete_unlock(&self, max_requests: u32) -> Result<CallData, PwRokoError> {
        self.write(Operation::CompleteUnlock { max_requests })
    }

    /// Calldata for a read-only balance query (`gas_limit` is zero).
    pub fn encode_balance_query(
        &self,
        query: BalanceQuery,
        account: String,
    ) -> Result<CallData, PwRokoError> {
        let account = parse_address(&account)?;
        let operation = match query {
            BalanceQuery::Free => Operation::BalanceOf { account },
            BalanceQuery::PendingUnlock => Operation::PendingUnlockAmount { account },
            BalanceQuery::ReadyUnlock => Operation::ReadyUnlockAmount { account },
            BalanceQuery::Staked => Operation::StakedBalanceOf { account },
            BalanceQuery::Bonded => Operation::BondedBalanceOf { account },
        };

        let encoded = self.codec.encode(&operation)?;
        Ok(CallData {
            to: checksum_address(&encoded.to),
            data: encoded.data,
            gas_limit: self.config.gas.limit_for(encoded.kind),
        })
    }

    /// Format a smallest-unit amount ("1500000000000000000") as token text ("1.5").
    pub fn format_amount(&self, raw: String) -> Result<String, PwRokoError> {
        self.config.format_amount(Amount::from_raw_str(&raw)?)
    }

    /// Like [`PwRokoNetwork::format_amount`], with at most six fractional digits.
    pub fn format_amount_short(&self, raw: String) -> Result<String, PwRokoError> {
        let amount = Amount::from_raw_str(&raw)?;
        Ok(format_units_truncated(
            amount,
            self.config.decimals,
            SHORT_FRACTION_DIGITS,
        )?)
    }

    /// Parse token text ("1.5") into a smallest-unit decimal string.
    pub fn parse_amount(&self, text: String) -> Result<String, PwRokoError> {
        Ok(self.config.parse_amount(&text)?.raw().to_string())
    }

    /// Decode and aggregate the host's balance responses for one account.
    pub fn summarize_balances(
        &self,
        responses: RawBalanceResponses,
    ) -> Result<BalanceSummary, PwRokoError> {
        let staked = resolve_staked(
            StakedBalancePolicy::default(),
            [
                answer(OperationKind::StakedBalanceOf, responses.staked.as_deref()),
                answer(OperationKind::BondedBalanceOf, responses.bonded.as_deref()),
            ],
        );

        let balances = PwRokoBalances::new(
            read(OperationKind::BalanceOf, &responses.free)?,
            staked,
            read(OperationKind::PendingUnlockAmount, &responses.pending_unlock)?,
            read(OperationKind::ReadyUnlockAmount, &responses.ready_unlock)?,
        )?;

        let native = responses
            .native
            .map(|quantity| -> Result<String, PwRokoError> {
                self.config.format_amount(Amount::from_hex_quantity(&quantity)?)
            })
            .transpose()?;

        Ok(BalanceSummary {
            native,
            free: self.config.format_amount(balances.free)?,
            staked: self.config.format_amount(balances.staked)?,
            pending_unlock: self.config.format_amount(balances.pending_unlock)?,
            ready_unlock: self.config.format_amount(balances.ready_unlock)?,
            total_owned: self.config.format_amount(balances.total_owned)?,
            free_bps: balances.share_bps(balances.free),
            staked_bps: balances.share_bps(balances.staked),
            pending_unlock_bps: balances.share_bps(balances.pending_unlock),
            ready_unlock_bps: balances.share_bps(balances.ready_unlock),
        })
    }
}

impl PwRokoNetwork {
    pub fn from_config(config: NetworkConfig) -> Self {
        Self {
            codec: PrecompileCodec::new(config.precompiles.clone()),
            config,
        }
    }

    fn write(&self, operation: Operation) -> Result<CallData, PwRokoError> {
        staking::build_call(&self.codec, &self.config.gas, &operation).map(CallData::from)
    }
}

fn read(kind: OperationKind, raw: &[u8]) -> Result<Amount, PwRokoError> {
    Ok(decode(kind, raw)?.as_amount().unwrap_or(Amount::ZERO))
}

fn answer(
    kind: OperationKind,
    raw: Option<&[u8]>,
) -> (OperationKind, Result<Amount, PwRokoError>) {
    let amount = match raw {
        Some(raw) => read(kind, raw),
        None => Err(PwRokoError::Transport(format!("{} unavailable", kind.name()))),
    };
    (kind, amount)
}

// ─── UniFFI-exported functions ───────────────────────────────────────

/// The development network definition as JSON, as a starting point for
/// custom network files.
#[uniffi::export]
pub fn default_network_config_json() -> Result<String, PwRokoError> {
    NetworkConfig::pwroko_dev().to_json()
}

/// Decode a uint256 balance response into a smallest-unit decimal string.
#[uniffi::export]
pub fn decode_amount(raw: Vec<u8>) -> Result<String, PwRokoError> {
    Ok(read(OperationKind::BalanceOf, &raw)?.raw().to_string())
}

/// Decode the boolean result of a write call.
#[uniffi::export]
pub fn decode_bool(raw: Vec<u8>) -> Result<bool, PwRokoError> {
    Ok(decode(OperationKind::Bond, &raw)?.as_bool().unwrap_or(false))
}

/// Share of `part` in `total` (both smallest-unit decimal strings), in basis points.
#[uniffi::export]
pub fn percentage_bps(part: String, total: String) -> Result<u32, PwRokoError> {
    let part = Amount::from_raw_str(&part)?;
    let total = Amount::from_raw_str(&total)?;
    Ok(precompile_codec::amount::percentage_bps(part, total))
}
