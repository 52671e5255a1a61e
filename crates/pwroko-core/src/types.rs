use precompile_codec::address::checksum_address;
use precompile_codec::PayeeType;

use crate::transport::PrecompileCall;

/// Reward destination, as chosen in the bonding form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum Payee {
    /// Rewards automatically staked
    Staked,
    /// Rewards to stash account
    Stash,
    /// Rewards to controller account
    Account,
}

impl From<Payee> for PayeeType {
    fn from(payee: Payee) -> Self {
        match payee {
            Payee::Staked => PayeeType::Staked,
            Payee::Stash => PayeeType::Stash,
            Payee::Account => PayeeType::Account,
        }
    }
}

/// Balance read the host can ask calldata for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum BalanceQuery {
    Free,
    PendingUnlock,
    ReadyUnlock,
    Staked,
    Bonded,
}

/// A precompile call handed to the host wallet.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct CallData {
    /// EIP-55 checksummed precompile address.
    pub to: String,
    pub data: Vec<u8>,
    /// Zero for read-only calls.
    pub gas_limit: u64,
}

impl From<PrecompileCall> for CallData {
    fn from(call: PrecompileCall) -> Self {
        Self {
            to: checksum_address(&call.to),
            data: call.data,
            gas_limit: call.gas_limit,
        }
    }
}

/// Raw `eth_call` results gathered by the host for one account.
#[derive(Debug, Clone, Default, PartialEq, Eq, uniffi::Record)]
pub struct RawBalanceResponses {
    pub free: Vec<u8>,
    /// pwROKO precompile `stakedBalanceOf`; `None` if the call failed.
    pub staked: Option<Vec<u8>>,
    /// Staking precompile staked balance; `None` if the call failed or was skipped.
    pub bonded: Option<Vec<u8>>,
    pub pending_unlock: Vec<u8>,
    pub ready_unlock: Vec<u8>,
    /// `eth_getBalance` hex quantity, e.g. `"0x1bc16d674ec80000"`.
    pub native: Option<String>,
}

/// Balance breakdown formatted for display at the network's decimals
/// (trailing zeros stripped), plus each component's share of the total in
/// basis points.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct BalanceSummary {
    /// Native ROKO, when the host supplied it.
    pub native: Option<String>,
    pub free: String,
    pub staked: String,
    pub pending_unlock: String,
    pub ready_unlock: String,
    pub total_owned: String,
    pub free_bps: u32,
    pub staked_bps: u32,
    pub pending_unlock_bps: u32,
    pub ready_unlock_bps: u32,
}
