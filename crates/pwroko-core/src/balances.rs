//! pwROKO balance aggregation over the read-only precompile calls.
//!
//! `balanceOf` on the pwROKO precompile returns only the free portion, so the
//! total owned is the sum of free, staked, pending-unlock and ready-unlock.

use alloy_primitives::Address;
use precompile_codec::amount::percentage_bps;
use precompile_codec::{Amount, Operation, OperationKind, PrecompileCodec, ProtocolConfig};
use tracing::{debug, warn};

use crate::error::PwRokoError;
use crate::transport::{NativeBalanceSource, PrecompileTransport};

/// Sources tried, in order, for the staked balance.
pub const STAKED_SOURCES: [OperationKind; 2] =
    [OperationKind::StakedBalanceOf, OperationKind::BondedBalanceOf];

/// How a zero answer from a staked-balance source is treated.
///
/// | policy             | source errors | source returns 0 | source returns n > 0 |
/// |--------------------|---------------|------------------|----------------------|
/// | `ZeroFallsThrough` | next source   | next source      | n                    |
/// | `FirstAnswerWins`  | next source   | 0                | n                    |
///
/// When every source is exhausted the staked balance is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StakedBalancePolicy {
    #[default]
    ZeroFallsThrough,
    FirstAnswerWins,
}

/// Picks the staked balance from source answers in priority order.
///
/// `answers` is consumed lazily, so sources after the winning one are never
/// queried.
pub fn resolve_staked<I>(policy: StakedBalancePolicy, answers: I) -> Amount
where
    I: IntoIterator<Item = (OperationKind, Result<Amount, PwRokoError>)>,
{
    for (kind, answer) in answers {
        match answer {
            Ok(amount) if !amount.is_zero() => return amount,
            Ok(amount) if policy == StakedBalancePolicy::FirstAnswerWins => return amount,
            Ok(_) => debug!(source = kind.name(), "staked balance source returned zero"),
            Err(e) => warn!(source = kind.name(), error = %e, "staked balance source failed"),
        }
    }
    Amount::ZERO
}

/// Breakdown of everything an account owns in pwROKO.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PwRokoBalances {
    pub free: Amount,
    pub staked: Amount,
    pub pending_unlock: Amount,
    pub ready_unlock: Amount,
    pub total_owned: Amount,
}

impl PwRokoBalances {
    pub fn new(
        free: Amount,
        staked: Amount,
        pending_unlock: Amount,
        ready_unlock: Amount,
    ) -> Result<Self, PwRokoError> {
        let total_owned = [staked, pending_unlock, ready_unlock]
            .into_iter()
            .try_fold(free, Amount::checked_add)
            .ok_or_else(|| PwRokoError::InvalidArgument("total balance exceeds 256 bits".into()))?;

        Ok(Self {
            free,
            staked,
            pending_unlock,
            ready_unlock,
            total_owned,
        })
    }

    /// Share of `component` in the total owned, in basis points.
    pub fn share_bps(&self, component: Amount) -> u32 {
        percentage_bps(component, self.total_owned)
    }
}

/// Reads pwROKO balances through an injected transport.
pub struct BalanceReader<T> {
    transport: T,
    codec: PrecompileCodec,
    policy: StakedBalancePolicy,
}

impl<T: PrecompileTransport> BalanceReader<T> {
    pub fn new(transport: T, protocol: ProtocolConfig) -> Self {
        Self {
            transport,
            codec: PrecompileCodec::new(protocol),
            policy: StakedBalancePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: StakedBalancePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Free (unstaked, unlocked) pwROKO.
    pub fn free_balance(&self, account: Address) -> Result<Amount, PwRokoError> {
        self.read_amount(&Operation::BalanceOf { account })
    }

    pub fn pending_unlock(&self, account: Address) -> Result<Amount, PwRokoError> {
        self.read_amount(&Operation::PendingUnlockAmount { account })
    }

    pub fn ready_unlock(&self, account: Address) -> Result<Amount, PwRokoError> {
        self.read_amount(&Operation::ReadyUnlockAmount { account })
    }

    /// Staked balance resolved through [`STAKED_SOURCES`] under the reader's
    /// policy. Source failures are logged, not returned.
    pub fn staked_balance(&self, account: Address) -> Amount {
        let answers = STAKED_SOURCES
            .iter()
            .map(|&kind| (kind, self.read_amount(&staked_query(kind, account))));
        resolve_staked(self.policy, answers)
    }

    /// Validators the account currently nominates.
    pub fn nominations(&self, account: Address) -> Result<Vec<Address>, PwRokoError> {
        let call = self.codec.encode(&Operation::NominationsOf { account })?;
        let raw = self.transport.call(call.to, &call.data)?;
        let decoded = self.codec.decode(call.kind, &raw)?;
        decoded
            .into_addresses()
            .ok_or_else(|| PwRokoError::MalformedResponse("expected an address list".into()))
    }

    pub fn all_balances(&self, account: Address) -> Result<PwRokoBalances, PwRokoError> {
        let free = self.free_balance(account)?;
        let staked = self.staked_balance(account);
        let pending_unlock = self.pending_unlock(account)?;
        let ready_unlock = self.ready_unlock(account)?;

        let balances = PwRokoBalances::new(free, staked, pending_unlock, ready_unlock)?;
        // Logged in smallest units.
        debug!(
            %account,
            free = %balances.free.raw(),
            staked = %balances.staked.raw(),
            pending_unlock = %balances.pending_unlock.raw(),
            ready_unlock = %balances.ready_unlock.raw(),
            total = %balances.total_owned.raw(),
            "pwROKO balance breakdown"
        );
        Ok(balances)
    }

    fn read_amount(&self, operation: &Operation) -> Result<Amount, PwRokoError> {
        let call = self.codec.encode(operation)?;
        debug!(kind = call.kind.name(), to = %call.to, data = %call.to_hex(), "precompile read");

        let raw = self.transport.call(call.to, &call.data)?;
        let decoded = self.codec.decode(call.kind, &raw)?;
        decoded.as_amount().ok_or_else(|| {
            PwRokoError::MalformedResponse(format!("{} is not an amount", call.kind.name()))
        })
    }
}

impl<T: NativeBalanceSource> BalanceReader<T> {
    /// Native ROKO held by `account`, i.e. what is available to `lock`.
    pub fn native_balance(&self, account: Address) -> Result<Amount, PwRokoError> {
        let balance = self.transport.native_balance(account)?;
        debug!(%account, native = %balance.raw(), "native balance");
        Ok(balance)
    }
}

fn staked_query(kind: OperationKind, account: Address) -> Operation {
    match kind {
        OperationKind::BondedBalanceOf => Operation::BondedBalanceOf { account },
        _ => Operation::StakedBalanceOf { account },
    }
}
