use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::operation::{OperationKind, Precompile};
use crate::selector::Selector;

/// Staking precompile on the pwROKO development network.
pub const STAKING_PRECOMPILE_ADDRESS: Address =
    address!("0000000000000000000000000000000000000700");

/// pwROKO lock/unlock precompile on the pwROKO development network.
pub const PWROKO_PRECOMPILE_ADDRESS: Address = address!("0000000000000000000000000000000000000500");

/// Address and selectors of the staking precompile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StakingPrecompile {
    pub address: Address,
    pub bond: Selector,
    pub unbond: Selector,
    pub nominate: Selector,
    pub withdraw_unbonded: Selector,
    pub staked_balance_of: Selector,
    /// Not exposed by every runtime.
    pub nominations_of: Option<Selector>,
}

impl Default for StakingPrecompile {
    fn default() -> Self {
        Self {
            address: STAKING_PRECOMPILE_ADDRESS,
            bond: Selector::from_u32(0x0000_0001),
            unbond: Selector::from_u32(0x0000_0002),
            nominate: Selector::from_u32(0x0000_0003),
            withdraw_unbonded: Selector::from_u32(0x0000_0004),
            staked_balance_of: Selector::from_u32(0x0000_0005),
            nominations_of: None,
        }
    }
}

/// Address and selectors of the pwROKO lock/unlock precompile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PwRokoPrecompile {
    pub address: Address,
    pub lock: Selector,
    pub unlock_request: Selector,
    pub complete_unlock: Selector,
    pub balance_of: Selector,
    pub pending_unlock_amount: Selector,
    pub ready_unlock_amount: Selector,
    pub staked_balance_of: Selector,
}

impl Default for PwRokoPrecompile {
    fn default() -> Self {
        Self {
            address: PWROKO_PRECOMPILE_ADDRESS,
            lock: Selector::from_u32(0xf83d_08ba),
            unlock_request: Selector::from_u32(0x8a4b_732f),
            complete_unlock: Selector::from_u32(0x648e_94a1),
            balance_of: Selector::from_u32(0x70a0_8231),
            pending_unlock_amount: Selector::from_u32(0xb52c_8714),
            ready_unlock_amount: Selector::from_u32(0x719f_25e8),
            staked_balance_of: Selector::from_u32(0x821f_56a5),
        }
    }
}

/// Precompile addresses and selectors for one network.
///
/// These are fixed by the runtime; the defaults match the pwROKO development
/// chain and can be overridden per deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    pub staking: StakingPrecompile,
    pub pwroko: PwRokoPrecompile,
}

impl ProtocolConfig {
    /// Address of the precompile that serves `kind`.
    pub fn target(&self, kind: OperationKind) -> Address {
        match kind.precompile() {
            Precompile::Staking => self.staking.address,
            Precompile::PwRoko => self.pwroko.address,
        }
    }

    /// Selector for `kind`, or `None` when the network does not expose it.
    pub fn selector(&self, kind: OperationKind) -> Option<Selector> {
        let selector = match kind {
            OperationKind::Bond => self.staking.bond,
            OperationKind::Unbond => self.staking.unbond,
            OperationKind::Nominate => self.staking.nominate,
            OperationKind::WithdrawUnbonded => self.staking.withdraw_unbonded,
            OperationKind::BondedBalanceOf => self.staking.staked_balance_of,
            OperationKind::NominationsOf => return self.staking.nominations_of,
            OperationKind::Lock => self.pwroko.lock,
            OperationKind::UnlockRequest => self.pwroko.unlock_request,
            OperationKind::CompleteUnlock => self.pwroko.complete_unlock,
            OperationKind::BalanceOf => self.pwroko.balance_of,
            OperationKind::PendingUnlockAmount => self.pwroko.pending_unlock_amount,
            OperationKind::ReadyUnlockAmount => self.pwroko.ready_unlock_amount,
            OperationKind::StakedBalanceOf => self.pwroko.staked_balance_of,
        };
        Some(selector)
    }
}
