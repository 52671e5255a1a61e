use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::error::CodecError;

/// Where staking rewards are deposited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PayeeType {
    /// Rewards are automatically re-staked.
    Staked = 0,
    /// Rewards go to the stash account.
    Stash = 1,
    /// Rewards go to the controller account.
    Account = 2,
}

impl PayeeType {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PayeeType {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PayeeType::Staked),
            1 => Ok(PayeeType::Stash),
            2 => Ok(PayeeType::Account),
            other => Err(CodecError::InvalidArgument(format!(
                "unknown payee type {other}"
            ))),
        }
    }
}

/// The precompile an operation is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precompile {
    Staking,
    PwRoko,
}

/// Shape of the value a call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    Amount,
    Bool,
    Addresses,
}

/// A typed precompile request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Bond { amount: Amount, payee: PayeeType },
    Unbond { amount: Amount },
    WithdrawUnbonded,
    Nominate { validators: Vec<Address> },
    Lock { amount: Amount },
    UnlockRequest { amount: Amount },
    CompleteUnlock { max_requests: u32 },
    BalanceOf { account: Address },
    PendingUnlockAmount { account: Address },
    ReadyUnlockAmount { account: Address },
    StakedBalanceOf { account: Address },
    /// The staking precompile's own staked-balance read.
    BondedBalanceOf { account: Address },
    NominationsOf { account: Address },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Bond { .. } => OperationKind::Bond,
            Operation::Unbond { .. } => OperationKind::Unbond,
            Operation::WithdrawUnbonded => OperationKind::WithdrawUnbonded,
            Operation::Nominate { .. } => OperationKind::Nominate,
            Operation::Lock { .. } => OperationKind::Lock,
            Operation::UnlockRequest { .. } => OperationKind::UnlockRequest,
            Operation::CompleteUnlock { .. } => OperationKind::CompleteUnlock,
            Operation::BalanceOf { .. } => OperationKind::BalanceOf,
            Operation::PendingUnlockAmount { .. } => OperationKind::PendingUnlockAmount,
            Operation::ReadyUnlockAmount { .. } => OperationKind::ReadyUnlockAmount,
            Operation::StakedBalanceOf { .. } => OperationKind::StakedBalanceOf,
            Operation::BondedBalanceOf { .. } => OperationKind::BondedBalanceOf,
            Operation::NominationsOf { .. } => OperationKind::NominationsOf,
        }
    }
}

/// [`Operation`] without its payload, used to pick a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Bond,
    Unbond,
    WithdrawUnbonded,
    Nominate,
    Lock,
    UnlockRequest,
    CompleteUnlock,
    BalanceOf,
    PendingUnlockAmount,
    ReadyUnlockAmount,
    StakedBalanceOf,
    BondedBalanceOf,
    NominationsOf,
}

impl OperationKind {
    pub fn precompile(self) -> Precompile {
        match self {
            OperationKind::Bond
            | OperationKind::Unbond
            | OperationKind::WithdrawUnbonded
            | OperationKind::Nominate
            | OperationKind::BondedBalanceOf
            | OperationKind::NominationsOf => Precompile::Staking,
            OperationKind::Lock
            | OperationKind::UnlockRequest
            | OperationKind::CompleteUnlock
            | OperationKind::BalanceOf
            | OperationKind::PendingUnlockAmount
            | OperationKind::ReadyUnlockAmount
            | OperationKind::StakedBalanceOf => Precompile::PwRoko,
        }
    }

    /// Whether the call is a read-only `eth_call` rather than a transaction.
    pub fn is_read(self) -> bool {
        matches!(
            self,
            OperationKind::BalanceOf
                | OperationKind::PendingUnlockAmount
                | OperationKind::ReadyUnlockAmount
                | OperationKind::StakedBalanceOf
                | OperationKind::BondedBalanceOf
                | OperationKind::NominationsOf
        )
    }

    pub fn result_shape(self) -> ResultShape {
        match self {
            OperationKind::BalanceOf
            | OperationKind::PendingUnlockAmount
            | OperationKind::ReadyUnlockAmount
            | OperationKind::StakedBalanceOf
            | OperationKind::BondedBalanceOf => ResultShape::Amount,
            OperationKind::NominationsOf => ResultShape::Addresses,
            _ => ResultShape::Bool,
        }
    }

    /// Solidity-style name, for logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            OperationKind::Bond => "bond",
            OperationKind::Unbond => "unbond",
            OperationKind::WithdrawUnbonded => "withdrawUnbonded",
            OperationKind::Nominate => "nominate",
            OperationKind::Lock => "lock",
            OperationKind::UnlockRequest => "unlockRequest",
            OperationKind::CompleteUnlock => "completeUnlock",
            OperationKind::BalanceOf => "balanceOf",
            OperationKind::PendingUnlockAmount => "pendingUnlockAmount",
            OperationKind::ReadyUnlockAmount => "readyUnlockAmount",
            OperationKind::StakedBalanceOf => "stakedBalanceOf",
            OperationKind::BondedBalanceOf => "bondedBalanceOf",
            OperationKind::NominationsOf => "nominationsOf",
        }
    }
}
