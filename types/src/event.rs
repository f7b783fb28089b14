//! Events emitted by successful token operations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{AccountId, Timestamp};

/// A state change observable by external callers.
///
/// `None` in an identity position stands for the null identity: the source
/// of minted supply, the sink of burned supply, or a renounced owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenEvent {
    /// Balance moved between identities (mint when `from` is `None`, burn
    /// when `to` is `None`).
    Transfer {
        from: Option<AccountId>,
        to: Option<AccountId>,
        value: u128,
    },
    /// Ownership changed hands (`new` is `None` after renunciation).
    OwnershipTransferred {
        previous: Option<AccountId>,
        new: Option<AccountId>,
    },
}

impl TokenEvent {
    /// Event name as observers know it.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenEvent::Transfer { .. } => "Transfer",
            TokenEvent::OwnershipTransferred { .. } => "OwnershipTransferred",
        }
    }

    /// Whether `account` appears in this event.
    pub fn involves(&self, account: &AccountId) -> bool {
        let (a, b) = match self {
            TokenEvent::Transfer { from, to, .. } => (from, to),
            TokenEvent::OwnershipTransferred { previous, new } => (previous, new),
        };
        a.as_ref() == Some(account) || b.as_ref() == Some(account)
    }
}

impl fmt::Display for TokenEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenEvent::Transfer { from, to, value } => write!(
                f,
                "Transfer(from={}, to={}, value={})",
                AccountId::display_opt(from.as_ref()),
                AccountId::display_opt(to.as_ref()),
                value
            ),
            TokenEvent::OwnershipTransferred { previous, new } => write!(
                f,
                "OwnershipTransferred(previous={}, new={})",
                AccountId::display_opt(previous.as_ref()),
                AccountId::display_opt(new.as_ref())
            ),
        }
    }
}

/// The successful operation that produced a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Construct,
    Mint,
    Burn,
    TransferOwnership,
    RenounceOwnership,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Construct => "construct",
            Operation::Mint => "mint",
            Operation::Burn => "burn",
            Operation::TransferOwnership => "transfer_ownership",
            Operation::RenounceOwnership => "renounce_ownership",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the append-only event log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Dense zero-based position in the log.
    pub seq: u64,
    pub operation: Operation,
    pub event: TokenEvent,
    pub recorded_at: Timestamp,
}
