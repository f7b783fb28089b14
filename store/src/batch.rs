//! Units of atomic persistence.

use serde::{Deserialize, Serialize};
use slp_types::{AccountId, EventRecord, TokenMetadata};

/// The persisted effects of one successful operation.
///
/// Balances carry their new absolute values; a zero balance removes the
/// account's entry. The supply and owner are always written in full.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitBatch {
    pub balances: Vec<(AccountId, u128)>,
    pub total_supply: u128,
    pub owner: Option<AccountId>,
    pub events: Vec<EventRecord>,
}

impl CommitBatch {
    /// Sequence number of the first record, if the batch carries any.
    pub fn first_seq(&self) -> Option<u64> {
        self.events.first().map(|r| r.seq)
    }

    /// Whether the batch's records directly follow a log of `count` records
    /// with dense sequence numbers.
    pub fn follows(&self, count: u64) -> bool {
        self.events
            .iter()
            .enumerate()
            .all(|(i, r)| r.seq == count + i as u64)
    }
}

/// Everything a backend returns to rebuild a ledger on open.
#[derive(Clone, Debug)]
pub struct StoredLedger {
    pub metadata: TokenMetadata,
    pub total_supply: u128,
    pub owner: Option<AccountId>,
    pub balances: Vec<(AccountId, u128)>,
    pub events: Vec<EventRecord>,
}
