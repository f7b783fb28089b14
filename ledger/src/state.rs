//! Token metadata, balances and supply.

use slp_types::{AccountId, DocumentHash, TokenMetadata};
use std::collections::HashMap;

/// The accounting half of a token.
///
/// Balances are total over all identities: an absent entry reads as zero, and
/// zero balances are never stored. `total_supply` always equals the sum of
/// all balances; every mutation goes through [`crate::Transition`] values
/// that preserve this.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerState {
    metadata: TokenMetadata,
    total_supply: u128,
    balances: HashMap<AccountId, u128>,
}

impl LedgerState {
    /// An empty ledger for the given metadata.
    pub fn new(metadata: TokenMetadata) -> Self {
        Self {
            metadata,
            total_supply: 0,
            balances: HashMap::new(),
        }
    }

    /// Rebuild from persisted parts. Zero entries are dropped. Callers should
    /// check [`LedgerState::supply_matches_balances`] afterwards.
    pub fn restore(
        metadata: TokenMetadata,
        total_supply: u128,
        balances: impl IntoIterator<Item = (AccountId, u128)>,
    ) -> Self {
        Self {
            metadata,
            total_supply,
            balances: balances.into_iter().filter(|(_, b)| *b > 0).collect(),
        }
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    pub fn document_uri(&self) -> &str {
        &self.metadata.document_uri
    }

    pub fn document_hash(&self) -> DocumentHash {
        self.metadata.document_hash
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Every account with a non-zero balance, in no particular order.
    pub fn holders(&self) -> impl Iterator<Item = (&AccountId, &u128)> {
        self.balances.iter()
    }

    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    /// Whether `total_supply` equals the sum of all balances.
    ///
    /// A sum that overflows `u128` is a mismatch.
    pub fn supply_matches_balances(&self) -> bool {
        self.balances
            .values()
            .try_fold(0u128, |acc, b| acc.checked_add(*b))
            == Some(self.total_supply)
    }

    pub(crate) fn set_balance(&mut self, account: AccountId, balance: u128) {
        if balance == 0 {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, balance);
        }
    }

    pub(crate) fn set_total_supply(&mut self, supply: u128) {
        self.total_supply = supply;
    }
}
