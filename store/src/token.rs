//! Token state storage trait.

use crate::StoreError;
use slp_types::{AccountId, TokenMetadata};

/// Read access to the persisted token state.
///
/// Writes go exclusively through [`crate::LedgerStore`] so they stay atomic.
pub trait TokenStore {
    /// Token metadata, or `None` before initialization.
    fn get_metadata(&self) -> Result<Option<TokenMetadata>, StoreError>;

    fn get_total_supply(&self) -> Result<u128, StoreError>;

    /// Current owner; `None` once ownership is renounced (or before initialization).
    fn get_owner(&self) -> Result<Option<AccountId>, StoreError>;

    /// Balance of `account`; absent accounts read as zero.
    fn get_balance(&self, account: &AccountId) -> Result<u128, StoreError>;

    /// Every stored (non-zero) balance, in no particular order.
    fn iter_balances(&self) -> Result<Vec<(AccountId, u128)>, StoreError>;

    /// Number of accounts holding a non-zero balance.
    fn holder_count(&self) -> Result<u64, StoreError> {
        self.iter_balances().map(|v| v.len() as u64)
    }
}
