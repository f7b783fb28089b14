//! Abstract storage traits for the SmartSLP token ledger.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The ledger depends only on the traits.

pub mod batch;
pub mod error;
pub mod event;
pub mod meta;
pub mod token;

pub use batch::{CommitBatch, StoredLedger};
pub use error::StoreError;
pub use event::EventStore;
pub use meta::MetaStore;
pub use token::TokenStore;

use slp_types::TokenMetadata;

/// Current on-disk schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// A complete ledger backend: token state plus event log, committed together.
///
/// Implementations must apply each [`CommitBatch`] atomically: either every
/// balance write, the supply, the owner and every event record become
/// visible, or none of them do.
pub trait LedgerStore: TokenStore + EventStore + Send + Sync {
    /// Write the token metadata and the construction batch in one step.
    ///
    /// Fails with [`StoreError::AlreadyInitialized`] if a token is already stored.
    fn initialize(&self, metadata: &TokenMetadata, batch: &CommitBatch) -> Result<(), StoreError>;

    /// Atomically apply one operation's effects.
    fn commit(&self, batch: &CommitBatch) -> Result<(), StoreError>;

    /// Read back everything needed to rebuild a ledger, or `None` if no token
    /// has been initialized.
    fn load(&self) -> Result<Option<StoredLedger>, StoreError> {
        let Some(metadata) = self.get_metadata()? else {
            return Ok(None);
        };
        let count = self.event_count()?;
        Ok(Some(StoredLedger {
            metadata,
            total_supply: self.get_total_supply()?,
            owner: self.get_owner()?,
            balances: self.iter_balances()?,
            events: self.iter_events(0, count as usize)?,
        }))
    }
}
