//! LMDB implementation of LedgerStore.

use slp_store::{CommitBatch, LedgerStore, StoreError, StoredLedger};
use slp_types::TokenMetadata;

use crate::write_batch::WriteBatch;
use crate::{LmdbEnvironment, LmdbError};

fn stage(batch: &mut WriteBatch<'_>, commit: &CommitBatch) -> Result<(), StoreError> {
    for (account, balance) in &commit.balances {
        batch.put_balance(account, *balance)?;
    }
    batch.put_total_supply(commit.total_supply)?;
    batch.put_owner(commit.owner.as_ref())?;
    for record in &commit.events {
        batch.append_event(record)?;
    }
    Ok(())
}

impl LedgerStore for LmdbEnvironment {
    fn initialize(&self, metadata: &TokenMetadata, commit: &CommitBatch) -> Result<(), StoreError> {
        let mut batch = self.write_batch()?;
        if batch.has_metadata()? {
            return Err(StoreError::AlreadyInitialized);
        }
        batch.put_metadata(metadata)?;
        stage(&mut batch, commit)?;
        batch.commit()
    }

    fn commit(&self, commit: &CommitBatch) -> Result<(), StoreError> {
        let mut batch = self.write_batch()?;
        if !batch.has_metadata()? {
            return Err(StoreError::NotFound("token metadata".to_string()));
        }
        stage(&mut batch, commit)?;
        batch.commit()?;
        tracing::debug!(
            events = commit.events.len(),
            balances = commit.balances.len(),
            "committed ledger batch"
        );
        Ok(())
    }

    /// Reads everything in one read transaction, so a concurrent commit is
    /// either wholly visible or not at all.
    fn load(&self) -> Result<Option<StoredLedger>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let Some(metadata) = self.read_metadata(&rtxn)? else {
            return Ok(None);
        };
        Ok(Some(StoredLedger {
            metadata,
            total_supply: self.read_total_supply(&rtxn)?,
            owner: self.read_owner(&rtxn)?,
            balances: self.read_balances(&rtxn)?,
            events: self.read_events(&rtxn, 0, usize::MAX)?,
        }))
    }
}
