//! Write batching: groups every effect of one ledger operation into a single
//! LMDB write transaction.
//!
//! # Usage
//!
//! ```ignore
//! let mut batch = env.write_batch()?;
//! batch.put_balance(&account, 900)?;
//! batch.put_total_supply(900)?;
//! batch.append_event(&record)?;
//! batch.commit()?;
//! ```
//!
//! If the batch is dropped without calling [`WriteBatch::commit`], all
//! operations are rolled back (the underlying LMDB transaction is aborted).

use heed::RwTxn;

use slp_store::StoreError;
use slp_types::{AccountId, EventRecord, TokenMetadata};

use crate::environment::LmdbEnvironment;
use crate::meta::TOKEN_METADATA_KEY;
use crate::token::{OWNER_KEY, TOTAL_SUPPLY_KEY};
use crate::LmdbError;

pub struct WriteBatch<'a> {
    txn: RwTxn<'a>,
    env: &'a LmdbEnvironment,
}

impl<'a> WriteBatch<'a> {
    pub(crate) fn new(env: &'a LmdbEnvironment) -> Result<Self, StoreError> {
        let txn = env.env.write_txn().map_err(LmdbError::from)?;
        Ok(Self { txn, env })
    }

    // ── Token state ─────────────────────────────────────────────────────

    /// Whether token metadata is already present (as seen by this batch).
    pub fn has_metadata(&self) -> Result<bool, StoreError> {
        Ok(self
            .env
            .meta_db
            .get(&self.txn, TOKEN_METADATA_KEY)
            .map_err(LmdbError::from)?
            .is_some())
    }

    pub fn put_metadata(&mut self, metadata: &TokenMetadata) -> Result<(), StoreError> {
        let bytes = bincode::serialize(metadata).map_err(LmdbError::from)?;
        self.env
            .meta_db
            .put(&mut self.txn, TOKEN_METADATA_KEY, &bytes)
            .map_err(LmdbError::from)?;
        Ok(())
    }

    /// Set an account's balance. Zero removes the entry.
    pub fn put_balance(&mut self, account: &AccountId, balance: u128) -> Result<(), StoreError> {
        if balance == 0 {
            self.env
                .balances_db
                .delete(&mut self.txn, account.as_bytes())
                .map_err(LmdbError::from)?;
        } else {
            self.env
                .balances_db
                .put(&mut self.txn, account.as_bytes(), &balance.to_le_bytes())
                .map_err(LmdbError::from)?;
        }
        Ok(())
    }

    pub fn put_total_supply(&mut self, supply: u128) -> Result<(), StoreError> {
        self.env
            .state_db
            .put(&mut self.txn, TOTAL_SUPPLY_KEY, &supply.to_le_bytes())
            .map_err(LmdbError::from)?;
        Ok(())
    }

    /// Set the owner; `None` deletes the entry.
    pub fn put_owner(&mut self, owner: Option<&AccountId>) -> Result<(), StoreError> {
        match owner {
            Some(account) => {
                self.env
                    .state_db
                    .put(&mut self.txn, OWNER_KEY, account.as_bytes())
                    .map_err(LmdbError::from)?;
            }
            None => {
                self.env
                    .state_db
                    .delete(&mut self.txn, OWNER_KEY)
                    .map_err(LmdbError::from)?;
            }
        }
        Ok(())
    }

    // ── Event log ───────────────────────────────────────────────────────

    /// Number of records in the log as seen by this batch.
    pub fn event_count(&self) -> Result<u64, StoreError> {
        Ok(self.env.events_db.len(&self.txn).map_err(LmdbError::from)?)
    }

    /// Append a record. Its sequence number must equal the current log length.
    pub fn append_event(&mut self, record: &EventRecord) -> Result<(), StoreError> {
        let expected = self.event_count()?;
        if record.seq != expected {
            return Err(StoreError::Conflict {
                expected,
                found: record.seq,
            });
        }
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        self.env
            .events_db
            .put(&mut self.txn, &record.seq, &bytes)
            .map_err(LmdbError::from)?;
        Ok(())
    }

    /// Commit every operation in the batch.
    pub fn commit(self) -> Result<(), StoreError> {
        self.txn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
