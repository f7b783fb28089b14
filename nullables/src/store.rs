//! Nullable store: thread-safe in-memory ledger storage for testing.

use slp_store::{CommitBatch, EventStore, LedgerStore, MetaStore, StoreError, TokenStore};
use slp_types::{AccountId, EventRecord, TokenMetadata};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct Inner {
    metadata: Option<TokenMetadata>,
    total_supply: u128,
    owner: Option<AccountId>,
    balances: HashMap<AccountId, u128>,
    events: Vec<EventRecord>,
}

/// An in-memory [`LedgerStore`] for testing.
///
/// Commits apply under one lock, so they are atomic like the LMDB backend.
/// [`NullStore::fail_commits`] makes every later write fail without touching
/// the stored state, to exercise the ledger's rollback path.
pub struct NullStore {
    inner: Mutex<Inner>,
    fail_commits: AtomicBool,
    schema_version: AtomicU32,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            fail_commits: AtomicBool::new(false),
            schema_version: AtomicU32::new(0),
        }
    }

    /// Make subsequent `initialize`/`commit` calls fail (or succeed again).
    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected commit failure".to_string()));
        }
        Ok(())
    }

    fn apply(inner: &mut Inner, batch: &CommitBatch) -> Result<(), StoreError> {
        if !batch.follows(inner.events.len() as u64) {
            let expected = inner.events.len() as u64;
            return Err(StoreError::Conflict {
                expected,
                found: batch.first_seq().unwrap_or(expected),
            });
        }
        for (account, balance) in &batch.balances {
            if *balance == 0 {
                inner.balances.remove(account);
            } else {
                inner.balances.insert(*account, *balance);
            }
        }
        inner.total_supply = batch.total_supply;
        inner.owner = batch.owner;
        inner.events.extend(batch.events.iter().cloned());
        Ok(())
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MetaStore for NullStore {
    fn get_schema_version(&self) -> Result<u32, StoreError> {
        Ok(self.schema_version.load(Ordering::SeqCst))
    }

    fn set_schema_version(&self, version: u32) -> Result<(), StoreError> {
        self.schema_version.store(version, Ordering::SeqCst);
        Ok(())
    }
}

impl TokenStore for NullStore {
    fn get_metadata(&self) -> Result<Option<TokenMetadata>, StoreError> {
        Ok(self.inner.lock().unwrap().metadata.clone())
    }

    fn get_total_supply(&self) -> Result<u128, StoreError> {
        Ok(self.inner.lock().unwrap().total_supply)
    }

    fn get_owner(&self) -> Result<Option<AccountId>, StoreError> {
        Ok(self.inner.lock().unwrap().owner)
    }

    fn get_balance(&self, account: &AccountId) -> Result<u128, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .balances
            .get(account)
            .copied()
            .unwrap_or(0))
    }

    fn iter_balances(&self) -> Result<Vec<(AccountId, u128)>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .balances
            .iter()
            .map(|(a, b)| (*a, *b))
            .collect())
    }
}

impl EventStore for NullStore {
    fn get_event(&self, seq: u64) -> Result<EventRecord, StoreError> {
        self.inner
            .lock()
            .unwrap()
            .events
            .get(seq as usize)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("event {}", seq)))
    }

    fn event_count(&self) -> Result<u64, StoreError> {
        Ok(self.inner.lock().unwrap().events.len() as u64)
    }

    fn iter_events(&self, since: u64, limit: usize) -> Result<Vec<EventRecord>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .events
            .iter()
            .skip(since as usize)
            .take(limit)
            .cloned()
            .collect())
    }
}

impl LedgerStore for NullStore {
    fn initialize(&self, metadata: &TokenMetadata, batch: &CommitBatch) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut inner = self.inner.lock().unwrap();
        if inner.metadata.is_some() {
            return Err(StoreError::AlreadyInitialized);
        }
        let mut staged = Inner::default();
        Self::apply(&mut staged, batch)?;
        staged.metadata = Some(metadata.clone());
        *inner = staged;
        Ok(())
    }

    fn commit(&self, batch: &CommitBatch) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut inner = self.inner.lock().unwrap();
        if inner.metadata.is_none() {
            return Err(StoreError::NotFound("token metadata".to_string()));
        }
        Self::apply(&mut inner, batch)
    }
}
