//! The serialized, persistent token service.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use slp_store::{CommitBatch, LedgerStore, StoreError};
use slp_types::{AccountId, Clock, DocumentHash, EventRecord, TokenMetadata};

use crate::access::AccessControl;
use crate::error::{LedgerError, TokenError};
use crate::event_log::EventLog;
use crate::state::LedgerState;
use crate::token::Token;
use crate::transition::Transition;

/// A consistent read-only view of the token, taken under one lock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSnapshot {
    pub metadata: TokenMetadata,
    pub total_supply: u128,
    pub owner: Option<AccountId>,
    pub holder_count: usize,
    pub event_count: u64,
}

struct Inner {
    token: Token,
    log: EventLog,
}

/// A token behind a single-writer critical section, backed by a store.
///
/// Every mutating call holds the write lock for plan → persist → apply, so
/// callers never observe a half-applied operation and operations are totally
/// ordered. A call either commits its state change and its event records
/// (in memory and in the store) or changes nothing.
pub struct TokenLedger {
    inner: RwLock<Inner>,
    store: Arc<dyn LedgerStore>,
    clock: Arc<dyn Clock>,
}

impl TokenLedger {
    /// Construct a new token and persist it.
    ///
    /// Fails with [`LedgerError::AlreadyDeployed`] if the store already holds one.
    pub fn deploy(
        store: Arc<dyn LedgerStore>,
        clock: Arc<dyn Clock>,
        metadata: TokenMetadata,
        initial_qty: u128,
        deployer: AccountId,
    ) -> Result<Self, LedgerError> {
        let (token, transition) = Token::construct(metadata.clone(), initial_qty, deployer)?;
        let mut log = EventLog::new();
        let records = log.stage(transition.operation, &transition.events, clock.now());
        let batch = commit_batch(&transition, &records);

        store.initialize(&metadata, &batch).map_err(|e| match e {
            StoreError::AlreadyInitialized => LedgerError::AlreadyDeployed,
            other => LedgerError::Store(other),
        })?;
        log.append(&records);

        tracing::info!(
            token = %metadata.name,
            symbol = %metadata.symbol,
            decimals = metadata.decimals,
            initial_qty,
            deployer = %deployer,
            "token deployed"
        );

        Ok(Self {
            inner: RwLock::new(Inner { token, log }),
            store,
            clock,
        })
    }

    /// Load the token previously deployed in `store`.
    ///
    /// The stored state is checked before use: the supply must equal the sum of
    /// balances and the event log must be dense.
    pub fn open(store: Arc<dyn LedgerStore>, clock: Arc<dyn Clock>) -> Result<Self, LedgerError> {
        let stored = store.load()?.ok_or(LedgerError::NotDeployed)?;

        let state = LedgerState::restore(stored.metadata, stored.total_supply, stored.balances);
        if !state.supply_matches_balances() {
            return Err(LedgerError::Corrupt(format!(
                "total supply {} does not match the sum of balances",
                state.total_supply()
            )));
        }
        let log = EventLog::from_records(stored.events)
            .ok_or_else(|| LedgerError::Corrupt("event log has sequence gaps".to_string()))?;
        let token = Token::restore(state, AccessControl::restore(stored.owner));

        tracing::info!(
            symbol = %token.state().symbol(),
            total_supply = token.total_supply(),
            events = log.len(),
            "token ledger opened"
        );

        Ok(Self {
            inner: RwLock::new(Inner { token, log }),
            store,
            clock,
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Read accessors ──────────────────────────────────────────────────

    pub fn name(&self) -> String {
        self.read().token.state().name().to_string()
    }

    pub fn symbol(&self) -> String {
        self.read().token.state().symbol().to_string()
    }

    pub fn decimals(&self) -> u8 {
        self.read().token.state().decimals()
    }

    pub fn document_uri(&self) -> String {
        self.read().token.state().document_uri().to_string()
    }

    pub fn document_hash(&self) -> DocumentHash {
        self.read().token.state().document_hash()
    }

    pub fn total_supply(&self) -> u128 {
        self.read().token.total_supply()
    }

    /// Current owner; `None` once renounced.
    pub fn owner(&self) -> Option<AccountId> {
        self.read().token.owner()
    }

    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.read().token.balance_of(account)
    }

    pub fn metadata(&self) -> TokenMetadata {
        self.read().token.state().metadata().clone()
    }

    pub fn snapshot(&self) -> TokenSnapshot {
        let inner = self.read();
        let state = inner.token.state();
        TokenSnapshot {
            metadata: state.metadata().clone(),
            total_supply: state.total_supply(),
            owner: inner.token.owner(),
            holder_count: state.holder_count(),
            event_count: inner.log.next_seq(),
        }
    }

    /// Every non-zero balance, in no particular order.
    pub fn holders(&self) -> Vec<(AccountId, u128)> {
        self.read()
            .token
            .state()
            .holders()
            .map(|(a, b)| (*a, *b))
            .collect()
    }

    /// A copy of the whole token, for callers that need several reads at once.
    pub fn token(&self) -> Token {
        self.read().token.clone()
    }

    // ── Event log ───────────────────────────────────────────────────────

    pub fn event_count(&self) -> u64 {
        self.read().log.next_seq()
    }

    /// Records with `seq >= since`.
    pub fn events_since(&self, since: u64) -> Vec<EventRecord> {
        self.read().log.since(since).to_vec()
    }

    /// Records whose event involves `account`.
    pub fn events_for(&self, account: &AccountId) -> Vec<EventRecord> {
        self.read().log.for_account(account).cloned().collect()
    }

    // ── Operations ──────────────────────────────────────────────────────

    /// Mint `amount` smallest units to `recipient`. Owner only.
    pub fn mint(
        &self,
        caller: &AccountId,
        recipient: &AccountId,
        amount: u128,
    ) -> Result<Vec<EventRecord>, LedgerError> {
        self.execute(|token| token.plan_mint(caller, recipient, amount))
    }

    /// Burn `amount` smallest units from the caller's own balance.
    pub fn burn(&self, caller: &AccountId, amount: u128) -> Result<Vec<EventRecord>, LedgerError> {
        self.execute(|token| token.plan_burn(caller, amount))
    }

    pub fn transfer_ownership(
        &self,
        caller: &AccountId,
        new_owner: &AccountId,
    ) -> Result<Vec<EventRecord>, LedgerError> {
        self.execute(|token| token.plan_transfer_ownership(caller, new_owner))
    }

    /// Permanently give up ownership. Nobody can mint afterwards.
    pub fn renounce_ownership(&self, caller: &AccountId) -> Result<Vec<EventRecord>, LedgerError> {
        self.execute(|token| token.plan_renounce_ownership(caller))
    }

    fn execute<F>(&self, plan: F) -> Result<Vec<EventRecord>, LedgerError>
    where
        F: FnOnce(&Token) -> Result<Transition, TokenError>,
    {
        let mut inner = self.write();

        let transition = match plan(&inner.token) {
            Ok(t) => t,
            Err(e) => {
                tracing::debug!(error = %e, "token operation rejected");
                return Err(e.into());
            }
        };

        let records = inner
            .log
            .stage(transition.operation, &transition.events, self.clock.now());
        let batch = commit_batch(&transition, &records);
        if let Err(e) = self.store.commit(&batch) {
            tracing::warn!(
                operation = %transition.operation,
                error = %e,
                "failed to persist token operation"
            );
            return Err(e.into());
        }

        inner.token.apply(&transition);
        inner.log.append(&records);

        tracing::info!(
            operation = %transition.operation,
            first_seq = records.first().map(|r| r.seq),
            events = records.len(),
            total_supply = transition.total_supply,
            "token operation committed"
        );
        Ok(records)
    }
}

fn commit_batch(transition: &Transition, records: &[EventRecord]) -> CommitBatch {
    CommitBatch {
        balances: transition.balances.clone(),
        total_supply: transition.total_supply,
        owner: transition.owner,
        events: records.to_vec(),
    }
}
