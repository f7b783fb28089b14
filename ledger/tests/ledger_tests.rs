//! End-to-end tests for the token ledger:
//! deploy → operations → event log → persistence → reopen.

use std::sync::Arc;
use std::thread;

use slp_ledger::{LedgerError, TokenError, TokenLedger};
use slp_nullables::{NullClock, NullStore};
use slp_store::{EventStore, LedgerStore, StoreError, TokenStore};
use slp_store_lmdb::LmdbEnvironment;
use slp_types::{AccountId, DocumentHash, Operation, TokenEvent, TokenMetadata};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn account(byte: u8) -> AccountId {
    AccountId::new([byte; 20])
}

fn deployer() -> AccountId {
    account(0xa0)
}

fn account_b() -> AccountId {
    account(0xb0)
}

fn account_c() -> AccountId {
    account(0xc0)
}

fn test_metadata() -> TokenMetadata {
    TokenMetadata::new("test token", "tt", "http://example.com", DocumentHash::ZERO, 18)
}

fn deploy_null() -> (Arc<NullStore>, Arc<NullClock>, TokenLedger) {
    let store = Arc::new(NullStore::new());
    let clock = Arc::new(NullClock::new(1_700_000_000));
    let ledger = TokenLedger::deploy(
        store.clone(),
        clock.clone(),
        test_metadata(),
        1000,
        deployer(),
    )
    .expect("deploy");
    (store, clock, ledger)
}

fn temp_env(dir: &tempfile::TempDir) -> Arc<LmdbEnvironment> {
    Arc::new(LmdbEnvironment::open(dir.path(), 16 * 1024 * 1024).expect("open env"))
}

fn events_of(records: &[slp_types::EventRecord]) -> Vec<TokenEvent> {
    records.iter().map(|r| r.event).collect()
}

// ---------------------------------------------------------------------------
// 1. Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn construction_sets_metadata_supply_and_owner() {
    let (_, _, ledger) = deploy_null();
    assert_eq!(ledger.name(), "test token");
    assert_eq!(ledger.symbol(), "tt");
    assert_eq!(ledger.document_uri(), "http://example.com");
    assert!(ledger.document_hash().is_zero());
    assert_eq!(ledger.decimals(), 18);
    assert_eq!(ledger.total_supply(), 1000);
    assert_eq!(ledger.balance_of(&deployer()), 1000);
    assert_eq!(ledger.owner(), Some(deployer()));
}

#[test]
fn owner_mints_to_other_account() {
    let (_, _, ledger) = deploy_null();
    let records = ledger.mint(&deployer(), &account_b(), 100).unwrap();
    assert_eq!(ledger.total_supply(), 1100);
    assert_eq!(ledger.balance_of(&account_b()), 100);
    assert_eq!(
        events_of(&records),
        vec![TokenEvent::Transfer {
            from: None,
            to: Some(account_b()),
            value: 100
        }]
    );
}

#[test]
fn non_owner_mint_is_rejected() {
    let (_, _, ledger) = deploy_null();
    let err = ledger.mint(&account_c(), &account_b(), 100).unwrap_err();
    assert_eq!(
        err.as_token_error(),
        Some(&TokenError::Unauthorized { caller: account_c() })
    );
    assert_eq!(ledger.total_supply(), 1000);
    assert_eq!(ledger.balance_of(&account_b()), 0);
    assert_eq!(ledger.event_count(), 2);
}

#[test]
fn holder_burns_own_balance() {
    let (_, _, ledger) = deploy_null();
    let records = ledger.burn(&deployer(), 100).unwrap();
    assert_eq!(ledger.total_supply(), 900);
    assert_eq!(ledger.balance_of(&deployer()), 900);
    assert_eq!(
        events_of(&records),
        vec![TokenEvent::Transfer {
            from: Some(deployer()),
            to: None,
            value: 100
        }]
    );
}

#[test]
fn burn_beyond_balance_is_rejected() {
    let (_, _, ledger) = deploy_null();
    let err = ledger.burn(&deployer(), 1100).unwrap_err();
    assert!(matches!(
        err.as_token_error(),
        Some(TokenError::InsufficientBalance {
            needed: 1100,
            available: 1000
        })
    ));
    assert_eq!(ledger.total_supply(), 1000);
    assert_eq!(ledger.balance_of(&deployer()), 1000);
}

#[test]
fn ownership_transfer_moves_mint_privilege() {
    let (_, _, ledger) = deploy_null();
    ledger.transfer_ownership(&deployer(), &account_c()).unwrap();
    assert_eq!(ledger.owner(), Some(account_c()));

    assert!(ledger.mint(&deployer(), &account_b(), 1).is_err());
    ledger.mint(&account_c(), &account_b(), 1).unwrap();
    assert_eq!(ledger.balance_of(&account_b()), 1);
}

#[test]
fn renounced_ownership_cannot_be_transferred() {
    let (_, _, ledger) = deploy_null();
    let records = ledger.renounce_ownership(&deployer()).unwrap();
    assert_eq!(
        events_of(&records),
        vec![TokenEvent::OwnershipTransferred {
            previous: Some(deployer()),
            new: None
        }]
    );
    assert_eq!(ledger.owner(), None);

    let err = ledger
        .transfer_ownership(&deployer(), &account_c())
        .unwrap_err();
    assert!(matches!(
        err.as_token_error(),
        Some(TokenError::Unauthorized { .. })
    ));
    assert_eq!(ledger.owner(), None);
}

// ---------------------------------------------------------------------------
// 2. Event log
// ---------------------------------------------------------------------------

#[test]
fn event_log_orders_every_successful_operation() {
    let (_, clock, ledger) = deploy_null();
    clock.advance(10);
    ledger.mint(&deployer(), &account_b(), 5).unwrap();
    let _ = ledger.burn(&account_c(), 1);
    clock.advance(10);
    ledger.burn(&account_b(), 2).unwrap();
    ledger.transfer_ownership(&deployer(), &account_c()).unwrap();

    let log = ledger.events_since(0);
    let ops: Vec<Operation> = log.iter().map(|r| r.operation).collect();
    assert_eq!(
        ops,
        vec![
            Operation::Construct,
            Operation::Construct,
            Operation::Mint,
            Operation::Burn,
            Operation::TransferOwnership,
        ]
    );
    for (i, record) in log.iter().enumerate() {
        assert_eq!(record.seq, i as u64);
    }
    assert_eq!(log[2].recorded_at.as_secs(), 1_700_000_010);
    assert_eq!(log[3].recorded_at.as_secs(), 1_700_000_020);

    assert_eq!(ledger.events_since(3).len(), 2);
    assert_eq!(ledger.events_for(&account_b()).len(), 2);
    assert_eq!(ledger.events_for(&account_c()).len(), 1);
}

#[test]
fn store_log_matches_memory_log() {
    let (store, _, ledger) = deploy_null();
    ledger.mint(&deployer(), &account_b(), 5).unwrap();
    ledger.renounce_ownership(&deployer()).unwrap();

    let stored = store.iter_events(0, usize::MAX).unwrap();
    assert_eq!(stored, ledger.events_since(0));
    assert_eq!(store.get_total_supply().unwrap(), 1005);
    assert_eq!(store.get_owner().unwrap(), None);
    assert_eq!(store.get_balance(&account_b()).unwrap(), 5);
}

// ---------------------------------------------------------------------------
// 3. Atomicity
// ---------------------------------------------------------------------------

#[test]
fn failed_commit_changes_nothing() {
    let (store, _, ledger) = deploy_null();
    let before = ledger.snapshot();
    store.fail_commits(true);

    assert!(matches!(
        ledger.mint(&deployer(), &account_b(), 100),
        Err(LedgerError::Store(_))
    ));
    assert!(matches!(
        ledger.renounce_ownership(&deployer()),
        Err(LedgerError::Store(_))
    ));

    assert_eq!(ledger.snapshot(), before);
    assert_eq!(ledger.owner(), Some(deployer()));
    assert_eq!(store.event_count().unwrap(), 2);
    assert_eq!(store.get_total_supply().unwrap(), 1000);
}

#[test]
fn open_rejects_inconsistent_supply() {
    let (store, _, ledger) = deploy_null();
    drop(ledger);
    // A commit that bumps supply without crediting anyone.
    let events = store.iter_events(0, usize::MAX).unwrap();
    let mut record = events[1].clone();
    record.seq = 2;
    store
        .commit(&slp_store::CommitBatch {
            balances: Vec::new(),
            total_supply: 2000,
            owner: Some(deployer()),
            events: vec![record],
        })
        .unwrap();

    let err = TokenLedger::open(store, Arc::new(NullClock::default()))
        .err()
        .unwrap();
    assert!(matches!(err, LedgerError::Corrupt(_)));
}

// ---------------------------------------------------------------------------
// 4. Concurrency
// ---------------------------------------------------------------------------

#[test]
fn concurrent_mints_are_serialized() {
    let (store, _, ledger) = deploy_null();
    let ledger = Arc::new(ledger);

    let handles: Vec<_> = (1..=8u8)
        .map(|i| {
            let ledger = ledger.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    ledger.mint(&deployer(), &account(i), 1).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(ledger.total_supply(), 1000 + 8 * 25);
    for i in 1..=8u8 {
        assert_eq!(ledger.balance_of(&account(i)), 25);
    }
    let log = ledger.events_since(0);
    assert_eq!(log.len(), 2 + 8 * 25);
    assert!(log.iter().enumerate().all(|(i, r)| r.seq == i as u64));
    assert_eq!(store.event_count().unwrap(), log.len() as u64);
}

#[test]
fn concurrent_burns_never_overdraw() {
    let (_, _, ledger) = deploy_null();
    let ledger = Arc::new(ledger);

    // 10 threads each try to burn 150 of the deployer's 1000.
    let handles: Vec<_> = (0..10)
        .map(|_| {
            let ledger = ledger.clone();
            thread::spawn(move || ledger.burn(&deployer(), 150).is_ok())
        })
        .collect();
    let succeeded = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(succeeded, 6);
    assert_eq!(ledger.balance_of(&deployer()), 100);
    assert_eq!(ledger.total_supply(), 100);
}

// ---------------------------------------------------------------------------
// 5. LMDB persistence
// ---------------------------------------------------------------------------

#[test]
fn lmdb_ledger_survives_reopen() {
    let dir = tempfile::tempdir().expect("temp dir");
    {
        let ledger = TokenLedger::deploy(
            temp_env(&dir),
            Arc::new(NullClock::new(42)),
            test_metadata(),
            1000,
            deployer(),
        )
        .unwrap();
        ledger.mint(&deployer(), &account_b(), 250).unwrap();
        ledger.burn(&deployer(), 1000).unwrap();
        ledger.transfer_ownership(&deployer(), &account_c()).unwrap();
    }

    let ledger = TokenLedger::open(temp_env(&dir), Arc::new(NullClock::new(43))).unwrap();
    assert_eq!(ledger.metadata(), test_metadata());
    assert_eq!(ledger.total_supply(), 250);
    assert_eq!(ledger.balance_of(&deployer()), 0);
    assert_eq!(ledger.balance_of(&account_b()), 250);
    assert_eq!(ledger.owner(), Some(account_c()));
    assert_eq!(ledger.holders(), vec![(account_b(), 250)]);
    assert_eq!(ledger.event_count(), 5);

    // The reopened ledger keeps numbering where it left off.
    let records = ledger.mint(&account_c(), &account_b(), 1).unwrap();
    assert_eq!(records[0].seq, 5);
    assert_eq!(records[0].recorded_at.as_secs(), 43);
}

#[test]
fn lmdb_renounced_owner_survives_reopen() {
    let dir = tempfile::tempdir().expect("temp dir");
    {
        let ledger = TokenLedger::deploy(
            temp_env(&dir),
            Arc::new(NullClock::default()),
            test_metadata(),
            10,
            deployer(),
        )
        .unwrap();
        ledger.renounce_ownership(&deployer()).unwrap();
    }

    let ledger = TokenLedger::open(temp_env(&dir), Arc::new(NullClock::default())).unwrap();
    assert_eq!(ledger.owner(), None);
    assert!(ledger.mint(&deployer(), &deployer(), 1).is_err());
}

#[test]
fn lmdb_deploy_twice_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let env = temp_env(&dir);
    let _first = TokenLedger::deploy(
        env.clone(),
        Arc::new(NullClock::default()),
        test_metadata(),
        10,
        deployer(),
    )
    .unwrap();
    let err = TokenLedger::deploy(
        env,
        Arc::new(NullClock::default()),
        test_metadata(),
        10,
        account_b(),
    )
    .err()
    .unwrap();
    assert!(matches!(err, LedgerError::AlreadyDeployed));
}

#[test]
fn lmdb_open_without_deploy_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = TokenLedger::open(temp_env(&dir), Arc::new(NullClock::default()))
        .err()
        .unwrap();
    assert!(matches!(err, LedgerError::NotDeployed));
}

#[test]
fn stale_ledger_commit_is_a_conflict() {
    let dir = tempfile::tempdir().expect("temp dir");
    let env = temp_env(&dir);
    let stale = TokenLedger::deploy(
        env.clone(),
        Arc::new(NullClock::default()),
        test_metadata(),
        1000,
        deployer(),
    )
    .unwrap();
    let fresh = TokenLedger::open(env.clone(), Arc::new(NullClock::default())).unwrap();
    fresh
        .transfer_ownership(&deployer(), &account_c())
        .unwrap();

    let err = stale.mint(&deployer(), &account_b(), 1).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Store(StoreError::Conflict {
            expected: 3,
            found: 2
        })
    ));

    // Neither the store nor the stale view took the mint.
    assert_eq!(env.get_owner().unwrap(), Some(account_c()));
    assert_eq!(env.get_total_supply().unwrap(), 1000);
    assert_eq!(env.get_balance(&account_b()).unwrap(), 0);
    assert_eq!(env.event_count().unwrap(), 3);
    assert_eq!(stale.total_supply(), 1000);
    assert_eq!(stale.owner(), Some(deployer()));
    assert_eq!(stale.event_count(), 2);
}
