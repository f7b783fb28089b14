//! Subcommand handlers. Each opens the ledger, performs one call, and prints
//! the result; state-changing calls also print the emitted events and the
//! refreshed balances of every account they touched.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use sha2::{Digest, Sha256};
use slp_ledger::TokenLedger;
use slp_store_lmdb::LmdbEnvironment;
use slp_types::{AccountId, DocumentHash, EventRecord, SystemClock, TokenEvent, TokenMetadata};
use slp_utils::{format_units, parse_units};

use crate::config::CliConfig;

/// How amounts are read from and written to the terminal.
#[derive(Clone, Copy, Debug)]
pub struct Units {
    /// Scale by `10^decimals` instead of using smallest units verbatim.
    pub human: bool,
}

impl Units {
    pub fn parse(&self, text: &str, decimals: u8) -> anyhow::Result<u128> {
        if self.human {
            Ok(parse_units(text, decimals)?)
        } else {
            text.trim()
                .parse::<u128>()
                .with_context(|| format!("'{text}' is not a whole number of smallest units"))
        }
    }

    pub fn format(&self, value: u128, decimals: u8) -> String {
        if self.human {
            format_units(value, decimals)
        } else {
            value.to_string()
        }
    }
}

/// Arguments of `slp deploy`.
pub struct DeployArgs {
    pub name: String,
    pub symbol: String,
    pub document_uri: String,
    pub document_hash: Option<String>,
    pub document_file: Option<std::path::PathBuf>,
    pub decimals: u8,
    pub initial_qty: String,
    pub from: AccountId,
}

/// Filters of `slp events`.
pub struct EventsArgs {
    pub since: u64,
    pub limit: Option<usize>,
    pub account: Option<AccountId>,
    pub json: bool,
}

fn open_store(config: &CliConfig) -> anyhow::Result<Arc<LmdbEnvironment>> {
    let env = LmdbEnvironment::open(&config.data_dir, config.map_size()).with_context(|| {
        format!("failed to open ledger store at {}", config.data_dir.display())
    })?;
    Ok(Arc::new(env))
}

fn open_ledger(config: &CliConfig) -> anyhow::Result<TokenLedger> {
    let ledger = TokenLedger::open(open_store(config)?, Arc::new(SystemClock))
        .with_context(|| format!("no usable token in {}", config.data_dir.display()))?;
    Ok(ledger)
}

fn hash_document(path: &Path) -> anyhow::Result<DocumentHash> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read document {}", path.display()))?;
    let digest: [u8; 32] = Sha256::digest(&bytes).into();
    Ok(DocumentHash::new(digest))
}

fn owner_text(owner: Option<AccountId>) -> String {
    match owner {
        Some(owner) => owner.to_string(),
        None => "renounced".to_string(),
    }
}

// ── Handlers ───────────────────────────────────────────────────────────

pub fn deploy(config: &CliConfig, units: Units, args: DeployArgs) -> anyhow::Result<()> {
    let document_hash = match (&args.document_file, &args.document_hash) {
        (Some(_), Some(_)) => bail!("--document-hash and --document-file are mutually exclusive"),
        (Some(path), None) => hash_document(path)?,
        (None, Some(hex)) => DocumentHash::parse_input(hex)?,
        (None, None) => DocumentHash::ZERO,
    };
    let initial_qty = units.parse(&args.initial_qty, args.decimals)?;
    let metadata = TokenMetadata::new(
        args.name,
        args.symbol,
        args.document_uri,
        document_hash,
        args.decimals,
    );

    let ledger = TokenLedger::deploy(
        open_store(config)?,
        Arc::new(SystemClock),
        metadata,
        initial_qty,
        args.from,
    )
    .context("deploy failed")?;

    println!("deployed {} ({})", ledger.name(), ledger.symbol());
    print_records(&ledger.events_since(0), units, ledger.decimals());
    print_balances(&ledger, units, &[args.from]);
    Ok(())
}

pub fn info(config: &CliConfig, units: Units) -> anyhow::Result<()> {
    let ledger = open_ledger(config)?;
    let snap = ledger.snapshot();
    let decimals = snap.metadata.decimals;
    println!("name:          {}", snap.metadata.name);
    println!("symbol:        {}", snap.metadata.symbol);
    println!("decimals:      {}", decimals);
    println!("document uri:  {}", snap.metadata.document_uri);
    if snap.metadata.has_document_hash() {
        println!("document hash: {}", snap.metadata.document_hash);
    } else {
        println!("document hash: none");
    }
    println!("total supply:  {}", units.format(snap.total_supply, decimals));
    println!("owner:         {}", owner_text(snap.owner));
    println!("holders:       {}", snap.holder_count);
    println!("events:        {}", snap.event_count);
    Ok(())
}

pub fn balance(config: &CliConfig, units: Units, account: AccountId) -> anyhow::Result<()> {
    let ledger = open_ledger(config)?;
    println!(
        "{}",
        units.format(ledger.balance_of(&account), ledger.decimals())
    );
    Ok(())
}

pub fn mint(
    config: &CliConfig,
    units: Units,
    from: AccountId,
    to: AccountId,
    amount: &str,
) -> anyhow::Result<()> {
    let ledger = open_ledger(config)?;
    let amount = units.parse(amount, ledger.decimals())?;
    let records = ledger.mint(&from, &to, amount).context("mint failed")?;
    report(&ledger, units, &records);
    Ok(())
}

pub fn burn(config: &CliConfig, units: Units, from: AccountId, amount: &str) -> anyhow::Result<()> {
    let ledger = open_ledger(config)?;
    let amount = units.parse(amount, ledger.decimals())?;
    let records = ledger.burn(&from, amount).context("burn failed")?;
    report(&ledger, units, &records);
    Ok(())
}

pub fn transfer_ownership(
    config: &CliConfig,
    units: Units,
    from: AccountId,
    to: AccountId,
) -> anyhow::Result<()> {
    let ledger = open_ledger(config)?;
    let records = ledger
        .transfer_ownership(&from, &to)
        .context("ownership transfer failed")?;
    report(&ledger, units, &records);
    Ok(())
}

pub fn renounce_ownership(config: &CliConfig, units: Units, from: AccountId) -> anyhow::Result<()> {
    let ledger = open_ledger(config)?;
    let records = ledger
        .renounce_ownership(&from)
        .context("renounce failed")?;
    report(&ledger, units, &records);
    Ok(())
}

pub fn events(config: &CliConfig, units: Units, args: EventsArgs) -> anyhow::Result<()> {
    let ledger = open_ledger(config)?;
    let records = select_events(&ledger, &args);

    if args.json {
        let rows: Vec<serde_json::Value> = records.iter().map(record_json).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_records(&records, units, ledger.decimals());
    }
    Ok(())
}

pub fn holders(config: &CliConfig, units: Units) -> anyhow::Result<()> {
    let ledger = open_ledger(config)?;
    let decimals = ledger.decimals();
    let mut holders = ledger.holders();
    holders.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_bytes().cmp(b.0.as_bytes())));
    for (account, balance) in holders {
        println!("{}  {}", account, units.format(balance, decimals));
    }
    Ok(())
}

// ── Output ─────────────────────────────────────────────────────────────

fn select_events(ledger: &TokenLedger, args: &EventsArgs) -> Vec<EventRecord> {
    let records = match &args.account {
        Some(account) => ledger
            .events_for(account)
            .into_iter()
            .filter(|r| r.seq >= args.since)
            .collect(),
        None => ledger.events_since(args.since),
    };
    match args.limit {
        Some(limit) => records.into_iter().take(limit).collect(),
        None => records,
    }
}

/// Events, then the refreshed state of every account they touched.
fn report(ledger: &TokenLedger, units: Units, records: &[EventRecord]) {
    print_records(records, units, ledger.decimals());
    let mut touched: Vec<AccountId> = Vec::new();
    for record in records {
        for account in event_accounts(&record.event) {
            if !touched.contains(&account) {
                touched.push(account);
            }
        }
    }
    print_balances(ledger, units, &touched);
}

fn event_accounts(event: &TokenEvent) -> Vec<AccountId> {
    match *event {
        TokenEvent::Transfer { from, to, .. } => from.into_iter().chain(to).collect(),
        TokenEvent::OwnershipTransferred { previous, new } => {
            previous.into_iter().chain(new).collect()
        }
    }
}

fn print_records(records: &[EventRecord], units: Units, decimals: u8) {
    for record in records {
        let event = match record.event {
            TokenEvent::Transfer { from, to, value } => format!(
                "Transfer(from={}, to={}, value={})",
                AccountId::display_opt(from.as_ref()),
                AccountId::display_opt(to.as_ref()),
                units.format(value, decimals)
            ),
            other => other.to_string(),
        };
        println!(
            "#{:<6} {:<20} {}  @{}",
            record.seq,
            record.operation.as_str(),
            event,
            record.recorded_at
        );
    }
}

fn print_balances(ledger: &TokenLedger, units: Units, accounts: &[AccountId]) {
    let decimals = ledger.decimals();
    for account in accounts {
        println!(
            "balance {}: {}",
            account,
            units.format(ledger.balance_of(account), decimals)
        );
    }
    println!(
        "total supply: {}",
        units.format(ledger.total_supply(), decimals)
    );
    println!("owner: {}", owner_text(ledger.owner()));
}

fn record_json(record: &EventRecord) -> serde_json::Value {
    let opt = |a: Option<AccountId>| a.map(|a| a.to_string());
    let event = match record.event {
        TokenEvent::Transfer { from, to, value } => serde_json::json!({
            "kind": "Transfer",
            "from": opt(from),
            "to": opt(to),
            "value": value.to_string(),
        }),
        TokenEvent::OwnershipTransferred { previous, new } => serde_json::json!({
            "kind": "OwnershipTransferred",
            "previous": opt(previous),
            "new": opt(new),
        }),
    };
    serde_json::json!({
        "seq": record.seq,
        "operation": record.operation.as_str(),
        "recorded_at": record.recorded_at.as_secs(),
        "event": event,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use slp_types::{Operation, Timestamp};

    #[test]
    fn raw_units_reject_fractions() {
        let units = Units { human: false };
        assert_eq!(units.parse("1000", 18).unwrap(), 1000);
        assert!(units.parse("1.5", 18).is_err());
    }

    #[test]
    fn human_units_scale_by_decimals() {
        let units = Units { human: true };
        assert_eq!(units.parse("1.5", 2).unwrap(), 150);
        assert_eq!(units.format(150, 2), "1.5");
    }

    #[test]
    fn event_accounts_skip_null_side() {
        let a = AccountId::new([1u8; 20]);
        let mint = TokenEvent::Transfer {
            from: None,
            to: Some(a),
            value: 1,
        };
        assert_eq!(event_accounts(&mint), vec![a]);
        let renounce = TokenEvent::OwnershipTransferred {
            previous: Some(a),
            new: None,
        };
        assert_eq!(event_accounts(&renounce), vec![a]);
    }

    #[test]
    fn json_record_uses_null_for_missing_side() {
        let a = AccountId::new([1u8; 20]);
        let record = EventRecord {
            seq: 4,
            operation: Operation::Burn,
            event: TokenEvent::Transfer {
                from: Some(a),
                to: None,
                value: u128::MAX,
            },
            recorded_at: Timestamp::new(9),
        };
        let json = record_json(&record);
        assert_eq!(json["seq"], 4);
        assert_eq!(json["operation"], Operation::Burn.as_str());
        assert_eq!(json["event"]["from"], a.to_string());
        assert!(json["event"]["to"].is_null());
        assert_eq!(json["event"]["value"], u128::MAX.to_string());
    }

    #[test]
    fn deploy_then_mint_through_handlers() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig {
            data_dir: dir.path().join("data"),
            map_size_mb: 8,
            ..CliConfig::default()
        };
        let units = Units { human: true };
        let deployer = AccountId::new([0xa0; 20]);
        let other = AccountId::new([0xb0; 20]);

        deploy(
            &config,
            units,
            DeployArgs {
                name: "test token".to_string(),
                symbol: "tt".to_string(),
                document_uri: "http://example.com".to_string(),
                document_hash: Some(String::new()),
                document_file: None,
                decimals: 2,
                initial_qty: "10".to_string(),
                from: deployer,
            },
        )
        .unwrap();
        mint(&config, units, deployer, other, "0.25").unwrap();
        assert!(mint(&config, units, other, other, "1").is_err());
        renounce_ownership(&config, units, deployer).unwrap();

        let ledger = open_ledger(&config).unwrap();
        assert_eq!(ledger.total_supply(), 1025);
        assert_eq!(ledger.balance_of(&other), 25);
        assert_eq!(ledger.owner(), None);
        assert!(ledger.document_hash().is_zero());

        let filtered = select_events(
            &ledger,
            &EventsArgs {
                since: 1,
                limit: Some(2),
                account: None,
                json: false,
            },
        );
        assert_eq!(filtered.iter().map(|r| r.seq).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn hashes_document_with_sha256() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, b"abc").unwrap();
        let hash = hash_document(&path).unwrap();
        assert_eq!(
            hash.to_string(),
            "0xba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
