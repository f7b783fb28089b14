//! `slp`: command-line caller for a SmartSLP token ledger.

mod commands;
mod config;

use std::path::PathBuf;

use clap::Parser;
use slp_types::AccountId;
use slp_utils::LogFormat;

use crate::commands::{DeployArgs, EventsArgs, Units};
use crate::config::{CliConfig, ConfigOverrides};

#[derive(Parser)]
#[command(name = "slp", version, about = "SmartSLP token ledger")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory for ledger storage.
    #[arg(long, global = true, env = "SLP_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log format: "human" or "json".
    #[arg(long, global = true, env = "SLP_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "SLP_LOG_LEVEL")]
    log_level: Option<String>,

    /// LMDB map size in MiB.
    #[arg(long, global = true, env = "SLP_MAP_SIZE_MB")]
    map_size_mb: Option<usize>,

    /// Read and print amounts as decimal quantities scaled by the token's
    /// decimals instead of smallest units.
    #[arg(long, global = true)]
    human: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Create the token; the deployer becomes owner and holds the initial quantity.
    Deploy {
        #[arg(long)]
        name: String,
        #[arg(long)]
        symbol: String,
        #[arg(long, default_value = "")]
        document_uri: String,
        /// 64 hex digits; empty means no document hash.
        #[arg(long, conflicts_with = "document_file")]
        document_hash: Option<String>,
        /// Hash this file with SHA-256 to obtain the document hash.
        #[arg(long)]
        document_file: Option<PathBuf>,
        #[arg(long, default_value_t = 18)]
        decimals: u8,
        #[arg(long)]
        initial_qty: String,
        #[arg(long)]
        from: AccountId,
    },
    /// Show metadata, supply and owner.
    Info,
    /// Show the balance of one account.
    Balance { account: AccountId },
    /// Create new supply for a recipient. Owner only.
    Mint {
        #[arg(long)]
        from: AccountId,
        #[arg(long)]
        to: AccountId,
        #[arg(long)]
        amount: String,
    },
    /// Destroy part of the caller's own balance.
    Burn {
        #[arg(long)]
        from: AccountId,
        #[arg(long)]
        amount: String,
    },
    /// Hand the owner role to another account.
    TransferOwnership {
        #[arg(long)]
        from: AccountId,
        #[arg(long)]
        to: AccountId,
    },
    /// Give up the owner role for good. Nobody can mint afterwards.
    RenounceOwnership {
        #[arg(long)]
        from: AccountId,
    },
    /// List event log records.
    Events {
        #[arg(long, default_value_t = 0)]
        since: u64,
        #[arg(long)]
        limit: Option<usize>,
        /// Only records involving this account.
        #[arg(long)]
        account: Option<AccountId>,
        #[arg(long)]
        json: bool,
    },
    /// List every account with a non-zero balance.
    Holders,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => CliConfig::from_toml_file(path)?,
        None => CliConfig::default(),
    };
    let config = base.apply_overrides(ConfigOverrides {
        data_dir: cli.data_dir,
        log_format: cli.log_format,
        log_level: cli.log_level,
        map_size_mb: cli.map_size_mb,
    });

    slp_utils::init_logging(config.log_format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::debug!(path = %path.display(), "loaded config file");
    }

    let units = Units { human: cli.human };
    match cli.command {
        Command::Deploy {
            name,
            symbol,
            document_uri,
            document_hash,
            document_file,
            decimals,
            initial_qty,
            from,
        } => commands::deploy(
            &config,
            units,
            DeployArgs {
                name,
                symbol,
                document_uri,
                document_hash,
                document_file,
                decimals,
                initial_qty,
                from,
            },
        ),
        Command::Info => commands::info(&config, units),
        Command::Balance { account } => commands::balance(&config, units, account),
        Command::Mint { from, to, amount } => commands::mint(&config, units, from, to, &amount),
        Command::Burn { from, amount } => commands::burn(&config, units, from, &amount),
        Command::TransferOwnership { from, to } => {
            commands::transfer_ownership(&config, units, from, to)
        }
        Command::RenounceOwnership { from } => commands::renounce_ownership(&config, units, from),
        Command::Events {
            since,
            limit,
            account,
            json,
        } => commands::events(
            &config,
            units,
            EventsArgs {
                since,
                limit,
                account,
                json,
            },
        ),
        Command::Holders => commands::holders(&config, units),
    }
}
