//! LMDB environment setup.

use std::path::{Path, PathBuf};

use heed::byteorder::BigEndian;
use heed::types::{Bytes, U64};
use heed::{Database, Env, EnvOpenOptions};

use slp_store::{MetaStore, StoreError, SCHEMA_VERSION};

use crate::write_batch::WriteBatch;
use crate::LmdbError;

const MAX_DBS: u32 = 4;

/// Default map size: 64 MiB.
pub const DEFAULT_MAP_SIZE: usize = 64 * 1024 * 1024;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    pub(crate) env: Env,
    path: PathBuf,
    /// Schema version and token metadata.
    pub(crate) meta_db: Database<Bytes, Bytes>,
    /// Account id (20 bytes) → balance (u128 LE).
    pub(crate) balances_db: Database<Bytes, Bytes>,
    /// Total supply and owner.
    pub(crate) state_db: Database<Bytes, Bytes>,
    /// Sequence number → bincode `EventRecord`.
    pub(crate) events_db: Database<U64<BigEndian>, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    ///
    /// The directory is created if missing. A fresh environment is stamped
    /// with the current schema version; an existing one must match it.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per process for this path and
        // the memory map is never accessed outside heed.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let meta_db = env.create_database(&mut wtxn, Some("meta"))?;
        let balances_db = env.create_database(&mut wtxn, Some("balances"))?;
        let state_db = env.create_database(&mut wtxn, Some("state"))?;
        let events_db = env.create_database(&mut wtxn, Some("events"))?;
        wtxn.commit()?;

        let store = Self {
            env,
            path: path.to_path_buf(),
            meta_db,
            balances_db,
            state_db,
            events_db,
        };

        let version = store.get_schema_version().map_err(store_to_lmdb)?;
        match version {
            0 => store
                .set_schema_version(SCHEMA_VERSION)
                .map_err(store_to_lmdb)?,
            v if v == SCHEMA_VERSION => {}
            v => {
                return Err(LmdbError::Corrupt(format!(
                    "schema version {} is not supported (expected {})",
                    v, SCHEMA_VERSION
                )))
            }
        }

        tracing::info!(path = %path.display(), map_size, "opened LMDB environment");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Begin a write batch spanning every database.
    pub fn write_batch(&self) -> Result<WriteBatch<'_>, StoreError> {
        WriteBatch::new(self)
    }
}

fn store_to_lmdb(e: StoreError) -> LmdbError {
    LmdbError::Heed(e.to_string())
}
