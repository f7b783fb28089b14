//! LMDB storage backend for the SmartSLP token ledger.
//!
//! Implements every storage trait from `slp-store` using the `heed` LMDB
//! bindings. All logical stores live in one environment so that a commit
//! batch spans them in a single write transaction.

pub mod environment;
pub mod error;
pub mod event;
pub mod ledger;
pub mod meta;
pub mod token;
pub mod write_batch;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use write_batch::WriteBatch;
