//! In-memory stand-ins for the ledger's injected dependencies.
//!
//! [`NullClock`] only moves when a test advances it, and [`NullStore`] keeps
//! the whole ledger in memory with switchable commit failures, so ledger
//! behaviour can be exercised without a data directory.

pub mod clock;
pub mod store;

pub use clock::NullClock;
pub use store::NullStore;
